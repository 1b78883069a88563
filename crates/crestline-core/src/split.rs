//! # Split Allocation
//!
//! Normalizes a sale's salesperson/split data into shares summing to 100%.
//!
//! ## Normalization Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  split list present, raw sum > 0   → share = raw / sum × 100           │
//! │                                      (rounded to 4 decimals)           │
//! │  split list present, raw sum == 0  → every share = 0                   │
//! │  split list empty / missing        → salesperson (or "Unassigned")     │
//! │                                      at 100%                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The zero-sum case deliberately does NOT fall back to an equal split:
//! every participant's commission for that sale becomes zero. Observed
//! production behavior, preserved as-is.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Sale, SalespersonName, SplitShare};

// =============================================================================
// Normalized Split
// =============================================================================

/// One participant's normalized stake in a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NormalizedSplit {
    pub name: SalespersonName,
    pub share: SplitShare,
}

// =============================================================================
// Allocation
// =============================================================================

/// Normalizes a sale's split data.
///
/// A non-empty split list is authoritative; otherwise the single
/// salesperson of record (or "Unassigned") takes 100%.
///
/// ## Example
/// ```rust
/// use crestline_core::split::normalize_splits;
/// # use chrono::Utc;
/// # use crestline_core::types::{Sale, SplitEntry};
/// # let now = Utc::now();
/// # let sale = Sale {
/// #     id: "s-1".into(), account_number: None, vin: None, stock_number: None,
/// #     sale_date: "2024-06-07".into(), sale_type: None,
/// #     year: None, make: None, model: None,
/// #     sale_down_payment_cents: None, down_payment_cents: None, sale_price_cents: None,
/// #     salesperson: Some("Alex".into()), salesperson_split: None,
/// #     created_at: now, updated_at: now,
/// # };
/// let splits = normalize_splits(&sale);
/// assert_eq!(splits.len(), 1);
/// assert_eq!(splits[0].name.as_str(), "Alex");
/// assert_eq!(splits[0].share.percent(), 100.0);
/// ```
pub fn normalize_splits(sale: &Sale) -> Vec<NormalizedSplit> {
    match &sale.salesperson_split {
        Some(entries) if !entries.is_empty() => {
            let total: f64 = entries.iter().map(|entry| entry.share.unwrap_or(0.0)).sum();
            entries
                .iter()
                .map(|entry| {
                    let share = if total > 0.0 {
                        SplitShare::from_ratio(entry.share.unwrap_or(0.0), total)
                    } else {
                        // Zero-sum lists collapse rather than equal-split
                        SplitShare::zero()
                    };
                    NormalizedSplit {
                        name: SalespersonName::normalize(entry.name.as_deref()),
                        share,
                    }
                })
                .collect()
        }
        _ => vec![NormalizedSplit {
            name: SalespersonName::normalize(sale.salesperson.as_deref()),
            share: SplitShare::full(),
        }],
    }
}

/// Human-readable split summary, used as the default note for
/// multi-participant sales: `"Commission split: Alex 60% | Sam 40%"`.
pub fn split_summary(splits: &[NormalizedSplit]) -> String {
    let parts: Vec<String> = splits
        .iter()
        .map(|split| format!("{} {}%", split.name, split.share))
        .collect();
    format!("Commission split: {}", parts.join(" | "))
}

// =============================================================================
// Unit Tests
// =============================================================================
