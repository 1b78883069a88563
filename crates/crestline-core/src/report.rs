//! # Report Snapshot Builder
//!
//! Assembles the complete, immutable commission report for one week.
//!
//! ## The Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  build_snapshot(week sales, notes, week, ctx)           │
//! │                                                                         │
//! │  1. bonus week = week start − 4 days                                   │
//! │     weekly_bonus_summary(full history, bonus week)                     │
//! │                                                                         │
//! │  2. sort week sales (numeric-aware account, then date)                 │
//! │                                                                         │
//! │  3. sale ──► normalize_splits ──► one row per participant              │
//! │        base = base_commission(true down) × share                       │
//! │        apply_override(base, manual note)                               │
//! │        multi-participant sale ⇒ override_applied forced true           │
//! │                                                                         │
//! │  4. group rows by salesperson, re-sort, number from 1                  │
//! │                                                                         │
//! │  5. total each group                                                   │
//! │                                                                         │
//! │  6. house group ("Key") gets collections bonus + GLOBAL weekly         │
//! │     figures (not its own deal tally)                                   │
//! │                                                                         │
//! │  7. order groups: house first, rest alphabetical                       │
//! │                                                                         │
//! │  8. totals mirror the house figures + collections_complete             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Immutability
//! Snapshots are never edited in place. A note edit or a collections-bonus
//! change re-runs this builder against the same sale list; the archived
//! view renders an old snapshot verbatim. Apart from `generated_at`, the
//! output is a pure function of the inputs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use ts_rs::TS;

use crate::bonus::weekly_bonus_summary;
use crate::calendar::{bonus_week_range, WeekRange};
use crate::formula::{apply_override, base_commission};
use crate::money::Money;
use crate::split::{normalize_splits, split_summary};
use crate::types::{CollectionsBonusState, Sale, SalespersonName, SplitShare};

// =============================================================================
// Snapshot Types
// =============================================================================

/// One report line: a single participant's stake in a single sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionReportRow {
    /// Stable composite key: `<sale key>|<participant>`. Manual notes are
    /// keyed by this value.
    pub key: String,

    /// 1-based position within the salesperson's group, assigned after
    /// the group sort.
    pub sequence: u32,

    #[ts(as = "String")]
    pub sale_date: NaiveDate,
    pub account_number: Option<String>,

    /// `year make model`.
    pub vehicle: String,
    pub vin_last4: String,
    pub down_payment: Money,

    pub salesperson: SalespersonName,
    pub share: SplitShare,

    /// Pre-override, share-adjusted commission.
    pub base_commission: Money,

    /// Post-override commission; always >= 0.
    pub adjusted_commission: Money,

    pub override_applied: bool,
    pub override_details: Option<String>,

    /// Editable free text: the manual note verbatim, else the generated
    /// split summary for multi-participant sales.
    pub notes: String,
}

/// All rows and totals for one normalized salesperson.
///
/// The bonus fields are populated only for the house entry; everyone else
/// carries `None` — bonuses are a dealership-level incentive, not an
/// individual one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionSalespersonSnapshot {
    pub name: SalespersonName,
    pub rows: Vec<CommissionReportRow>,
    pub total_adjusted_commission: Money,
    pub collections_bonus: Option<Money>,
    pub weekly_sales_count: Option<u32>,
    pub weekly_sales_over_threshold: Option<u32>,
    pub weekly_sales_bonus: Option<Money>,
}

/// Report-level totals; mirrors the house entry's figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportTotals {
    pub total_adjusted_commission: Money,
    pub collections_bonus: Option<Money>,
    pub weekly_sales_count: u32,
    pub weekly_sales_over_threshold: u32,
    pub weekly_sales_bonus: Money,

    /// True only when a collections selection exists AND is locked for the
    /// house entry. Callers gate export/archival on this flag.
    pub collections_complete: bool,
}

/// The complete commission report for one commission week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionReportSnapshot {
    #[ts(as = "String")]
    pub period_start: NaiveDate,
    #[ts(as = "String")]
    pub period_end: NaiveDate,
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,

    /// House entry first, remaining salespeople alphabetical.
    pub salespeople: Vec<CommissionSalespersonSnapshot>,
    pub totals: ReportTotals,
}

// =============================================================================
// Build Context
// =============================================================================

/// External inputs to the builder beyond the week's sales.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportContext<'a> {
    /// Persisted collections-bonus selections, keyed by normalized name.
    /// Only the house entry is read.
    pub collections: Option<&'a HashMap<SalespersonName, CollectionsBonusState>>,

    /// Full sale history for the bonus lookback. Falls back to the week's
    /// own sales when absent (the bonus window then sees a partial week).
    pub all_sales: Option<&'a [Sale]>,
}

// =============================================================================
// Builder
// =============================================================================

/// Builds a complete snapshot for one commission week.
///
/// Sales with unparsable dates are silently excluded from rows and bonus
/// tallies alike; the engine reports on the data it can read.
pub fn build_snapshot(
    week_sales: &[Sale],
    notes: &HashMap<String, String>,
    week: &WeekRange,
    ctx: ReportContext<'_>,
) -> CommissionReportSnapshot {
    // 1. Bonus figures over the full history and the offset bonus window
    let history = ctx.all_sales.unwrap_or(week_sales);
    let bonus = weekly_bonus_summary(history, &bonus_week_range(week.start));

    // 2. Week sales in report order
    let mut dated: Vec<(NaiveDate, &Sale)> = week_sales
        .iter()
        .filter_map(|sale| sale.sale_day().map(|day| (day, sale)))
        .collect();
    dated.sort_by(|a, b| {
        account_order(a.1.account_number.as_deref(), b.1.account_number.as_deref())
            .then(a.0.cmp(&b.0))
    });

    // 3. One row per (sale, participant)
    let mut groups: HashMap<SalespersonName, Vec<CommissionReportRow>> = HashMap::new();
    for (day, sale) in dated {
        let splits = normalize_splits(sale);
        let multi_participant = splits.len() > 1;
        let default_note = if multi_participant {
            split_summary(&splits)
        } else {
            String::new()
        };

        let pool = base_commission(sale.true_down_payment());
        let sale_key = sale.sale_key();

        for split in splits {
            let row_key = format!("{}|{}", sale_key, split.name);
            // Only a MANUAL note drives the override matchers; the
            // generated split summary is display text, not an override.
            let manual = notes
                .get(&row_key)
                .map(String::as_str)
                .map(str::trim)
                .filter(|text| !text.is_empty());

            let base_dollars = pool * split.share.fraction();
            let outcome = apply_override(base_dollars, manual);

            // The split itself is an override event: every row of a
            // multi-participant sale is flagged
            let override_applied = outcome.applied || multi_participant;
            let override_details = outcome.details.or_else(|| {
                if multi_participant {
                    Some(default_note.clone())
                } else {
                    None
                }
            });
            let notes_text = manual
                .map(str::to_string)
                .unwrap_or_else(|| default_note.clone());

            let row = CommissionReportRow {
                key: row_key,
                sequence: 0, // assigned after the group sort
                sale_date: day,
                account_number: sale.account_number.clone(),
                vehicle: sale.vehicle_description(),
                vin_last4: sale.vin_last4(),
                down_payment: sale.true_down_payment(),
                salesperson: split.name.clone(),
                share: split.share,
                base_commission: Money::from_dollars_clamped(base_dollars),
                adjusted_commission: outcome.amount,
                override_applied,
                override_details,
                notes: notes_text,
            };
            groups.entry(split.name).or_default().push(row);
        }
    }

    // 4–5. Group, re-sort, number, total
    let house_selection = ctx
        .collections
        .and_then(|map| map.iter().find(|(name, _)| name.is_house()))
        .map(|(_, state)| state);

    let mut salespeople: Vec<CommissionSalespersonSnapshot> = groups
        .into_iter()
        .map(|(name, mut rows)| {
            rows.sort_by(|a, b| {
                account_order(a.account_number.as_deref(), b.account_number.as_deref())
                    .then(a.sale_date.cmp(&b.sale_date))
            });
            for (index, row) in rows.iter_mut().enumerate() {
                row.sequence = (index + 1) as u32;
            }
            let total_adjusted_commission =
                rows.iter().map(|row| row.adjusted_commission).sum();

            // 6. House decoration: the GLOBAL weekly figures, not the
            // house participant's own deal tally
            let (collections_bonus, count, over, weekly_bonus) = if name.is_house() {
                (
                    house_selection.map(CollectionsBonusState::value),
                    Some(bonus.global.deal_count),
                    Some(bonus.global.over_threshold),
                    Some(bonus.global.bonus),
                )
            } else {
                (None, None, None, None)
            };

            CommissionSalespersonSnapshot {
                name,
                rows,
                total_adjusted_commission,
                collections_bonus,
                weekly_sales_count: count,
                weekly_sales_over_threshold: over,
                weekly_sales_bonus: weekly_bonus,
            }
        })
        .collect();

    // 7. House first, rest alphabetical
    salespeople.sort_by(|a, b| {
        (!a.name.is_house())
            .cmp(&!b.name.is_house())
            .then_with(|| {
                a.name
                    .as_str()
                    .to_lowercase()
                    .cmp(&b.name.as_str().to_lowercase())
            })
    });

    // 8. Totals mirror the house entry
    let house_total = salespeople
        .iter()
        .find(|sp| sp.name.is_house())
        .map(|sp| sp.total_adjusted_commission)
        .unwrap_or_default();

    CommissionReportSnapshot {
        period_start: week.start,
        period_end: week.end,
        generated_at: Utc::now(),
        salespeople,
        totals: ReportTotals {
            total_adjusted_commission: house_total,
            collections_bonus: house_selection.map(CollectionsBonusState::value),
            weekly_sales_count: bonus.global.deal_count,
            weekly_sales_over_threshold: bonus.global.over_threshold,
            weekly_sales_bonus: bonus.global.bonus,
            collections_complete: house_selection.map(|state| state.locked).unwrap_or(false),
        },
    }
}

// =============================================================================
// Ordering
// =============================================================================

/// Numeric-aware account ordering: integer accounts ascending, then
/// non-numeric accounts lexicographically after them.
fn account_order(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.unwrap_or("").trim();
    let b = b.unwrap_or("").trim();
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
