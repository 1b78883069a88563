//! # Weekly Sales-Volume Bonus
//!
//! Deal de-duplication and threshold bonus over the bonus week.
//!
//! ## Why "Deals" Instead of Sales?
//! A split sale produces one row per participant in the report, and the
//! same physical deal can surface as several sale records (re-signs,
//! corrections). Counting raw rows would double-pay the volume bonus, so
//! sales collapse to deal ids first:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sale ──► eligible type? ──► in bonus week? ──► deal id                 │
//! │                                                    │                    │
//! │                         ┌──────────────────────────┴──────┐            │
//! │                         ▼                                 ▼            │
//! │                 per-participant set                  global set        │
//! │                 (distinct deal ids                   (distinct deal    │
//! │                  they touched)                        ids, everyone)   │
//! │                         │                                 │            │
//! │                         ▼                                 ▼            │
//! │                 over = max(n − 5, 0)             same computation      │
//! │                 bonus = over × $50               over the union        │
//! │                                                  (NOT a sum of the     │
//! │                                                   individual bonuses)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Threshold (5) and per-deal bonus ($50) are fixed domain constants.

use std::collections::{BTreeSet, HashMap};

use crate::calendar::WeekRange;
use crate::money::Money;
use crate::split::normalize_splits;
use crate::types::{Sale, SalespersonName};
use crate::{WEEKLY_BONUS_PER_DEAL_CENTS, WEEKLY_DEAL_THRESHOLD};

// =============================================================================
// Bonus Figures
// =============================================================================

/// Threshold bonus figures for one tally of distinct deals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusFigures {
    /// Distinct deals in the bonus week.
    pub deal_count: u32,
    /// Deals past the weekly threshold.
    pub over_threshold: u32,
    /// Bonus earned: `over_threshold × $50`.
    pub bonus: Money,
}

impl BonusFigures {
    fn from_deal_count(deal_count: u32) -> Self {
        let over_threshold = deal_count.saturating_sub(WEEKLY_DEAL_THRESHOLD);
        BonusFigures {
            deal_count,
            over_threshold,
            bonus: Money::from_cents(WEEKLY_BONUS_PER_DEAL_CENTS)
                .multiply_count(over_threshold as i64),
        }
    }
}

/// The full bonus picture for one bonus week.
#[derive(Debug, Clone)]
pub struct WeeklyBonusSummary {
    /// Independent threshold computation over the union of all deal ids.
    /// This is what the house entry reports.
    pub global: BonusFigures,
    /// Per-participant tallies.
    pub per_salesperson: HashMap<SalespersonName, BonusFigures>,
}

// =============================================================================
// Calculation
// =============================================================================

/// Computes bonus figures for every salesperson and the global aggregate.
///
/// `sales` is the FULL history, not one commission week: the bonus window
/// straddles commission weeks, so callers pass everything and let the
/// window filter decide.
pub fn weekly_bonus_summary(sales: &[Sale], window: &WeekRange) -> WeeklyBonusSummary {
    let mut global_deals: BTreeSet<String> = BTreeSet::new();
    let mut per_person_deals: HashMap<SalespersonName, BTreeSet<String>> = HashMap::new();

    for sale in sales {
        let Some(day) = sale.sale_day() else {
            continue;
        };
        if !window.contains(day) {
            continue;
        }
        if !is_bonus_eligible(sale.sale_type.as_deref()) {
            continue;
        }

        let deal_id = sale.deal_id();
        global_deals.insert(deal_id.clone());

        for split in normalize_splits(sale) {
            per_person_deals
                .entry(split.name)
                .or_default()
                .insert(deal_id.clone());
        }
    }

    WeeklyBonusSummary {
        global: BonusFigures::from_deal_count(global_deals.len() as u32),
        per_salesperson: per_person_deals
            .into_iter()
            .map(|(name, deals)| (name, BonusFigures::from_deal_count(deals.len() as u32)))
            .collect(),
    }
}

/// Sale-type gate for the bonus tally.
///
/// The type is compared lowercased with all whitespace stripped. Name
/// changes never count; a present type must be a sale or trade variant;
/// a missing type passes (older records carry none).
fn is_bonus_eligible(sale_type: Option<&str>) -> bool {
    let Some(raw) = sale_type else {
        return true;
    };
    let normalized: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if normalized.is_empty() {
        return true;
    }
    matches!(
        normalized.as_str(),
        "sale" | "trade" | "trade-in" | "tradein"
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::bonus_week_range;
    use crate::types::SplitEntry;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sale(id: &str, date: &str, salesperson: &str) -> Sale {
        let at = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        Sale {
            id: id.to_string(),
            account_number: None,
            vin: None,
            stock_number: None,
            sale_date: date.to_string(),
            sale_type: Some("Sale".to_string()),
            year: None,
            make: None,
            model: None,
            sale_down_payment_cents: Some(100_000),
            down_payment_cents: None,
            sale_price_cents: None,
            salesperson: Some(salesperson.to_string()),
            salesperson_split: None,
            created_at: at,
            updated_at: at,
        }
    }

    /// Bonus week for the commission week starting Friday 2024-06-07:
    /// Monday 06-03 through Sunday 06-09.
    fn window() -> WeekRange {
        bonus_week_range(NaiveDate::from_ymd_opt(2024, 6, 7).unwrap())
    }

    #[test]
    fn test_type_gate() {
        assert!(is_bonus_eligible(None));
        assert!(is_bonus_eligible(Some("Sale")));
        assert!(is_bonus_eligible(Some("TRADE-IN")));
        assert!(is_bonus_eligible(Some("Trade In")));
        assert!(!is_bonus_eligible(Some("Name Change")));
        assert!(!is_bonus_eligible(Some("name-change")));
        assert!(!is_bonus_eligible(Some("Repo")));
    }

    #[test]
    fn test_five_deals_earn_nothing() {
        let sales: Vec<Sale> = (0..5)
            .map(|i| sale(&format!("s-{i}"), "2024-06-03", "Alex"))
            .collect();
        let summary = weekly_bonus_summary(&sales, &window());

        let alex = &summary.per_salesperson[&SalespersonName::normalize(Some("Alex"))];
        assert_eq!(alex.deal_count, 5);
        assert_eq!(alex.over_threshold, 0);
        assert_eq!(alex.bonus, Money::zero());
    }

    #[test]
    fn test_sixth_deal_earns_fifty() {
        let sales: Vec<Sale> = (0..6)
            .map(|i| sale(&format!("s-{i}"), "2024-06-03", "Alex"))
            .collect();
        let summary = weekly_bonus_summary(&sales, &window());

        let alex = &summary.per_salesperson[&SalespersonName::normalize(Some("Alex"))];
        assert_eq!(alex.over_threshold, 1);
        assert_eq!(alex.bonus.cents(), 5_000);
    }

    #[test]
    fn test_shared_account_number_is_one_deal() {
        let mut first = sale("s-1", "2024-06-03", "Alex");
        let mut second = sale("s-2", "2024-06-04", "Alex");
        // Same account, blank ids: both collapse to deal "10442"
        first.id = "".to_string();
        second.id = "".to_string();
        first.account_number = Some("10442".to_string());
        second.account_number = Some("10442".to_string());

        let summary = weekly_bonus_summary(&[first, second], &window());
        assert_eq!(summary.global.deal_count, 1);

        let alex = &summary.per_salesperson[&SalespersonName::normalize(Some("Alex"))];
        assert_eq!(alex.deal_count, 1);
    }

    #[test]
    fn test_split_sale_counts_for_every_participant() {
        let mut shared = sale("s-1", "2024-06-03", "");
        shared.salesperson = None;
        shared.salesperson_split = Some(vec![
            SplitEntry {
                name: Some("Alex".to_string()),
                share: Some(60.0),
            },
            SplitEntry {
                name: Some("Sam".to_string()),
                share: Some(40.0),
            },
        ]);

        let summary = weekly_bonus_summary(&[shared], &window());

        // One deal globally, but each participant touched it
        assert_eq!(summary.global.deal_count, 1);
        assert_eq!(
            summary.per_salesperson[&SalespersonName::normalize(Some("Alex"))].deal_count,
            1
        );
        assert_eq!(
            summary.per_salesperson[&SalespersonName::normalize(Some("Sam"))].deal_count,
            1
        );
    }

    #[test]
    fn test_global_is_independent_not_a_sum() {
        // Alex and Sam each close 6 separate deals: each earns $50, but the
        // global tally sees 12 deals and pays (12 - 5) × $50
        let mut sales = Vec::new();
        for i in 0..6 {
            sales.push(sale(&format!("a-{i}"), "2024-06-03", "Alex"));
            sales.push(sale(&format!("b-{i}"), "2024-06-04", "Sam"));
        }
        let summary = weekly_bonus_summary(&sales, &window());

        assert_eq!(summary.global.deal_count, 12);
        assert_eq!(summary.global.over_threshold, 7);
        assert_eq!(summary.global.bonus.cents(), 35_000);
    }

    #[test]
    fn test_window_is_inclusive_and_filters() {
        let sales = vec![
            sale("s-1", "2024-06-03", "Alex"), // Monday start
            sale("s-2", "2024-06-09", "Alex"), // Sunday end
            sale("s-3", "2024-06-10", "Alex"), // Monday after: out
            sale("s-4", "2024-06-02", "Alex"), // Sunday before: out
        ];
        let summary = weekly_bonus_summary(&sales, &window());
        assert_eq!(summary.global.deal_count, 2);
    }

    #[test]
    fn test_excluded_types_and_bad_dates_drop_out() {
        let mut name_change = sale("s-1", "2024-06-03", "Alex");
        name_change.sale_type = Some("Name Change".to_string());
        let mut bad_date = sale("s-2", "06/04/2024", "Alex");
        bad_date.sale_type = Some("Sale".to_string());

        let summary = weekly_bonus_summary(&[name_change, bad_date], &window());
        assert_eq!(summary.global.deal_count, 0);
        assert!(summary.per_salesperson.is_empty());
    }

    #[test]
    fn test_unassigned_is_a_participant() {
        let mut orphan = sale("s-1", "2024-06-03", "");
        orphan.salesperson = None;

        let summary = weekly_bonus_summary(&[orphan], &window());
        assert_eq!(
            summary.per_salesperson[&SalespersonName::normalize(None)].deal_count,
            1
        );
    }
}
