//! # Calendar Windowing
//!
//! Commission and bonus week computation.
//!
//! ## The Two Calendars
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Dual-Calendar Windowing                             │
//! │                                                                         │
//! │        Mon  Tue  Wed  Thu  Fri  Sat  Sun  Mon  Tue  Wed  Thu            │
//! │         │    │    │    │    │    │    │    │    │    │    │            │
//! │  Bonus  ├────┴────┴────┴────┴────┴────┴────┤                           │
//! │  week   │  Monday → Sunday                 │                           │
//! │         │                                                               │
//! │  Comm.                 ├────┴────┴────┴────┴────┴────┴────┤            │
//! │  week                  │  Friday → Thursday (payout)      │            │
//! │                                                                         │
//! │  The bonus week starts 4 days BEFORE the commission week start,        │
//! │  which lands on the preceding Monday by construction. The straddle     │
//! │  across commission weeks is intentional: the bonus accounting period   │
//! │  is offset from the payout period.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sale dates carry no time component, so ranges are inclusive date spans;
//! there is no 23:59:59 boundary to get wrong.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

use crate::error::CoreError;
use crate::types::Sale;

/// Days the bonus week starts before the commission week.
const BONUS_WEEK_OFFSET_DAYS: i64 = 4;

// =============================================================================
// Week Range
// =============================================================================

/// An inclusive 7-day date span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeekRange {
    /// First day of the span.
    #[ts(as = "String")]
    pub start: NaiveDate,

    /// Last day of the span (start + 6 days).
    #[ts(as = "String")]
    pub end: NaiveDate,
}

impl WeekRange {
    fn starting(start: NaiveDate) -> Self {
        WeekRange {
            start,
            end: start + Duration::days(6),
        }
    }

    /// Inclusive containment check.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// =============================================================================
// Week Key
// =============================================================================

/// Canonical grouping/persistence key for a commission week.
///
/// Serializes as the `YYYY-MM-DD` of the commission week start (a Friday).
/// Two dates in the same Friday→Thursday span yield an identical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct WeekKey(#[ts(as = "String")] NaiveDate);

impl WeekKey {
    /// The key of the commission week containing `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        WeekKey(commission_week_range(date).start)
    }

    /// Parses a stored key, normalizing to the containing commission week.
    ///
    /// ## Example
    /// ```rust
    /// use crestline_core::calendar::WeekKey;
    ///
    /// let key = WeekKey::parse("2024-06-07").unwrap();
    /// assert_eq!(key.to_string(), "2024-06-07");
    /// assert!(WeekKey::parse("junk").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| CoreError::InvalidWeekKey(raw.to_string()))?;
        Ok(WeekKey::for_date(date))
    }

    /// First day of the commission week (a Friday).
    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.0
    }

    /// The full commission week range for this key.
    pub fn range(&self) -> WeekRange {
        WeekRange::starting(self.0)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

// =============================================================================
// Week Computation
// =============================================================================

/// The commission week (Friday → Thursday) containing `date`.
///
/// Start is the most recent Friday at or before `date`; a Friday maps to
/// itself.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use crestline_core::calendar::commission_week_range;
///
/// // 2024-06-07 is a Friday
/// let week = commission_week_range(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
/// assert_eq!(week.start, NaiveDate::from_ymd_opt(2024, 6, 7).unwrap());
/// assert_eq!(week.end, NaiveDate::from_ymd_opt(2024, 6, 13).unwrap());
/// ```
pub fn commission_week_range(date: NaiveDate) -> WeekRange {
    let days_from_monday = date.weekday().num_days_from_monday() as i64;
    let friday_from_monday = Weekday::Fri.num_days_from_monday() as i64;
    let days_back = (days_from_monday + 7 - friday_from_monday) % 7;
    WeekRange::starting(date - Duration::days(days_back))
}

/// The bonus week (Monday → Sunday) derived from a commission week start.
///
/// Start = commission start − 4 days; for a Friday-starting commission week
/// this is the preceding Monday.
pub fn bonus_week_range(commission_start: NaiveDate) -> WeekRange {
    WeekRange::starting(commission_start - Duration::days(BONUS_WEEK_OFFSET_DAYS))
}

// =============================================================================
// Week Buckets
// =============================================================================

/// One selectable commission week in the history, with its sale count.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeekBucket {
    pub key: WeekKey,
    #[ts(as = "String")]
    pub start: NaiveDate,
    #[ts(as = "String")]
    pub end: NaiveDate,
    pub sale_count: usize,
}

/// Groups sales by commission week, most recent week first.
///
/// Sales with unparsable dates are skipped; they belong to no week.
pub fn week_buckets(sales: &[Sale]) -> Vec<WeekBucket> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for sale in sales {
        if let Some(day) = sale.sale_day() {
            *counts.entry(commission_week_range(day).start).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .rev()
        .map(|(start, sale_count)| {
            let range = WeekRange::starting(start);
            WeekBucket {
                key: WeekKey(start),
                start: range.start,
                end: range.end,
                sale_count,
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale_on(id: &str, date: &str) -> Sale {
        let at = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        Sale {
            id: id.to_string(),
            account_number: None,
            vin: None,
            stock_number: None,
            sale_date: date.to_string(),
            sale_type: None,
            year: None,
            make: None,
            model: None,
            sale_down_payment_cents: None,
            down_payment_cents: None,
            sale_price_cents: None,
            salesperson: None,
            salesperson_split: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_friday_maps_to_itself() {
        // 2024-06-07 is a Friday
        let week = commission_week_range(day(2024, 6, 7));
        assert_eq!(week.start, day(2024, 6, 7));
        assert_eq!(week.end, day(2024, 6, 13));
    }

    #[test]
    fn test_every_day_of_span_shares_a_key() {
        let expected = WeekKey::for_date(day(2024, 6, 7));
        for offset in 0..7 {
            let date = day(2024, 6, 7) + Duration::days(offset);
            assert_eq!(WeekKey::for_date(date), expected, "offset {offset}");
        }
        // The next Friday starts a new week
        assert_ne!(WeekKey::for_date(day(2024, 6, 14)), expected);
    }

    #[test]
    fn test_thursday_rolls_back_six_days() {
        // 2024-06-13 is the Thursday closing the 06-07 week
        let week = commission_week_range(day(2024, 6, 13));
        assert_eq!(week.start, day(2024, 6, 7));
    }

    #[test]
    fn test_bonus_week_is_preceding_monday() {
        // Commission week starts Friday 06-07; bonus week starts Monday 06-03
        let bonus = bonus_week_range(day(2024, 6, 7));
        assert_eq!(bonus.start, day(2024, 6, 3));
        assert_eq!(bonus.end, day(2024, 6, 9));
        assert_eq!(bonus.start.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_week_key_round_trip() {
        let key = WeekKey::parse("2024-06-07").unwrap();
        assert_eq!(key.to_string(), "2024-06-07");
        assert_eq!(key.start(), day(2024, 6, 7));

        // Mid-week input normalizes to the containing week start
        let normalized = WeekKey::parse("2024-06-10").unwrap();
        assert_eq!(normalized, key);
    }

    #[test]
    fn test_week_key_rejects_garbage() {
        assert!(WeekKey::parse("06/07/2024").is_err());
        assert!(WeekKey::parse("").is_err());
    }

    #[test]
    fn test_week_buckets_newest_first() {
        let sales = vec![
            sale_on("a", "2024-06-07"),
            sale_on("b", "2024-06-10"),
            sale_on("c", "2024-05-31"),
            sale_on("d", "not-a-date"),
        ];

        let buckets = week_buckets(&sales);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].start, day(2024, 6, 7));
        assert_eq!(buckets[0].sale_count, 2);
        assert_eq!(buckets[1].start, day(2024, 5, 31));
        assert_eq!(buckets[1].sale_count, 1);
    }
}
