//! # Domain Types
//!
//! Core domain types used throughout the commission report engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │      Sale       │   │ SalespersonName │   │ CollectionsBonus-   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │ State               │   │
//! │  │  id             │   │  trimmed, never │   │  ─────────────      │   │
//! │  │  account_number │   │  empty,         │   │  value_cents        │   │
//! │  │  sale_date (raw)│   │  "Unassigned"   │   │  locked             │   │
//! │  │  down payments  │   │  fallback       │   │  saved_at           │   │
//! │  │  split entries  │   └─────────────────┘   └─────────────────────┘   │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   SplitShare    │   │   SplitEntry    │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  u32 in 1/10000 │   │  raw name/share │                             │
//! │  │  of a percent   │   │  as recorded    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Raw vs Normalized
//! `Sale` carries data exactly as the remote store recorded it: the sale
//! date is an unparsed ISO string, split shares are whatever the UI saved.
//! Normalization (names, shares, dates) happens once, in the calculation
//! modules, never piecemeal at call sites.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::{HOUSE_SALESPERSON, UNASSIGNED_SALESPERSON};

// =============================================================================
// Salesperson Name
// =============================================================================

/// A canonically normalized salesperson name.
///
/// ## Normalization Rules
/// - Surrounding whitespace is trimmed
/// - A missing or empty name becomes `"Unassigned"`
/// - Original casing is preserved; only the house check is case-insensitive
///
/// Every map keyed by salesperson (bonus tallies, collections selections,
/// report groups) uses this type, so normalization happens exactly once at
/// the boundary instead of ad hoc at each lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct SalespersonName(String);

impl SalespersonName {
    /// Normalizes a raw, possibly missing name.
    ///
    /// ## Example
    /// ```rust
    /// use crestline_core::types::SalespersonName;
    ///
    /// assert_eq!(SalespersonName::normalize(Some("  Alex ")).as_str(), "Alex");
    /// assert_eq!(SalespersonName::normalize(None).as_str(), "Unassigned");
    /// assert_eq!(SalespersonName::normalize(Some("   ")).as_str(), "Unassigned");
    /// ```
    pub fn normalize(raw: Option<&str>) -> Self {
        let trimmed = raw.map(str::trim).unwrap_or("");
        if trimmed.is_empty() {
            SalespersonName(UNASSIGNED_SALESPERSON.to_string())
        } else {
            SalespersonName(trimmed.to_string())
        }
    }

    /// The house/aggregate salesperson name.
    pub fn house() -> Self {
        SalespersonName(HOUSE_SALESPERSON.to_string())
    }

    /// Returns the normalized name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the house salesperson ("Key", case-insensitive),
    /// the entry that carries dealership-level bonuses.
    pub fn is_house(&self) -> bool {
        self.0.eq_ignore_ascii_case(HOUSE_SALESPERSON)
    }
}

impl fmt::Display for SalespersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Split Share
// =============================================================================

/// A split share as a percentage in ten-thousandths of a percent.
///
/// ## Why This Unit?
/// 1 unit = 0.0001%, so 100% = 1_000_000 units. Shares renormalize to four
/// decimal places of a percent; this unit stores that precision exactly,
/// with no float drift in sums or equality checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct SplitShare(u32);

/// Units in a full 100% share.
const FULL_SHARE_UNITS: u32 = 1_000_000;

impl SplitShare {
    /// Creates a share from raw units (ten-thousandths of a percent).
    #[inline]
    pub const fn from_units(units: u32) -> Self {
        SplitShare(units)
    }

    /// A full 100% share.
    #[inline]
    pub const fn full() -> Self {
        SplitShare(FULL_SHARE_UNITS)
    }

    /// A zero share.
    #[inline]
    pub const fn zero() -> Self {
        SplitShare(0)
    }

    /// Creates a share from a raw/total ratio, rounded to 4 decimal places
    /// of a percent. A non-positive ratio collapses to zero.
    pub fn from_ratio(raw: f64, total: f64) -> Self {
        let fraction = (raw / total).max(0.0);
        SplitShare((fraction * FULL_SHARE_UNITS as f64).round() as u32)
    }

    /// Returns the raw units.
    #[inline]
    pub const fn units(&self) -> u32 {
        self.0
    }

    /// Returns the share as a fraction in [0, n] (1.0 = 100%).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / FULL_SHARE_UNITS as f64
    }

    /// Returns the share as a percentage (60.0 = 60%).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Checks if the share is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Formats the share as a percent with up to 4 decimals, trailing zeros
/// trimmed: `60`, `33.3333`, `12.5`.
impl fmt::Display for SplitShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 10_000;
        let frac = self.0 % 10_000;
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            let digits = format!("{frac:04}");
            write!(f, "{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

// =============================================================================
// Split Entry (raw)
// =============================================================================

/// A raw split entry exactly as recorded on the sale.
///
/// Both fields are optional because the upstream editor saves partial rows;
/// normalization treats a missing share as zero and a missing name as
/// unassigned.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SplitEntry {
    pub name: Option<String>,
    pub share: Option<f64>,
}

// =============================================================================
// Sale
// =============================================================================

/// A completed vehicle sale, read-only to the report engine.
///
/// ## Identity Fields
/// `id`, `account_number`, `vin`, `stock_number` exist for display and for
/// deal de-duplication only; the engine never mutates a sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    /// Unique identifier (UUID v4 in the reference store).
    pub id: String,

    /// Customer account number; numeric in practice but stored as text.
    pub account_number: Option<String>,

    /// Vehicle identification number.
    pub vin: Option<String>,

    /// Dealer stock number.
    pub stock_number: Option<String>,

    /// Sale date as recorded, ISO-8601 `YYYY-MM-DD`.
    /// Kept raw: an unparsable date excludes the sale from reports rather
    /// than failing the whole pipeline.
    pub sale_date: String,

    /// Sale type as recorded ("Sale", "Trade-In", "Name Change", ...).
    pub sale_type: Option<String>,

    /// Vehicle model year.
    pub year: Option<i32>,

    /// Vehicle make.
    pub make: Option<String>,

    /// Vehicle model.
    pub model: Option<String>,

    /// Down payment recorded on the sale itself.
    pub sale_down_payment_cents: Option<i64>,

    /// Generic down payment field (older records).
    pub down_payment_cents: Option<i64>,

    /// Full sale price (last-resort commission basis).
    pub sale_price_cents: Option<i64>,

    /// Single salesperson of record, when no split list exists.
    pub salesperson: Option<String>,

    /// Multi-way split list; authoritative when non-empty.
    pub salesperson_split: Option<Vec<SplitEntry>>,

    /// When the record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Sale {
    /// Parses the recorded sale date. `None` means the sale is excluded
    /// from every window, row, and bonus tally.
    pub fn sale_day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.sale_date.trim(), "%Y-%m-%d").ok()
    }

    /// The commission basis: down payment, falling back to the generic
    /// down payment, falling back to the sale price, else zero.
    pub fn true_down_payment(&self) -> Money {
        let cents = self
            .sale_down_payment_cents
            .or(self.down_payment_cents)
            .or(self.sale_price_cents)
            .unwrap_or(0);
        Money::from_cents(cents)
    }

    /// `year make model`, skipping missing parts.
    pub fn vehicle_description(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if let Some(year) = self.year {
            parts.push(year.to_string());
        }
        for field in [&self.make, &self.model] {
            if let Some(value) = field {
                let value = value.trim();
                if !value.is_empty() {
                    parts.push(value.to_string());
                }
            }
        }
        parts.join(" ")
    }

    /// Last four characters of the VIN, or the whole VIN when shorter.
    pub fn vin_last4(&self) -> String {
        let vin = self.vin.as_deref().unwrap_or("").trim();
        let chars: Vec<char> = vin.chars().collect();
        let start = chars.len().saturating_sub(4);
        chars[start..].iter().collect()
    }

    /// Stable composite key for report rows: pipe-joined non-empty
    /// date / account / id / vin / vin-last-4 components.
    pub fn sale_key(&self) -> String {
        let vin_last4 = self.vin_last4();
        [
            self.sale_date.trim(),
            self.account_number.as_deref().unwrap_or("").trim(),
            self.id.trim(),
            self.vin.as_deref().unwrap_or("").trim(),
            vin_last4.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("|")
    }

    /// Deal identity for bonus de-duplication: the first non-empty of
    /// sale id, account number, stock number, VIN; else a synthetic
    /// `<date>-<id>` fallback.
    pub fn deal_id(&self) -> String {
        for candidate in [
            Some(self.id.as_str()),
            self.account_number.as_deref(),
            self.stock_number.as_deref(),
            self.vin.as_deref(),
        ] {
            if let Some(value) = candidate {
                let value = value.trim();
                if !value.is_empty() {
                    return value.to_string();
                }
            }
        }
        format!("{}-{}", self.sale_date.trim(), self.id.trim())
    }
}

// =============================================================================
// Collections Bonus State
// =============================================================================

/// Persisted collections-bonus selection for one commission week.
///
/// Owned by the external store; the snapshot treats it as input and never
/// derives it from sales. `locked` is a user-facing business rule (no more
/// edits to this week's selection), not a concurrency primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CollectionsBonusState {
    /// Selected bonus amount in cents.
    pub value_cents: i64,

    /// Whether the selection is locked against further edits.
    pub locked: bool,

    /// When the selection was last written.
    #[ts(as = "String")]
    pub saved_at: DateTime<Utc>,
}

impl CollectionsBonusState {
    /// The selected bonus as Money.
    #[inline]
    pub fn value(&self) -> Money {
        Money::from_cents(self.value_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bare_sale() -> Sale {
        let at = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        Sale {
            id: "s-1".to_string(),
            account_number: None,
            vin: None,
            stock_number: None,
            sale_date: "2024-06-07".to_string(),
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
    fn test_name_normalization() {
        assert_eq!(SalespersonName::normalize(Some(" Alex ")).as_str(), "Alex");
        assert_eq!(SalespersonName::normalize(None).as_str(), "Unassigned");
        assert_eq!(SalespersonName::normalize(Some("")).as_str(), "Unassigned");
    }

    #[test]
    fn test_house_is_case_insensitive() {
        assert!(SalespersonName::normalize(Some("KEY")).is_house());
        assert!(SalespersonName::normalize(Some("key")).is_house());
        assert!(!SalespersonName::normalize(Some("Keyes")).is_house());
    }

    #[test]
    fn test_split_share_display_trims_zeros() {
        assert_eq!(SplitShare::from_units(600_000).to_string(), "60");
        assert_eq!(SplitShare::from_units(333_333).to_string(), "33.3333");
        assert_eq!(SplitShare::from_units(125_000).to_string(), "12.5");
        assert_eq!(SplitShare::full().to_string(), "100");
    }

    #[test]
    fn test_split_share_from_ratio() {
        let third = SplitShare::from_ratio(1.0, 3.0);
        assert_eq!(third.units(), 333_333);
        assert!((third.percent() - 33.3333).abs() < 0.0001);
    }

    #[test]
    fn test_true_down_payment_fallback_chain() {
        let mut sale = bare_sale();
        assert_eq!(sale.true_down_payment().cents(), 0);

        sale.sale_price_cents = Some(900_000);
        assert_eq!(sale.true_down_payment().cents(), 900_000);

        sale.down_payment_cents = Some(250_000);
        assert_eq!(sale.true_down_payment().cents(), 250_000);

        sale.sale_down_payment_cents = Some(350_000);
        assert_eq!(sale.true_down_payment().cents(), 350_000);
    }

    #[test]
    fn test_sale_day_rejects_garbage() {
        let mut sale = bare_sale();
        assert_eq!(
            sale.sale_day(),
            Some(NaiveDate::from_ymd_opt(2024, 6, 7).unwrap())
        );

        sale.sale_date = "06/07/2024".to_string();
        assert_eq!(sale.sale_day(), None);
    }

    #[test]
    fn test_vehicle_description_skips_missing() {
        let mut sale = bare_sale();
        assert_eq!(sale.vehicle_description(), "");

        sale.year = Some(2021);
        sale.make = Some("Honda".to_string());
        sale.model = Some("Civic".to_string());
        assert_eq!(sale.vehicle_description(), "2021 Honda Civic");

        sale.make = Some("  ".to_string());
        assert_eq!(sale.vehicle_description(), "2021 Civic");
    }

    #[test]
    fn test_vin_last4() {
        let mut sale = bare_sale();
        assert_eq!(sale.vin_last4(), "");

        sale.vin = Some("1HGBH41JXMN109186".to_string());
        assert_eq!(sale.vin_last4(), "9186");

        sale.vin = Some("186".to_string());
        assert_eq!(sale.vin_last4(), "186");
    }

    #[test]
    fn test_sale_key_joins_non_empty() {
        let mut sale = bare_sale();
        sale.account_number = Some("10442".to_string());
        sale.vin = Some("1HGBH41JXMN109186".to_string());
        assert_eq!(
            sale.sale_key(),
            "2024-06-07|10442|s-1|1HGBH41JXMN109186|9186"
        );
    }

    #[test]
    fn test_deal_id_priority() {
        let mut sale = bare_sale();
        assert_eq!(sale.deal_id(), "s-1");

        sale.id = "".to_string();
        sale.stock_number = Some("STK-88".to_string());
        assert_eq!(sale.deal_id(), "STK-88");

        sale.stock_number = None;
        assert_eq!(sale.deal_id(), "2024-06-07-");
    }
}
