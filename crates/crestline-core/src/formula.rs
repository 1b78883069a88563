//! # Commission Formula
//!
//! Base commission computation and free-text override parsing.
//!
//! ## The Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Commission Formula Pipeline                          │
//! │                                                                         │
//! │  true down payment (cents)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  base_commission ──► unrounded dollars                                 │
//! │       │    <= $0        → 0                                            │
//! │       │    <= $3,000    → flat $100                                    │
//! │       │    >  $3,000    → 5% of down payment                           │
//! │       ▼                                                                 │
//! │  × split share (report builder)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_override(base, manual note)                                     │
//! │       │  1. no note          → base                                    │
//! │       │  2. "<a>/<b>"        → base × a/(a+b)                          │
//! │       │  3. "<n>%"           → base × n/100                            │
//! │       │  4. "override"/"payout" + number → absolute replacement        │
//! │       │  5. anything else    → base (note is just a note)              │
//! │       ▼                                                                 │
//! │  clamp = max(0, round to cents)  ← the ONLY rounding point             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Precedence
//! The matchers run in the fixed order above and the first match wins: a
//! note containing both a ratio and a percentage resolves as a ratio. The
//! matchers are a hand-rolled scanner rather than regexes so the precedence
//! is pinned by this module, not by an engine's leftmost-match rules.

use crate::money::Money;
use crate::{COMMISSION_RATE, FLAT_COMMISSION_CEILING_CENTS, FLAT_COMMISSION_CENTS};

// =============================================================================
// Base Commission
// =============================================================================

/// Maps a true down payment to the base commission in unrounded dollars.
///
/// Rounding happens once, at the final clamp — never here.
///
/// ## Example
/// ```rust
/// use crestline_core::formula::base_commission;
/// use crestline_core::money::Money;
///
/// assert_eq!(base_commission(Money::from_cents(0)), 0.0);
/// assert_eq!(base_commission(Money::from_cents(300_000)), 100.0);
/// assert_eq!(base_commission(Money::from_cents(350_000)), 175.0);
/// ```
pub fn base_commission(true_down: Money) -> f64 {
    let cents = true_down.cents();
    if cents <= 0 {
        0.0
    } else if cents <= FLAT_COMMISSION_CEILING_CENTS {
        FLAT_COMMISSION_CENTS as f64 / 100.0
    } else {
        true_down.as_dollars() * COMMISSION_RATE
    }
}

// =============================================================================
// Override Parsing
// =============================================================================

/// A recognized override pattern in a commission note.
#[derive(Debug, Clone, PartialEq)]
pub enum Override {
    /// `<a>/<b>`: the row keeps a/(a+b) of its base commission.
    Ratio { numerator: f64, denominator: f64 },
    /// `<n>%`: the row keeps n% of its base commission.
    Percentage { percent: f64 },
    /// An absolute replacement amount, recognized only when the note
    /// contains the word "override" or "payout".
    FixedAmount { dollars: f64 },
}

/// The result of running a note through the override matchers.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideOutcome {
    /// Final clamped amount (>= 0, whole cents).
    pub amount: Money,
    /// Whether any matcher fired.
    pub applied: bool,
    /// Human-readable description of what fired.
    pub details: Option<String>,
}

/// Runs the matchers in priority order; first match wins.
///
/// ## Example
/// ```rust
/// use crestline_core::formula::{parse_override, Override};
///
/// // Ratio beats percentage when both are present
/// let parsed = parse_override("50/50 split, 60% override");
/// assert_eq!(parsed, Some(Override::Ratio { numerator: 50.0, denominator: 50.0 }));
///
/// assert_eq!(parse_override("call customer back"), None);
/// ```
pub fn parse_override(note: &str) -> Option<Override> {
    let chars: Vec<char> = note.chars().collect();

    if let Some((numerator, denominator)) = scan_ratio(&chars) {
        return Some(Override::Ratio {
            numerator,
            denominator,
        });
    }

    if let Some(percent) = scan_percentage(&chars) {
        return Some(Override::Percentage { percent });
    }

    let lowered = note.to_lowercase();
    if lowered.contains("override") || lowered.contains("payout") {
        if let Some(dollars) = scan_first_number(&chars) {
            return Some(Override::FixedAmount { dollars });
        }
    }

    None
}

/// Applies an optional manual note to a share-adjusted base amount.
///
/// An empty or missing note, or a note matching no pattern, returns the
/// clamped base unchanged with `applied: false`.
pub fn apply_override(base_dollars: f64, note: Option<&str>) -> OverrideOutcome {
    let note = note.map(str::trim).filter(|text| !text.is_empty());
    let Some(text) = note else {
        return OverrideOutcome {
            amount: Money::from_dollars_clamped(base_dollars),
            applied: false,
            details: None,
        };
    };

    match parse_override(text) {
        Some(Override::Ratio {
            numerator,
            denominator,
        }) => {
            let sum = numerator + denominator;
            let share = if sum > 0.0 { numerator / sum } else { 0.0 };
            OverrideOutcome {
                amount: Money::from_dollars_clamped(base_dollars * share),
                applied: true,
                details: Some(format!(
                    "Ratio override {numerator}/{denominator}: {:.2}% of base",
                    share * 100.0
                )),
            }
        }
        Some(Override::Percentage { percent }) => OverrideOutcome {
            amount: Money::from_dollars_clamped(base_dollars * percent / 100.0),
            applied: true,
            details: Some(format!("Percentage override: {percent}% of base")),
        },
        Some(Override::FixedAmount { dollars }) => OverrideOutcome {
            amount: Money::from_dollars_clamped(dollars),
            applied: true,
            details: Some(format!(
                "Fixed payout override: {}",
                Money::from_dollars_clamped(dollars)
            )),
        },
        None => OverrideOutcome {
            amount: Money::from_dollars_clamped(base_dollars),
            applied: false,
            details: None,
        },
    }
}

// =============================================================================
// Note Scanning
// =============================================================================
// A number is `<digits>` or `<digits>.<digits>`, and a scan position only
// counts when it is not the interior of a longer number ("109186" never
// yields "9186").

/// Parses a number starting exactly at `start`. Returns the value and the
/// index of the first character past it.
fn number_at(chars: &[char], start: usize) -> Option<(f64, usize)> {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    if end == start {
        return None;
    }
    if end < chars.len() && chars[end] == '.' {
        let mut frac_end = end + 1;
        while frac_end < chars.len() && chars[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > end + 1 {
            end = frac_end;
        }
    }
    let text: String = chars[start..end].iter().collect();
    text.parse::<f64>().ok().map(|value| (value, end))
}

/// Whether `index` begins a fresh number (not the tail of one).
fn is_number_start(chars: &[char], index: usize) -> bool {
    if !chars[index].is_ascii_digit() {
        return false;
    }
    if index == 0 {
        return true;
    }
    let prev = chars[index - 1];
    !prev.is_ascii_digit() && prev != '.'
}

fn skip_spaces(chars: &[char], mut index: usize) -> usize {
    while index < chars.len() && chars[index] == ' ' {
        index += 1;
    }
    index
}

/// First `<num> / <num>` occurrence.
fn scan_ratio(chars: &[char]) -> Option<(f64, f64)> {
    for i in 0..chars.len() {
        if !is_number_start(chars, i) {
            continue;
        }
        let Some((first, after_first)) = number_at(chars, i) else {
            continue;
        };
        let slash = skip_spaces(chars, after_first);
        if slash >= chars.len() || chars[slash] != '/' {
            continue;
        }
        let second_start = skip_spaces(chars, slash + 1);
        if let Some((second, _)) = number_at(chars, second_start) {
            return Some((first, second));
        }
    }
    None
}

/// First `<num>%` occurrence.
fn scan_percentage(chars: &[char]) -> Option<f64> {
    for i in 0..chars.len() {
        if !is_number_start(chars, i) {
            continue;
        }
        let Some((value, after)) = number_at(chars, i) else {
            continue;
        };
        let sign = skip_spaces(chars, after);
        if sign < chars.len() && chars[sign] == '%' {
            return Some(value);
        }
    }
    None
}

/// First number anywhere in the note (a leading `$` is simply skipped over).
fn scan_first_number(chars: &[char]) -> Option<f64> {
    for i in 0..chars.len() {
        if is_number_start(chars, i) {
            if let Some((value, _)) = number_at(chars, i) {
                return Some(value);
            }
        }
    }
    None
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_commission_boundaries() {
        assert_eq!(base_commission(Money::from_cents(0)), 0.0);
        assert_eq!(base_commission(Money::from_cents(-5_000)), 0.0);
        assert_eq!(base_commission(Money::from_cents(1)), 100.0);
        assert_eq!(base_commission(Money::from_cents(300_000)), 100.0);

        // Just past the flat tier: 3000.01 * 5% = 150.0005, unrounded
        let just_over = base_commission(Money::from_cents(300_001));
        assert!((just_over - 150.0005).abs() < 1e-9);

        assert_eq!(base_commission(Money::from_cents(350_000)), 175.0);
    }

    #[test]
    fn test_no_note_passes_base_through() {
        let outcome = apply_override(175.0, None);
        assert_eq!(outcome.amount.cents(), 17_500);
        assert!(!outcome.applied);
        assert!(outcome.details.is_none());

        let blank = apply_override(175.0, Some("   "));
        assert!(!blank.applied);
        assert_eq!(blank.amount.cents(), 17_500);
    }

    #[test]
    fn test_ratio_override() {
        let outcome = apply_override(200.0, Some("50/50 with Sam"));
        assert!(outcome.applied);
        assert_eq!(outcome.amount.cents(), 10_000);

        let third = apply_override(300.0, Some("1/2 deal"));
        assert_eq!(third.amount.cents(), 10_000); // 300 * 1/(1+2)
    }

    #[test]
    fn test_ratio_beats_percentage() {
        // Both patterns present; the ratio matcher runs first
        let outcome = apply_override(100.0, Some("50/50 split, 60% override"));
        assert!(outcome.applied);
        assert_eq!(outcome.amount.cents(), 5_000);
    }

    #[test]
    fn test_percentage_override() {
        let outcome = apply_override(100.0, Some("60% to Alex"));
        assert!(outcome.applied);
        assert_eq!(outcome.amount.cents(), 6_000);

        let fractional = apply_override(100.0, Some("12.5%"));
        assert_eq!(fractional.amount.cents(), 1_250);
    }

    #[test]
    fn test_fixed_override_needs_keyword() {
        // Keyword present: absolute replacement, not scaled by base
        let outcome = apply_override(100.0, Some("manager override $250"));
        assert!(outcome.applied);
        assert_eq!(outcome.amount.cents(), 25_000);

        let payout = apply_override(100.0, Some("Payout 80.50 approved"));
        assert_eq!(payout.amount.cents(), 8_050);

        // Bare number without the keyword is just a note
        let plain = apply_override(100.0, Some("deal 250"));
        assert!(!plain.applied);
        assert_eq!(plain.amount.cents(), 10_000);
    }

    #[test]
    fn test_unmatched_note_is_just_a_note() {
        let outcome = apply_override(100.0, Some("call customer back"));
        assert!(!outcome.applied);
        assert_eq!(outcome.amount.cents(), 10_000);
        assert!(outcome.details.is_none());
    }

    #[test]
    fn test_zero_sum_ratio_collapses_to_zero() {
        let outcome = apply_override(100.0, Some("0/0"));
        assert!(outcome.applied);
        assert_eq!(outcome.amount.cents(), 0);
    }

    #[test]
    fn test_clamp_floors_at_zero() {
        let outcome = apply_override(-40.0, None);
        assert_eq!(outcome.amount.cents(), 0);
    }

    #[test]
    fn test_interior_digits_never_start_a_match() {
        // "11/22" is the ratio 11:22, never 1:22 from an interior digit
        assert_eq!(
            parse_override("11/22"),
            Some(Override::Ratio {
                numerator: 11.0,
                denominator: 22.0
            })
        );
        assert_eq!(parse_override("VIN 109186"), None);
    }

    #[test]
    fn test_details_are_human_readable() {
        let ratio = apply_override(100.0, Some("50/50"));
        assert_eq!(
            ratio.details.as_deref(),
            Some("Ratio override 50/50: 50.00% of base")
        );

        let fixed = apply_override(100.0, Some("payout $99.95"));
        assert_eq!(
            fixed.details.as_deref(),
            Some("Fixed payout override: $99.95")
        );
    }
}
