//! # Validation Module
//!
//! Input validation for the write boundaries of the report engine.
//!
//! The read path never validates: bad sale dates, odd split lists, and
//! unmatched override notes are data-quality pass-throughs, not errors.
//! Validation applies only where the engine WRITES — the collections-bonus
//! selection headed for the persisted store.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a collections-bonus selection in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (an explicit "no bonus this week" selection)
///
/// ## Example
/// ```rust
/// use crestline_core::validation::validate_collections_bonus_cents;
///
/// assert!(validate_collections_bonus_cents(50_000).is_ok()); // $500
/// assert!(validate_collections_bonus_cents(0).is_ok());
/// assert!(validate_collections_bonus_cents(-100).is_err());
/// ```
pub fn validate_collections_bonus_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "collections bonus".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_collections_bonus_cents() {
        assert!(validate_collections_bonus_cents(0).is_ok());
        assert!(validate_collections_bonus_cents(100_000).is_ok());
        assert!(validate_collections_bonus_cents(-1).is_err());
    }
}
