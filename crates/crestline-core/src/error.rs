//! # Error Types
//!
//! Domain-specific error types for crestline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  crestline-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  crestline-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  crestline-reports errors (separate crate)                             │
//! │  └── ReportError      - Service-level failures (wraps the above)       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ReportError → caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculation pipeline itself is error-free by construction: bad sale
//! dates are skipped and unmatched override notes fall back to the base
//! amount. Errors here exist for the WRITE boundaries (week keys and
//! collections-bonus input) and are deliberately few.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A week key could not be parsed as an ISO date.
    ///
    /// ## When This Occurs
    /// - Corrupted key in the persisted collections-bonus store
    /// - Malformed key from a caller (UI sends free text)
    #[error("Invalid week key: {0:?} (expected YYYY-MM-DD)")]
    InvalidWeekKey(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before a write reaches the persisted store.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., invalid week key).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidWeekKey("garbage".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid week key: \"garbage\" (expected YYYY-MM-DD)"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::OutOfRange {
            field: "collections bonus".to_string(),
            min: 0,
            max: i64::MAX,
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
