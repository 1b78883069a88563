//! # Service Error Types
//!
//! `ReportError` is what service callers see: a thin wrapper over the
//! core and database errors, plus the one failure this layer introduces
//! itself (writing to a locked week).

use thiserror::Error;

use crestline_core::{CoreError, ValidationError};
use crestline_db::DbError;

/// Errors surfaced by the report service.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    /// Core domain error (bad week key, etc.).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input validation failed before a write.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The week's collections selection is locked against edits.
    ///
    /// ## When This Occurs
    /// A locked selection means the week has been finalized; the UI
    /// disables the editor, and this error backs that rule up when a
    /// write arrives anyway.
    #[error("Collections bonus for week {week_key} is locked")]
    SelectionLocked { week_key: String },
}

/// Result type for service operations.
pub type ReportResult<T> = Result<T, ReportError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_message_names_the_week() {
        let err = ReportError::SelectionLocked {
            week_key: "2024-06-07".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Collections bonus for week 2024-06-07 is locked"
        );
    }

    #[test]
    fn test_core_errors_convert() {
        let err: ReportError = CoreError::InvalidWeekKey("junk".to_string()).into();
        assert!(matches!(err, ReportError::Core(_)));
    }
}
