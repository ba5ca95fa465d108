//! Error types for the factorial-design library.
//!
//! This module provides error handling using the `thiserror` crate,
//! with specific error variants for generation bounds, label and header
//! edits, display order bookkeeping, and CSV export.

use std::fmt;

use thiserror::Error;

/// Which generation bound an input exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bound {
    /// Number of candidate levels.
    Levels,
    /// Number of factors.
    Factors,
    /// Factors multiplied by the number of levels.
    RunProduct,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Levels => f.write_str("number of levels"),
            Self::Factors => f.write_str("number of factors"),
            Self::RunProduct => f.write_str("factors x levels"),
        }
    }
}

/// The main error type for the factorial-design library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============ Generation Errors ============
    /// The requested design exceeds one of the generation bounds.
    #[error("constraint violation: {bound} is {actual}, maximum is {max}")]
    ConstraintViolation {
        /// The bound that was exceeded.
        bound: Bound,
        /// The value supplied by the caller.
        actual: usize,
        /// The largest accepted value.
        max: usize,
    },

    /// The confounding column product does not fit in an `i64`.
    #[error("confounding column overflows i64 in run {row}")]
    CodeOverflow {
        /// Zero-based row in generation order.
        row: usize,
    },

    // ============ Edit Errors ============
    /// A label edit targets a level code that does not appear in the column.
    #[error("level {code} does not appear in column {column}")]
    InvalidLevelReference {
        /// Zero-based column index.
        column: usize,
        /// The level code that was referenced.
        code: i64,
    },

    /// A label or header edit targets a column that does not exist.
    #[error("column {column} is out of range for {columns} columns")]
    ColumnOutOfRange {
        /// The requested column.
        column: usize,
        /// Number of columns in the current design.
        columns: usize,
    },

    // ============ Order Errors ============
    /// A display order is not a permutation of the matrix rows.
    #[error("invalid display order: {message}")]
    InvalidOrder {
        /// Description of what is wrong with the order.
        message: String,
    },

    // ============ Export Errors ============
    /// Export inputs disagree in shape.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension description.
        expected: String,
        /// Actual dimension description.
        actual: String,
    },

    /// The CSV writer failed.
    #[error("csv export failed: {message}")]
    Export {
        /// Underlying writer error.
        message: String,
    },
}

/// A specialized `Result` type for factorial-design operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Create a new `InvalidOrder` error.
    #[must_use]
    pub fn invalid_order(message: impl Into<String>) -> Self {
        Self::InvalidOrder {
            message: message.into(),
        }
    }

    /// Create a new `Export` error.
    #[must_use]
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    /// Whether the error leaves the caller's state untouched and can be retried
    /// with corrected input.
    #[must_use]
    pub fn is_edit_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidLevelReference { .. } | Self::ColumnOutOfRange { .. }
        )
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::export(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::export(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ConstraintViolation {
            bound: Bound::RunProduct,
            actual: 18,
            max: 15,
        };
        assert!(err.to_string().contains("factors x levels"));
        assert!(err.to_string().contains("18"));
        assert!(err.to_string().contains("15"));

        let err = Error::InvalidLevelReference { column: 2, code: 7 };
        assert!(err.to_string().contains("level 7"));
        assert!(err.to_string().contains("column 2"));

        let err = Error::ColumnOutOfRange {
            column: 4,
            columns: 3,
        };
        assert!(err.to_string().contains("4"));
        assert!(err.to_string().contains("3 columns"));
    }

    #[test]
    fn test_error_equality() {
        let err1 = Error::InvalidLevelReference { column: 0, code: 1 };
        let err2 = Error::InvalidLevelReference { column: 0, code: 1 };
        let err3 = Error::InvalidLevelReference { column: 1, code: 1 };

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn test_edit_errors() {
        assert!(Error::InvalidLevelReference { column: 0, code: 9 }.is_edit_error());
        assert!(Error::ColumnOutOfRange {
            column: 3,
            columns: 2
        }
        .is_edit_error());
        assert!(!Error::export("disk full").is_edit_error());
    }
}
