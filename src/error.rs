//! Error types for flag field operations.
//!
//! The only failure a flag field itself can report is a record index at or
//! beyond its length. The remaining variants come from building a field out
//! of a [`FlagFieldConfig`](crate::FlagFieldConfig).

use std::fmt;
use thiserror::Error;

/// Which bound an out-of-bounds access violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    /// The record index
    Index,
}

impl fmt::Display for BoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundKind::Index => f.write_str("index"),
        }
    }
}

/// The error type for flag field operations.
#[derive(Error, Debug)]
pub enum FlagFieldError {
    /// A record index at or beyond the number of records
    #[error("Outside of bound {bound}. Max of {max} but received {input}")]
    OutOfBounds {
        /// The bound that was violated
        bound: BoundKind,
        /// The bound value (the record count for [`BoundKind::Index`])
        max: usize,
        /// The offending input
        input: usize,
    },

    /// Invalid construction parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// JSON config encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary config encoding or decoding failed
    #[error("Binary serialization error: {0}")]
    Binary(#[from] bincode::Error),
}

/// A specialized `Result` type for flag field operations.
pub type Result<T> = std::result::Result<T, FlagFieldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FlagFieldError::OutOfBounds {
            bound: BoundKind::Index,
            max: 5,
            input: 7,
        };
        assert_eq!(
            err.to_string(),
            "Outside of bound index. Max of 5 but received 7"
        );

        let err = FlagFieldError::InvalidParameter("too many bits".into());
        assert_eq!(err.to_string(), "Invalid parameter: too many bits");
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<usize> {
            Ok(9)
        }

        assert_eq!(returns_result().unwrap(), 9);
    }
}
