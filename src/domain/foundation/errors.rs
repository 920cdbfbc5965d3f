//! Domain validation errors.

use thiserror::Error;

/// Errors raised when constructing domain value objects from raw input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: &'static str,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("expected between {min} and {max} options, got {actual}")]
    WrongOptionCount {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("invalid option label: {0}")]
    InvalidOptionLabel(String),
}

impl ValidationError {
    /// Creates an out-of-range error.
    pub fn out_of_range(field: &'static str, min: i32, max: i32, actual: i32) -> Self {
        Self::OutOfRange {
            field,
            min,
            max,
            actual,
        }
    }

    /// Creates an empty-field error.
    pub fn empty(field: &'static str) -> Self {
        Self::Empty { field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_with_context() {
        let err = ValidationError::empty("situation");
        assert_eq!(err.to_string(), "situation cannot be empty");

        let err = ValidationError::out_of_range("percentage", 0, 100, 120);
        assert_eq!(
            err.to_string(),
            "percentage must be between 0 and 100, got 120"
        );

        let err = ValidationError::WrongOptionCount {
            min: 2,
            max: 3,
            actual: 1,
        };
        assert_eq!(err.to_string(), "expected between 2 and 3 options, got 1");
    }
}
