//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur during value object construction.
///
/// A validation failure is scoped to a single extracted field: the
/// offending value is discarded and the rest of the turn proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading read-only reference data at startup.
///
/// Reference tables are loaded once and fail fast; a bad record aborts
/// startup rather than surfacing mid-conversation.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read reference data file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse reference data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid reference record '{record}': {reason}")]
    InvalidRecord { record: String, reason: String },
}

impl CatalogError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_record(record: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::InvalidRecord {
            record: record.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("session_key");
        assert_eq!(format!("{}", err), "Field 'session_key' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("age", 0, 120, 300);
        assert_eq!(
            format!("{}", err),
            "Field 'age' must be between 0 and 120, got 300"
        );
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("state", "not a known region");
        assert_eq!(
            format!("{}", err),
            "Field 'state' has invalid format: not a known region"
        );
    }
}
