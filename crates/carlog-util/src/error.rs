//! Error types for carlog

use thiserror::Error;

/// Core error type for carlog operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarlogError {
    /// A cell could not be interpreted (bad date, bad number, empty car)
    #[error("Row {row}, column '{column}': cannot parse '{value}': {message}")]
    DataFormat {
        row: usize,
        column: String,
        value: String,
        message: String,
    },

    /// A required column is absent from the event log
    #[error("Missing required column: {0}")]
    MissingField(String),

    /// Catalog or grading parameters that cannot be used
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CarlogError {
    pub fn data_format(
        row: usize,
        column: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::DataFormat {
            row,
            column: column.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn missing_field(column: impl Into<String>) -> Self {
        Self::MissingField(column.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

pub type CarlogResult<T> = std::result::Result<T, CarlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_format_message_names_the_cell() {
        let err = CarlogError::data_format(4, "Date", "2024/01/15", "expected YYYY-MM-DD");
        let msg = err.to_string();
        assert!(msg.contains("Row 4"));
        assert!(msg.contains("'Date'"));
        assert!(msg.contains("2024/01/15"));
    }

    #[test]
    fn missing_field_message() {
        let err = CarlogError::missing_field("Car");
        assert_eq!(err.to_string(), "Missing required column: Car");
    }
}
