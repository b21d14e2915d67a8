//! Error types for opstrack
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in the tracker core.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// CSV input lacks one or more required columns
    #[error("Schema error: missing required column(s): {}", .0.join(", "))]
    Schema(Vec<String>),

    /// A date or typed column value could not be parsed
    #[error("Format error: {0}")]
    Format(String),

    /// Any other import failure, carrying the underlying cause
    #[error("Import error: {0}")]
    Import(String),

    /// Operation would introduce a second record with the same id
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    /// Edited snapshot is structurally invalid
    #[error("Snapshot rejected: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Non-fatal input problem; nothing was changed
    #[error("{0}")]
    Validation(#[from] ValidationWarning),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structural problems with an edited table snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },

    #[error("row {row} has unknown id {id}")]
    UnknownId { row: usize, id: String },

    #[error("row {row} holds {id}, which belongs to another row")]
    Misplaced { row: usize, id: String },
}

/// Form submissions that are refused without changing state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationWarning {
    #[error("Please provide an update description before submitting.")]
    MissingDescription,

    #[error("Please enter a name for the custom category.")]
    MissingCustomCategory,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("No update with id {0}")]
    UnknownRecord(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Invalid {column} value: {value}")]
    InvalidValue { column: String, value: String },
}

impl From<csv::Error> for TrackerError {
    fn from(err: csv::Error) -> Self {
        TrackerError::Import(err.to_string())
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_columns() {
        let err = TrackerError::Schema(vec!["Status".to_string(), "Date Logged".to_string()]);
        assert_eq!(
            err.to_string(),
            "Schema error: missing required column(s): Status, Date Logged"
        );
    }

    #[test]
    fn test_format_error() {
        let err = TrackerError::Format("row 2, Date Logged: 'tomorrow'".to_string());
        assert_eq!(err.to_string(), "Format error: row 2, Date Logged: 'tomorrow'");
    }

    #[test]
    fn test_import_error() {
        let err = TrackerError::Import("unexpected end of file".to_string());
        assert_eq!(err.to_string(), "Import error: unexpected end of file");
    }

    #[test]
    fn test_snapshot_error_conversion() {
        let err: TrackerError = SnapshotError::RowCount { expected: 3, actual: 2 }.into();
        assert!(matches!(err, TrackerError::Snapshot(_)));
        assert_eq!(err.to_string(), "Snapshot rejected: expected 3 rows, got 2");
    }

    #[test]
    fn test_validation_warning_message() {
        let err: TrackerError = ValidationWarning::MissingDescription.into();
        assert_eq!(
            err.to_string(),
            "Please provide an update description before submitting."
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TrackerError = io_err.into();
        assert!(matches!(err, TrackerError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<usize> {
            Ok(1001)
        }

        fn returns_err() -> Result<usize> {
            Err(TrackerError::DuplicateId("UPDATE-1001".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
