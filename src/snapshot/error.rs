//! Snapshot loading error types

use thiserror::Error;

/// Errors that can occur while listing or loading snapshots
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No snapshot file exists for the requested label
    #[error("Snapshot not found: {0}")]
    NotFound(String),

    /// A required column is missing from the file header
    #[error("Missing column '{column}' in snapshot {label}")]
    MissingColumn { label: String, column: String },

    /// The label contains characters that could escape the data directory
    #[error("Invalid snapshot label: {0}")]
    InvalidLabel(String),
}

/// Result type alias for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SnapshotError::NotFound("04-2020".to_string());
        assert_eq!(err.to_string(), "Snapshot not found: 04-2020");

        let err = SnapshotError::MissingColumn {
            label: "04-2020".to_string(),
            column: "Confirmed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing column 'Confirmed' in snapshot 04-2020"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SnapshotError = io_err.into();
        assert!(matches!(err, SnapshotError::Io(_)));
    }
}
