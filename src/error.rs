//! Custom error types for fintrack-core
//!
//! Batch-level failures only: a malformed record inside a payload is a
//! skip-with-warning, never an error (see `import`). Errors here mean an
//! entire input or output stream is unusable.

use thiserror::Error;

/// The main error type for fintrack-core operations
#[derive(Error, Debug)]
pub enum FintrackError {
    /// JSON payload could not be decoded at all
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV stream could not be read
    #[error("CSV error: {0}")]
    Csv(String),

    /// Export writer failed
    #[error("Export error: {0}")]
    Export(String),
}

// Implement From traits for common error types

impl From<serde_json::Error> for FintrackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for FintrackError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for fintrack-core operations
pub type FintrackResult<T> = Result<T, FintrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FintrackError::Export("writer closed".into());
        assert_eq!(err.to_string(), "Export error: writer closed");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i64>("not json").unwrap_err();
        let err: FintrackError = json_err.into();
        assert!(matches!(err, FintrackError::Json(_)));
    }
}
