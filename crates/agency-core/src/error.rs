//! Error types module
//!
//! This module provides the core error type used throughout the upload pipeline.
//! Storage, validation, and multipart failures are all funnelled into `AppError`,
//! which knows how it should be presented to a client.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "LIMIT_FILE_SIZE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {message}")]
    ValidationFailed {
        message: String,
        allowed: Vec<String>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Too many files: {0}")]
    TooManyFiles(String),

    #[error("Unexpected field: {0}")]
    UnexpectedField(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::StorageFailure(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::ValidationFailed { .. } => (
            400,
            "VALIDATION_FAILED",
            false,
            Some("Resubmit a file matching one of the allowed types"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the stored filename and partition"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "LIMIT_FILE_SIZE",
            false,
            Some("Reduce file size and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::TooManyFiles(_) => (
            400,
            "LIMIT_FILE_COUNT",
            false,
            Some("Send fewer files in a single request"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnexpectedField(_) => (
            400,
            "LIMIT_UNEXPECTED_FILE",
            false,
            Some("Check the multipart field name"),
            false,
            LogLevel::Debug,
        ),
        AppError::StorageFailure(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::ValidationFailed { .. } => "ValidationFailed",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::TooManyFiles(_) => "TooManyFiles",
            AppError::UnexpectedField(_) => "UnexpectedField",
            AppError::StorageFailure(_) => "StorageFailure",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Accepted values the client can pick from, for validation failures
    pub fn allowed_values(&self) -> Option<&[String]> {
        match self {
            AppError::ValidationFailed { allowed, .. } if !allowed.is_empty() => Some(allowed),
            _ => None,
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::ValidationFailed { ref message, .. } => message.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::TooManyFiles(ref msg) => msg.clone(),
            AppError::UnexpectedField(ref msg) => msg.clone(),
            AppError::StorageFailure(_) => "Failed to access storage".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("File not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "File not found");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_storage_failure_is_hidden() {
        let err = AppError::StorageFailure("disk full at /var/uploads".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert!(err.is_recoverable());
        assert!(err.is_sensitive());
        assert!(!err.client_message().contains("/var/uploads"));
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_validation_failed_exposes_allowed_values() {
        let err = AppError::ValidationFailed {
            message: "Invalid file type".to_string(),
            allowed: vec!["image/jpeg".to_string(), "image/png".to_string()],
        };
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert_eq!(err.allowed_values().map(|a| a.len()), Some(2));

        let err = AppError::InvalidInput("No file".to_string());
        assert!(err.allowed_values().is_none());
    }

    #[test]
    fn test_multipart_limit_codes() {
        assert_eq!(
            AppError::PayloadTooLarge("x".to_string()).error_code(),
            "LIMIT_FILE_SIZE"
        );
        assert_eq!(
            AppError::PayloadTooLarge("x".to_string()).http_status_code(),
            413
        );
        assert_eq!(
            AppError::TooManyFiles("x".to_string()).error_code(),
            "LIMIT_FILE_COUNT"
        );
        assert_eq!(
            AppError::UnexpectedField("x".to_string()).error_code(),
            "LIMIT_UNEXPECTED_FILE"
        );
    }

    #[test]
    fn test_io_error_maps_to_storage_failure() {
        let err = AppError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(err.error_type(), "StorageFailure");
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let err = AppError::from(anyhow::anyhow!("inner cause"));
        assert!(err.detailed_message().contains("inner cause"));
    }
}
