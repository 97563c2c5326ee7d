//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Use
//! `AppError` (or types that implement `Into<AppError>`) for errors so they become
//! `HttpAppError` and render consistently (status, body, logging).

use agency_core::{AppError, ErrorMetadata, LogLevel};
use agency_processing::ValidationReport;
use agency_storage::StorageError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::upload::ingest::IngestError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code, e.g. `LIMIT_FILE_SIZE`
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
    /// Accepted values when an upload was rejected by an allow-list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

impl ErrorResponse {
    /// Build the body for an error, hiding internals when `hide_details` is set or the
    /// error is sensitive.
    pub fn from_app_error(error: &AppError, hide_details: bool) -> Self {
        let hide = hide_details || error.is_sensitive();
        Self {
            error: error.client_message(),
            details: (!hide).then(|| error.detailed_message()),
            error_type: (!hide).then(|| error.error_type().to_string()),
            code: error.error_code().to_string(),
            recoverable: error.is_recoverable(),
            suggested_action: error.suggested_action().map(String::from),
            allowed: error.allowed_values().map(<[String]>::to_vec),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from agency-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<ValidationReport> for HttpAppError {
    fn from(report: ValidationReport) -> Self {
        HttpAppError(report.into())
    }
}

impl From<IngestError> for HttpAppError {
    fn from(err: IngestError) -> Self {
        HttpAppError(err.into())
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error.detailed_message(), error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| {
            let env = env.to_lowercase();
            env == "production" || env == "prod"
        })
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = ErrorResponse::from_app_error(app_error, is_production_env());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failure_body_lists_allowed() {
        let err = AppError::ValidationFailed {
            message: "Invalid file type".to_string(),
            allowed: vec!["image/jpeg".to_string(), "image/png".to_string()],
        };
        let body = ErrorResponse::from_app_error(&err, false);
        assert_eq!(body.code, "VALIDATION_FAILED");
        assert_eq!(body.allowed.as_ref().map(Vec::len), Some(2));
        assert!(body.details.is_some());
    }

    #[test]
    fn test_sensitive_error_hides_details() {
        let err = AppError::StorageFailure("EACCES /srv/uploads/private".to_string());
        let body = ErrorResponse::from_app_error(&err, false);
        assert!(body.details.is_none());
        assert!(body.error_type.is_none());
        assert!(!body.error.contains("/srv"));
    }

    #[test]
    fn test_production_hides_details() {
        let err = AppError::NotFound("File not found".to_string());
        let body = ErrorResponse::from_app_error(&err, true);
        assert!(body.details.is_none());
        assert_eq!(body.error, "File not found");
    }

    #[test]
    fn test_status_code_mapping() {
        let response = HttpAppError(AppError::PayloadTooLarge("too big".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = HttpAppError::from(StorageError::NotFound("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
