//! Error normalization for the multipart layer
//!
//! Limit conditions become structured errors carrying a reason code; anything else
//! falls through to generic input/internal handling.

use agency_core::AppError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;

use super::ingest::IngestError;

const MIB: u64 = 1024 * 1024;

fn describe_size(bytes: u64) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::FileTooLarge { max } => AppError::PayloadTooLarge(format!(
                "File too large. Maximum size is {}",
                describe_size(max)
            )),
            IngestError::TooManyFiles { max } => AppError::TooManyFiles(format!(
                "Too many files. Maximum is {} per request",
                max
            )),
            IngestError::UnexpectedField(field) => {
                AppError::UnexpectedField(format!("Unexpected file field '{}'", field))
            }
            IngestError::MissingFile(field) => {
                AppError::InvalidInput(format!("No file provided in field '{}'", field))
            }
            IngestError::Multipart(e) => {
                let status = e.status();
                if status == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::PayloadTooLarge("Request body too large".to_string())
                } else if status.is_client_error() {
                    AppError::InvalidInput(format!("Failed to read multipart: {}", e.body_text()))
                } else {
                    AppError::Internal(format!("Failed to read multipart: {}", e.body_text()))
                }
            }
        }
    }
}

/// The request was not a readable multipart body at all
pub fn multipart_rejection(rejection: MultipartRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge("Request body too large".to_string());
    }
    AppError::InvalidInput(format!("Invalid multipart request: {}", rejection.body_text()))
}

pub fn query_rejection(rejection: QueryRejection) -> AppError {
    AppError::InvalidInput(format!("Invalid query: {}", rejection.body_text()))
}
