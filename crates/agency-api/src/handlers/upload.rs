use crate::constants::{BATCH_FILES_FIELD, SINGLE_FILE_FIELD};
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::upload::ingest::{self, IngestLimits};
use crate::upload::normalize::{multipart_rejection, query_rejection};
use crate::upload::{process_upload, UploadResponse};
use agency_core::{AllowList, AppError, ErrorMetadata, Partition};
use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::QueryRejection,
        Multipart, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UploadQuery {
    /// Target partition, `public` when omitted
    visibility: Option<Partition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BatchItemStatus {
    Stored,
    /// The file itself was refused; resubmitting it unchanged will fail again
    Rejected,
    /// Server-side failure; the same file may succeed on retry
    Failed,
}

impl BatchItemStatus {
    fn for_error(error: &AppError) -> Self {
        if error.is_recoverable() {
            BatchItemStatus::Failed
        } else {
            BatchItemStatus::Rejected
        }
    }
}

/// Outcome for one file of a batch upload
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub status: BatchItemStatus,
    pub original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchUploadResponse {
    pub stored: usize,
    pub rejected: usize,
    pub failed: usize,
    pub results: Vec<BatchItemResult>,
}

fn partition_from(query: Result<Query<UploadQuery>, QueryRejection>) -> Result<Partition, AppError> {
    let Query(query) = query.map_err(query_rejection)?;
    Ok(query.visibility.unwrap_or_default())
}

async fn upload_single(
    state: &AppState,
    query: Result<Query<UploadQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
    list: AllowList,
) -> Result<(StatusCode, Json<UploadResponse>), HttpAppError> {
    let partition = partition_from(query)?;
    let mut multipart = multipart.map_err(multipart_rejection)?;

    let limits = IngestLimits::from_config(state.config.upload());
    let file = ingest::read_single(&mut multipart, SINGLE_FILE_FIELD, limits).await?;

    let response = process_upload(state, file, list, partition).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/v0/uploads",
    tag = "uploads",
    params(UploadQuery),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored", body = UploadResponse),
        (status = 400, description = "Rejected by the general allow-list or malformed request", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    query: Result<Query<UploadQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), HttpAppError> {
    upload_single(&state, query, multipart, AllowList::General).await
}

#[utoipa::path(
    post,
    path = "/api/v0/uploads/images",
    tag = "uploads",
    params(UploadQuery),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Not an allowed image type", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    query: Result<Query<UploadQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), HttpAppError> {
    upload_single(&state, query, multipart, AllowList::Images).await
}

#[utoipa::path(
    post,
    path = "/api/v0/uploads/documents",
    tag = "uploads",
    params(UploadQuery),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Document stored", body = UploadResponse),
        (status = 400, description = "Not an allowed document type", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "upload_document"))]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    query: Result<Query<UploadQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), HttpAppError> {
    upload_single(&state, query, multipart, AllowList::Documents).await
}

/// Each file is filtered and stored on its own; one rejection does not affect the rest.
#[utoipa::path(
    post,
    path = "/api/v0/uploads/batch",
    tag = "uploads",
    params(UploadQuery),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Per-file results", body = BatchUploadResponse),
        (status = 400, description = "Too many files or malformed request", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "upload_batch"))]
pub async fn upload_batch(
    State(state): State<Arc<AppState>>,
    query: Result<Query<UploadQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<BatchUploadResponse>, HttpAppError> {
    let partition = partition_from(query)?;
    let mut multipart = multipart.map_err(multipart_rejection)?;

    let limits = IngestLimits::from_config(state.config.upload());
    let files = ingest::read_files(&mut multipart, BATCH_FILES_FIELD, limits).await?;

    let hide_details = state.config.is_production();
    let mut results = Vec::with_capacity(files.len());
    for file in files {
        let original_name = file.original_name.clone();
        match process_upload(&state, file, AllowList::General, partition).await {
            Ok(upload) => results.push(BatchItemResult {
                status: BatchItemStatus::Stored,
                original_name,
                upload: Some(upload),
                error: None,
            }),
            Err(e) => {
                let status = BatchItemStatus::for_error(&e);
                tracing::debug!(filename = %original_name, status = ?status, error = %e, "Batch item not stored");
                results.push(BatchItemResult {
                    status,
                    original_name,
                    upload: None,
                    error: Some(ErrorResponse::from_app_error(&e, hide_details)),
                });
            }
        }
    }

    let count = |status: BatchItemStatus| results.iter().filter(|r| r.status == status).count();
    let (stored, rejected, failed) = (
        count(BatchItemStatus::Stored),
        count(BatchItemStatus::Rejected),
        count(BatchItemStatus::Failed),
    );

    tracing::info!(stored, rejected, failed, "Batch upload processed");

    Ok(Json(BatchUploadResponse {
        stored,
        rejected,
        failed,
        results,
    }))
}
