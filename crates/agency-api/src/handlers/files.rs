use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use agency_core::{AppError, FileDescription, Partition};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

fn parse_partition(raw: &str) -> Result<Partition, AppError> {
    raw.parse::<Partition>()
        .map_err(|e| AppError::InvalidInput(e.to_string()))
}

fn cache_control(partition: Partition) -> &'static str {
    match partition {
        Partition::Public => "public, max-age=31536000, immutable",
        Partition::Private => "private, no-store",
    }
}

#[utoipa::path(
    get,
    path = "/api/v0/files/{partition}/{filename}",
    tag = "files",
    params(
        ("partition" = String, Path, description = "`public` or `private`"),
        ("filename" = String, Path, description = "Stored filename returned by an upload")
    ),
    responses(
        (status = 200, description = "File bytes", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid partition or filename", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_file"))]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path((partition, filename)): Path<(String, String)>,
) -> Result<impl IntoResponse, HttpAppError> {
    let partition = parse_partition(&partition)?;
    let file = state.storage.retrieve(&filename, partition).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.mime_type.as_str())
        .header(header::CONTENT_LENGTH, file.size_bytes)
        .header(header::CACHE_CONTROL, cache_control(partition))
        .body(Body::from(file.data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

#[utoipa::path(
    get,
    path = "/api/v0/files/{partition}/{filename}/info",
    tag = "files",
    params(
        ("partition" = String, Path, description = "`public` or `private`"),
        ("filename" = String, Path, description = "Stored filename returned by an upload")
    ),
    responses(
        (status = 200, description = "File description", body = FileDescription),
        (status = 400, description = "Invalid partition or filename", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_file_info"))]
pub async fn get_file_info(
    State(state): State<Arc<AppState>>,
    Path((partition, filename)): Path<(String, String)>,
) -> Result<Json<FileDescription>, HttpAppError> {
    let partition = parse_partition(&partition)?;
    let description = state.storage.describe(&filename, partition).await?;
    Ok(Json(description))
}

#[utoipa::path(
    delete,
    path = "/api/v0/files/{partition}/{filename}",
    tag = "files",
    params(
        ("partition" = String, Path, description = "`public` or `private`"),
        ("filename" = String, Path, description = "Stored filename returned by an upload")
    ),
    responses(
        (status = 204, description = "File deleted"),
        (status = 400, description = "Invalid partition or filename", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_file"))]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path((partition, filename)): Path<(String, String)>,
) -> Result<StatusCode, HttpAppError> {
    let partition = parse_partition(&partition)?;
    state.storage.remove(&filename, partition).await?;

    tracing::info!(filename = %filename, partition = %partition, "File deleted");
    Ok(StatusCode::NO_CONTENT)
}
