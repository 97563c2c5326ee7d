//! Upload pipeline glue: multipart ingestion, filtering, storage and metadata

pub mod filter;
pub mod ingest;
pub mod normalize;

use agency_core::{AccessibilityMetadata, AllowList, AppError, Partition, StoredFile, UploadedFile};
use agency_processing::{accessibility, FallbackContext};
use serde::Serialize;
use std::time::Instant;
use utoipa::ToSchema;

use crate::state::AppState;

/// A stored upload together with its accessibility metadata
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub original_name: String,
    pub file: StoredFile,
    pub metadata: AccessibilityMetadata,
}

/// Filter, persist and describe one uploaded file.
///
/// Storing and metadata extraction run concurrently. Extraction never fails: if the
/// blocking task dies the filename heuristics are used instead.
#[tracing::instrument(
    skip(state, file),
    fields(filename = %file.original_name, allow_list = list.as_str(), partition = %partition)
)]
pub async fn process_upload(
    state: &AppState,
    file: UploadedFile,
    list: AllowList,
    partition: Partition,
) -> Result<UploadResponse, AppError> {
    let start = Instant::now();

    state.filter(list).accept(&file)?;

    let context = FallbackContext::from_file(&file);
    let for_extraction = file.clone();
    let extraction = tokio::task::spawn_blocking(move || accessibility::extract(&for_extraction));

    let (stored, metadata) = tokio::join!(state.storage.store(Some(&file), partition), extraction);
    let stored = stored?;

    let metadata = metadata.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Metadata extraction task failed, using filename heuristics");
        accessibility::normalize(None, &context)
    });

    tracing::info!(
        stored_filename = %stored.filename,
        size_bytes = stored.size_bytes,
        duration_ms = start.elapsed().as_millis() as u64,
        "Upload stored"
    );

    Ok(UploadResponse {
        original_name: file.original_name,
        file: stored,
        metadata,
    })
}
