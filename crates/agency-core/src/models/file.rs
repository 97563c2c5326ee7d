use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Partition;

/// A file received in an upload request.
///
/// Everything here is client-supplied and untrusted. The value lives for one request
/// and is consumed by the storage engine.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub data: Bytes,
    pub mime_type: Option<String>,
    pub size_bytes: Option<u64>,
}

impl UploadedFile {
    pub fn new(
        original_name: impl Into<String>,
        mime_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let data = data.into();
        Self {
            original_name: original_name.into(),
            size_bytes: Some(data.len() as u64),
            mime_type,
            data,
        }
    }
}

/// Result of a successful store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub filename: String,
    pub partition: Partition,
    pub size_bytes: u64,
    /// Derived from the stored extension, never from the upload
    pub mime_type: String,
}

/// File bytes read back from a partition
#[derive(Debug, Clone)]
pub struct RetrievedFile {
    pub data: Bytes,
    pub mime_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileDescription {
    pub filename: String,
    pub size: u64,
    pub extension: String,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub partition: Partition,
}
