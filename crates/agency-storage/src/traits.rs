//! Storage abstraction trait
//!
//! This module defines the FileStorage trait that storage backends implement.

use agency_core::{
    AppError, FileDescription, Partition, RetrievedFile, StoredFile, UploadedFile,
};
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Storage failure: {message}")]
    StorageFailure {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    pub(crate) fn failure(message: impl Into<String>, source: std::io::Error) -> Self {
        StorageError::StorageFailure {
            message: message.into(),
            source,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidInput(msg) | StorageError::InvalidKey(msg) => {
                AppError::InvalidInput(msg)
            }
            StorageError::NotFound(name) => AppError::NotFound(format!("File not found: {}", name)),
            StorageError::StorageFailure { message, source } => {
                AppError::StorageFailure(format!("{}: {}", message, source))
            }
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        }
    }
}

/// Storage abstraction trait
///
/// Every operation is scoped to one partition. Filenames passed to `retrieve`,
/// `remove`, `describe` and `exists` must be names previously returned by `store`;
/// anything else is rejected with `InvalidKey` before the filesystem is touched.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persist an upload under a freshly generated name.
    ///
    /// `None` (or a blank original name) fails with `InvalidInput` without creating
    /// any directory.
    async fn store(
        &self,
        file: Option<&UploadedFile>,
        partition: Partition,
    ) -> StorageResult<StoredFile>;

    /// Read a stored file back. The MIME type is re-derived from the extension.
    async fn retrieve(&self, filename: &str, partition: Partition) -> StorageResult<RetrievedFile>;

    /// Delete a stored file
    async fn remove(&self, filename: &str, partition: Partition) -> StorageResult<()>;

    /// Size, extension, MIME type and timestamps of a stored file
    async fn describe(
        &self,
        filename: &str,
        partition: Partition,
    ) -> StorageResult<FileDescription>;

    /// Check if a file exists
    async fn exists(&self, filename: &str, partition: Partition) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> &'static str;
}
