use crate::naming::{generate_stored_filename, random_token};
use crate::traits::{FileStorage, StorageError, StorageResult};
use agency_core::config::UploadConfig;
use agency_core::mime::mime_type_for_extension;
use agency_core::{
    sanitize_filename, split_extension, FileDescription, Partition, RetrievedFile, StoredFile,
    UploadedFile,
};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage with separate public and private roots
#[derive(Clone)]
pub struct PartitionedLocalStorage {
    public_root: PathBuf,
    private_root: PathBuf,
}

impl PartitionedLocalStorage {
    /// Create a new PartitionedLocalStorage instance
    ///
    /// No directory is created here; partition roots are created on first store or by
    /// `ensure_partitions`.
    pub fn new(public_root: impl Into<PathBuf>, private_root: impl Into<PathBuf>) -> Self {
        PartitionedLocalStorage {
            public_root: public_root.into(),
            private_root: private_root.into(),
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(
            config.partition_root(Partition::Public),
            config.partition_root(Partition::Private),
        )
    }

    /// Create both partition roots up front
    pub async fn ensure_partitions(&self) -> StorageResult<()> {
        for root in [&self.public_root, &self.private_root] {
            fs::create_dir_all(root).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create storage directory {}: {}",
                    root.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    fn root(&self, partition: Partition) -> &Path {
        match partition {
            Partition::Public => &self.public_root,
            Partition::Private => &self.private_root,
        }
    }

    /// Convert a caller-supplied filename to a path inside the partition root.
    ///
    /// Only names that the sanitizer leaves untouched are accepted, so the result
    /// can never contain a separator or a parent reference.
    fn filename_to_path(&self, filename: &str, partition: Partition) -> StorageResult<PathBuf> {
        if filename.is_empty() || filename.starts_with('.') || sanitize_filename(filename) != filename
        {
            return Err(StorageError::InvalidKey(format!(
                "Filename is not a stored filename: {}",
                filename
            )));
        }

        Ok(self.root(partition).join(filename))
    }
}

/// Write to `tmp_path`, sync, then rename into `final_path`
async fn write_then_rename(tmp_path: &Path, final_path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(tmp_path).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(tmp_path, final_path).await
}

fn not_found_or(err: io::Error, filename: &str, message: String) -> StorageError {
    if err.kind() == io::ErrorKind::NotFound {
        StorageError::NotFound(filename.to_string())
    } else {
        StorageError::failure(message, err)
    }
}

/// Stat `path`, treating anything that is not a regular file as absent
async fn file_metadata(path: &Path, filename: &str) -> StorageResult<std::fs::Metadata> {
    let meta = fs::metadata(path).await.map_err(|e| {
        not_found_or(e, filename, format!("Failed to stat file {}", filename))
    })?;

    if !meta.is_file() {
        return Err(StorageError::NotFound(filename.to_string()));
    }
    Ok(meta)
}

fn extension_of(filename: &str) -> String {
    split_extension(filename)
        .1
        .map(|ext| ext.trim_start_matches('.').to_string())
        .unwrap_or_default()
}

#[async_trait]
impl FileStorage for PartitionedLocalStorage {
    async fn store(
        &self,
        file: Option<&UploadedFile>,
        partition: Partition,
    ) -> StorageResult<StoredFile> {
        let file = file.ok_or_else(|| StorageError::InvalidInput("No file provided".to_string()))?;
        if file.original_name.trim().is_empty() {
            return Err(StorageError::InvalidInput(
                "File has no original name".to_string(),
            ));
        }

        let root = self.root(partition);
        let filename = generate_stored_filename(&file.original_name);
        let final_path = root.join(&filename);
        let tmp_path = root.join(format!(".upload-{}.tmp", random_token()));
        let size = file.data.len() as u64;

        let start = std::time::Instant::now();

        fs::create_dir_all(root).await.map_err(|e| {
            StorageError::failure(
                format!("Failed to create partition directory {}", root.display()),
                e,
            )
        })?;

        if let Err(e) = write_then_rename(&tmp_path, &final_path, &file.data).await {
            if let Err(cleanup) = fs::remove_file(&tmp_path).await {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(
                        path = %tmp_path.display(),
                        error = %cleanup,
                        "Failed to remove temporary upload file"
                    );
                }
            }
            tracing::error!(
                path = %final_path.display(),
                partition = %partition,
                error = %e,
                "Local storage store failed"
            );
            return Err(StorageError::failure(
                format!("Failed to write file {}", filename),
                e,
            ));
        }

        let extension = extension_of(&filename);

        tracing::info!(
            path = %final_path.display(),
            filename = %filename,
            partition = %partition,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage store successful"
        );

        Ok(StoredFile {
            mime_type: mime_type_for_extension(&extension).to_string(),
            filename,
            partition,
            size_bytes: size,
        })
    }

    async fn retrieve(&self, filename: &str, partition: Partition) -> StorageResult<RetrievedFile> {
        let path = self.filename_to_path(filename, partition)?;
        let start = std::time::Instant::now();

        file_metadata(&path, filename).await?;
        let data = fs::read(&path).await.map_err(|e| {
            not_found_or(e, filename, format!("Failed to read file {}", filename))
        })?;

        let size = data.len() as u64;

        tracing::info!(
            path = %path.display(),
            partition = %partition,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage retrieve successful"
        );

        Ok(RetrievedFile {
            data: Bytes::from(data),
            mime_type: mime_type_for_extension(&extension_of(filename)).to_string(),
            size_bytes: size,
        })
    }

    async fn remove(&self, filename: &str, partition: Partition) -> StorageResult<()> {
        let path = self.filename_to_path(filename, partition)?;
        let start = std::time::Instant::now();

        file_metadata(&path, filename).await?;
        fs::remove_file(&path).await.map_err(|e| {
            not_found_or(e, filename, format!("Failed to delete file {}", filename))
        })?;

        tracing::info!(
            path = %path.display(),
            partition = %partition,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage remove successful"
        );

        Ok(())
    }

    async fn describe(
        &self,
        filename: &str,
        partition: Partition,
    ) -> StorageResult<FileDescription> {
        let path = self.filename_to_path(filename, partition)?;

        let meta = file_metadata(&path, filename).await?;

        let modified = meta
            .modified()
            .map_err(|e| StorageError::failure("Modification time unavailable", e))?;
        // Not every filesystem records a birth time
        let created = meta.created().unwrap_or(modified);

        let extension = extension_of(filename);

        Ok(FileDescription {
            filename: filename.to_string(),
            size: meta.len(),
            mime_type: mime_type_for_extension(&extension).to_string(),
            extension,
            created_at: DateTime::<Utc>::from(created),
            modified_at: DateTime::<Utc>::from(modified),
            partition,
        })
    }

    async fn exists(&self, filename: &str, partition: Partition) -> StorageResult<bool> {
        let path = self.filename_to_path(filename, partition)?;
        fs::try_exists(&path).await.map_err(|e| {
            StorageError::failure(format!("Failed to check file {}", filename), e)
        })
    }

    fn backend_type(&self) -> &'static str {
        "local"
    }
}
