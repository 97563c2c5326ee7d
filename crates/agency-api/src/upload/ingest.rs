//! Multipart ingestion
//!
//! Reads upload fields into memory while enforcing the per-file size ceiling and the
//! per-request file count. Plain form values under other names are ignored; file parts
//! under other names are rejected.

use agency_core::{UploadConfig, UploadedFile};
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use bytes::BytesMut;

/// Conditions raised while reading a multipart body
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("File exceeds the maximum size of {max} bytes")]
    FileTooLarge { max: u64 },

    #[error("Too many files: at most {max} allowed")]
    TooManyFiles { max: usize },

    #[error("Unexpected file field '{0}'")]
    UnexpectedField(String),

    #[error("No file provided in field '{0}'")]
    MissingFile(String),

    #[error("Failed to read multipart body: {0}")]
    Multipart(#[from] MultipartError),
}

#[derive(Debug, Clone, Copy)]
pub struct IngestLimits {
    pub max_file_size: u64,
    pub max_files: usize,
}

impl IngestLimits {
    pub fn from_config(config: &UploadConfig) -> Self {
        Self {
            max_file_size: config.max_file_size_bytes(),
            max_files: config.max_files(),
        }
    }

    /// Same size ceiling, exactly one file
    pub fn single(self) -> Self {
        Self {
            max_files: 1,
            ..self
        }
    }
}

/// Read every file sent under `field_name`
pub async fn read_files(
    multipart: &mut Multipart,
    field_name: &str,
    limits: IngestLimits,
) -> Result<Vec<UploadedFile>, IngestError> {
    let mut files = Vec::new();

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);

        if name != field_name {
            if file_name.is_some() {
                return Err(IngestError::UnexpectedField(name));
            }
            continue;
        }

        let Some(file_name) = file_name else {
            return Err(IngestError::MissingFile(name));
        };

        if files.len() >= limits.max_files {
            return Err(IngestError::TooManyFiles {
                max: limits.max_files,
            });
        }

        let content_type = field.content_type().map(str::to_string);

        let mut data = BytesMut::new();
        while let Some(chunk) = field.chunk().await? {
            if (data.len() + chunk.len()) as u64 > limits.max_file_size {
                return Err(IngestError::FileTooLarge {
                    max: limits.max_file_size,
                });
            }
            data.extend_from_slice(&chunk);
        }

        tracing::debug!(
            field = %name,
            filename = %file_name,
            content_type = ?content_type,
            size_bytes = data.len(),
            "Received upload part"
        );

        files.push(UploadedFile::new(file_name, content_type, data.freeze()));
    }

    if files.is_empty() {
        return Err(IngestError::MissingFile(field_name.to_string()));
    }

    Ok(files)
}

/// Read exactly one file sent under `field_name`
pub async fn read_single(
    multipart: &mut Multipart,
    field_name: &str,
    limits: IngestLimits,
) -> Result<UploadedFile, IngestError> {
    let mut files = read_files(multipart, field_name, limits.single()).await?;
    files
        .pop()
        .ok_or_else(|| IngestError::MissingFile(field_name.to_string()))
}
