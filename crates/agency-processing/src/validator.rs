use agency_core::config::{AllowList, UploadConfig, DEFAULT_MAX_FILE_SIZE};
use agency_core::mime::{expected_content_types, normalize_mime_type};
use agency_core::{split_extension, AppError, UploadedFile};
use std::fmt;

/// A single failed check for an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(
        "Invalid file type: {} (allowed: {})",
        .content_type.as_deref().unwrap_or("missing"),
        .allowed.join(", ")
    )]
    InvalidContentType {
        content_type: Option<String>,
        allowed: Vec<String>,
    },

    #[error("Invalid file extension: {extension} (allowed: {})", .allowed.join(", "))]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("File size unknown")]
    MissingSize,
}

/// Outcome of running every check against one file.
///
/// Checks never short-circuit: every failure is kept so it can be reported on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationReport {}

impl From<ValidationReport> for AppError {
    /// A type rejection takes precedence so the client always learns which types are
    /// accepted. Size-only failures surface as `PayloadTooLarge`.
    fn from(report: ValidationReport) -> Self {
        let message = report.to_string();

        let allowed_types = report.errors.iter().find_map(|e| match e {
            ValidationError::InvalidContentType { allowed, .. } => Some(allowed.clone()),
            _ => None,
        });
        if let Some(allowed) = allowed_types {
            return AppError::ValidationFailed {
                message: format!(
                    "Invalid file type. Allowed types: {}. {}",
                    allowed.join(", "),
                    message
                ),
                allowed,
            };
        }

        let allowed_extensions = report.errors.iter().find_map(|e| match e {
            ValidationError::InvalidExtension { allowed, .. } => Some(allowed.clone()),
            _ => None,
        });
        if let Some(allowed) = allowed_extensions {
            return AppError::ValidationFailed { message, allowed };
        }

        match report.errors.first() {
            Some(ValidationError::FileTooLarge { .. }) => AppError::PayloadTooLarge(message),
            _ => AppError::InvalidInput(message),
        }
    }
}

/// Upload file validator
///
/// Three independent predicates over an upload: declared MIME type, extension of the
/// original name, and size. Allow-list entries are compared case-insensitively.
#[derive(Debug, Clone)]
pub struct FileValidator {
    max_file_size: u64,
    allowed_types: Vec<String>,
    allowed_extensions: Vec<String>,
}

impl FileValidator {
    /// A zero maximum is treated as misconfiguration and replaced by the default.
    pub fn new(max_file_size: u64, allowed_types: Vec<String>, allowed_extensions: Vec<String>) -> Self {
        let max_file_size = if max_file_size == 0 {
            tracing::warn!(
                default = DEFAULT_MAX_FILE_SIZE,
                "Maximum file size of 0 is invalid, using default"
            );
            DEFAULT_MAX_FILE_SIZE
        } else {
            max_file_size
        };

        Self {
            max_file_size,
            allowed_types: allowed_types
                .into_iter()
                .map(|t| normalize_mime_type(&t))
                .filter(|t| !t.is_empty())
                .collect(),
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Validator for one of the configured allow-lists
    pub fn from_config(config: &UploadConfig, list: AllowList) -> Self {
        Self::new(
            config.max_file_size_bytes(),
            config.allowed_types(list).to_vec(),
            config.allowed_extensions().to_vec(),
        )
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn allowed_types(&self) -> &[String] {
        &self.allowed_types
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// True iff the declared MIME type is present and allow-listed
    pub fn is_valid_type(&self, file: &UploadedFile) -> bool {
        match file.mime_type.as_deref() {
            Some(mime) => {
                let normalized = normalize_mime_type(mime);
                self.allowed_types.iter().any(|t| *t == normalized)
            }
            None => false,
        }
    }

    /// True iff the original name has an allow-listed extension
    pub fn is_valid_extension(&self, file: &UploadedFile) -> bool {
        match extension_of(&file.original_name) {
            Some(extension) => self.allowed_extensions.contains(&extension),
            None => false,
        }
    }

    /// True iff the size is known and within the configured maximum
    pub fn is_valid_size(&self, file: &UploadedFile) -> bool {
        matches!(file.size_bytes, Some(size) if size <= self.max_file_size)
    }

    /// Run all three checks, keeping every failure
    pub fn check(&self, file: &UploadedFile) -> ValidationReport {
        let mut errors = Vec::new();

        if !self.is_valid_type(file) {
            errors.push(ValidationError::InvalidContentType {
                content_type: file.mime_type.clone(),
                allowed: self.allowed_types.clone(),
            });
        }

        if !self.is_valid_extension(file) {
            errors.push(ValidationError::InvalidExtension {
                extension: extension_of(&file.original_name).unwrap_or_default(),
                allowed: self.allowed_extensions.clone(),
            });
        }

        if !self.is_valid_size(file) {
            errors.push(match file.size_bytes {
                Some(size) => ValidationError::FileTooLarge {
                    size,
                    max: self.max_file_size,
                },
                None => ValidationError::MissingSize,
            });
        }

        ValidationReport { errors }
    }
}

fn extension_of(name: &str) -> Option<String> {
    split_extension(name)
        .1
        .map(|ext| ext.trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Whether the declared content type is plausible for the name's extension.
///
/// Unknown extensions are not cross-checked and pass.
pub fn extension_matches_content_type(name: &str, content_type: &str) -> bool {
    let Some(extension) = extension_of(name) else {
        return true;
    };
    let Some(expected) = expected_content_types(&extension) else {
        tracing::debug!(
            extension = %extension,
            content_type = %content_type,
            "Unknown extension, skipping Content-Type/extension cross-validation"
        );
        return true;
    };

    let normalized = normalize_mime_type(content_type);
    expected.iter().any(|ct| *ct == normalized)
}
