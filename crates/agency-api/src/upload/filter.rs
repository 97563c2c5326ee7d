//! Accept/reject filter applied to each upload before it reaches storage

use agency_core::{AllowList, AppError, UploadConfig, UploadedFile};
use agency_processing::{extension_matches_content_type, FileValidator};

/// Allow-list filter bound to one upload route
#[derive(Debug, Clone)]
pub struct UploadFilter {
    list: AllowList,
    validator: FileValidator,
}

impl UploadFilter {
    pub fn new(list: AllowList, validator: FileValidator) -> Self {
        Self { list, validator }
    }

    pub fn for_kind(config: &UploadConfig, list: AllowList) -> Self {
        Self::new(list, FileValidator::from_config(config, list))
    }

    pub fn list(&self) -> AllowList {
        self.list
    }

    pub fn validator(&self) -> &FileValidator {
        &self.validator
    }

    /// Accept the file or explain why it was rejected.
    ///
    /// A Content-Type that does not fit the extension is only logged.
    pub fn accept(&self, file: &UploadedFile) -> Result<(), AppError> {
        if let Err(report) = self.validator.check(file).into_result() {
            tracing::debug!(
                allow_list = self.list.as_str(),
                filename = %file.original_name,
                content_type = ?file.mime_type,
                reason = %report,
                "Upload rejected"
            );
            return Err(report.into());
        }

        if let Some(content_type) = file.mime_type.as_deref() {
            if !extension_matches_content_type(&file.original_name, content_type) {
                tracing::warn!(
                    filename = %file.original_name,
                    content_type = %content_type,
                    "Content-Type does not match file extension"
                );
            }
        }

        Ok(())
    }
}
