//! Domain models for the upload pipeline

mod accessibility;
mod file;
mod partition;

pub use accessibility::AccessibilityMetadata;
pub use file::{FileDescription, RetrievedFile, StoredFile, UploadedFile};
pub use partition::Partition;
