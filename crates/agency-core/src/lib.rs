//! Agency Core Library
//!
//! This crate provides the domain models, error types, configuration, and filename
//! validation shared by the storage, processing, and API crates.

pub mod config;
pub mod error;
pub mod mime;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{AllowList, BaseConfig, Config, UploadConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    AccessibilityMetadata, FileDescription, Partition, RetrievedFile, StoredFile, UploadedFile,
};
pub use validation::filename::{sanitize_filename, split_extension};
