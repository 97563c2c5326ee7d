//! Agency Processing Library
//!
//! This crate holds the pure, per-file steps of the upload pipeline: allow-list
//! validation and accessibility metadata extraction. Nothing here touches the
//! filesystem or shares state between calls.

pub mod accessibility;
pub mod validator;

pub use accessibility::{extract, normalize, try_extract_native, FallbackContext, RawMetadata};
pub use validator::{
    extension_matches_content_type, FileValidator, ValidationError, ValidationReport,
};
