//! Agency Storage Library
//!
//! This crate provides the storage abstraction for uploaded files and its local
//! filesystem implementation.
//!
//! # Partitions and naming
//!
//! Files live in one of two partition roots (public, private). On-disk names are
//! always generated by the engine:
//!
//! - `{sanitized-stem}-{token}{extension}`, e.g. `my-photo-k3v9x0a1b2c4.jpg`
//!
//! The token is 12 characters drawn from `[a-z0-9]`. Callers only ever refer back to a
//! file by a name the engine handed out, so any name that would be altered by the
//! sanitizer is rejected before a path is built.

pub mod factory;
pub mod local;
pub mod naming;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::PartitionedLocalStorage;
pub use naming::{
    generate_stored_filename, parse_stored_filename, random_token, StoredNameParts,
    MAX_FILENAME_LENGTH,
};
pub use traits::{FileStorage, StorageError, StorageResult};
