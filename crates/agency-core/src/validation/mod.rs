//! Input validation shared across crates
//!
//! Filename handling lives here because both the storage engine and the validators
//! need the exact same notion of "name" and "extension".

pub mod filename;
