//! Agency API Library
//!
//! This crate provides the HTTP upload gateway: multipart ingestion, allow-list
//! filters, error normalization, file routes, and application setup.

mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;
mod telemetry;
pub mod upload;

pub mod error;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
