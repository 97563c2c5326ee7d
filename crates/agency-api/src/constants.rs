//! API constants
//!
//! Route prefix and the multipart field names clients must use.

/// Versioned API prefix
pub const API_PREFIX: &str = "/api/v0";

/// Multipart field carrying the file on single-file upload routes
pub const SINGLE_FILE_FIELD: &str = "file";

/// Multipart field carrying the files on the batch upload route
pub const BATCH_FILES_FIELD: &str = "files";

/// Headroom on top of the file payloads for multipart boundaries and part headers
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
