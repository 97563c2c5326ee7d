//! OpenAPI documentation, served at `/api/openapi.json` and rendered at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::upload;
use agency_core::models;

/// The OpenAPI spec for every upload and file route.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agency Upload API",
        version = "0.1.0",
        description = "File upload pipeline for agency sites: allow-list filtering, public and private storage partitions, and accessibility metadata for every upload. All endpoints are versioned under /api/v0/."
    ),
    paths(
        // Uploads
        handlers::upload::upload_file,
        handlers::upload::upload_image,
        handlers::upload::upload_document,
        handlers::upload::upload_batch,
        // Files
        handlers::files::get_file,
        handlers::files::get_file_info,
        handlers::files::delete_file,
    ),
    components(
        schemas(
            models::StoredFile,
            models::FileDescription,
            models::AccessibilityMetadata,
            models::Partition,
            upload::UploadResponse,
            handlers::upload::BatchUploadResponse,
            handlers::upload::BatchItemResult,
            handlers::upload::BatchItemStatus,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "uploads", description = "Single, image, document and batch uploads"),
        (name = "files", description = "Retrieve, describe and delete stored files")
    )
)]
pub struct ApiDoc;
