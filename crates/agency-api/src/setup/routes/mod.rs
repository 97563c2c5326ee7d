//! Route configuration and setup.
//!
//! Upload and file routes live under the versioned prefix; health checks in [health](health).

mod health;

use crate::constants::{API_PREFIX, MULTIPART_OVERHEAD_BYTES};
use crate::handlers;
use crate::state::AppState;
use agency_core::Config;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let http_concurrency_limit = config.http_concurrency_limit().max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let body_limit = request_body_limit(config);
    tracing::info!(body_limit_bytes = body_limit, "Request body limit enabled");

    let app = api_routes()
        .merge(public_routes())
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Largest request the framework will buffer: every allowed file at full size plus
/// multipart framing. Per-file limits are enforced while streaming.
fn request_body_limit(config: &Config) -> usize {
    let upload = config.upload();
    usize::try_from(upload.max_file_size_bytes())
        .unwrap_or(usize::MAX)
        .saturating_mul(upload.max_files().max(1))
        .saturating_add(MULTIPART_OVERHEAD_BYTES)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        if config.is_production() {
            tracing::warn!("CORS configured to allow all origins - not recommended for production");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

fn api_routes() -> Router<Arc<AppState>> {
    let uploads = Router::new()
        .route("/uploads", post(handlers::upload::upload_file))
        .route("/uploads/images", post(handlers::upload::upload_image))
        .route("/uploads/documents", post(handlers::upload::upload_document))
        .route("/uploads/batch", post(handlers::upload::upload_batch));

    let files = Router::new()
        .route(
            "/files/{partition}/{filename}",
            get(handlers::files::get_file).delete(handlers::files::delete_file),
        )
        .route(
            "/files/{partition}/{filename}/info",
            get(handlers::files::get_file_info),
        );

    Router::new().nest(API_PREFIX, uploads.merge(files))
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}
