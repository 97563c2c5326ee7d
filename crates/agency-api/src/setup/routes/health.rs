//! Health check handlers and response types.

use crate::state::AppState;
use agency_core::Partition;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub storage: String,
    pub backend: &'static str,
    pub public_partition: String,
    pub private_partition: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

async fn check_partition(state: &AppState, partition: Partition) -> String {
    let root = state.config.upload().partition_root(partition);
    match tokio::time::timeout(TIMEOUT, tokio::fs::metadata(root)).await {
        Ok(Ok(meta)) if meta.is_dir() => "healthy".to_string(),
        Ok(Ok(_)) => "unhealthy: not a directory".to_string(),
        Ok(Err(e)) => format!("unhealthy: {}", e),
        Err(_) => "timeout".to_string(),
    }
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Storage backend and both partition roots.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let storage = match tokio::time::timeout(
        TIMEOUT,
        state.storage.exists("health-check", Partition::Public),
    )
    .await
    {
        Ok(Ok(_)) => "healthy".to_string(),
        Ok(Err(e)) => format!("degraded: {}", e),
        Err(_) => "timeout".to_string(),
    };

    let public_partition = check_partition(&state, Partition::Public).await;
    let private_partition = check_partition(&state, Partition::Private).await;

    let overall_healthy = storage == "healthy"
        && public_partition == "healthy"
        && private_partition == "healthy";

    if !overall_healthy {
        tracing::warn!(
            storage = %storage,
            public_partition = %public_partition,
            private_partition = %private_partition,
            "Health check failed"
        );
    }

    let response = HealthCheckResponse {
        status: if overall_healthy { "healthy" } else { "unhealthy" }.to_string(),
        storage,
        backend: state.storage.backend_type(),
        public_partition,
        private_partition,
        timestamp: chrono::Utc::now(),
    };

    let status_code = if overall_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
