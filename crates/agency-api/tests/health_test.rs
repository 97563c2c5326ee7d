//! Health and documentation route tests.

mod helpers;

use helpers::setup_test_app;

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app().await;

    let response = app.client().get("/live").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_health_reports_partitions() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "local");
    assert_eq!(body["public_partition"], "healthy");
    assert_eq!(body["private_partition"], "healthy");
}

#[tokio::test]
async fn test_health_degrades_when_partition_disappears() {
    let app = setup_test_app().await;
    std::fs::remove_dir_all(app.private_dir()).unwrap();

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 503);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["public_partition"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["paths"]["/api/v0/uploads"].is_object());
    assert!(body["paths"]["/api/v0/files/{partition}/{filename}"].is_object());
}
