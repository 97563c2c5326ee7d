//! File retrieval, description and deletion integration tests.
//!
//! Run with: `cargo test -p agency-api --test files_test`

mod helpers;

use helpers::{api_path, fixtures, setup_test_app, single_file_form, stored_filename, upload_ok};

#[tokio::test]
async fn test_retrieve_returns_bytes_with_derived_content_type() {
    let app = setup_test_app().await;
    let client = app.client();

    let payload = fixtures::fake_jpeg(2048);
    let body = upload_ok(
        client,
        "/uploads",
        // Declared type is ignored on the way out; the extension decides.
        single_file_form(payload.clone(), "My Photo.JPG", "image/jpeg"),
    )
    .await;
    let filename = stored_filename(&body);

    let response = client
        .get(&api_path(&format!("/files/public/{}", filename)))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "image/jpeg");
    assert_eq!(response.header("content-length"), "2048");
    assert_eq!(response.as_bytes().to_vec(), payload);
}

#[tokio::test]
async fn test_info_describes_stored_file() {
    let app = setup_test_app().await;
    let client = app.client();

    let body = upload_ok(
        client,
        "/uploads?visibility=private",
        single_file_form(b"a,b\n".to_vec(), "Totals 2024.csv", "text/csv"),
    )
    .await;
    let filename = stored_filename(&body);

    let response = client
        .get(&api_path(&format!("/files/private/{}/info", filename)))
        .await;

    assert_eq!(response.status_code(), 200);
    let info: serde_json::Value = response.json();
    assert_eq!(info["filename"], filename.as_str());
    assert_eq!(info["size"], 4);
    assert_eq!(info["extension"], "csv");
    assert_eq!(info["mimeType"], "text/csv");
    assert_eq!(info["partition"], "private");
    assert!(info["createdAt"].is_string());
    assert!(info["modifiedAt"].is_string());
}

#[tokio::test]
async fn test_partitions_are_isolated() {
    let app = setup_test_app().await;
    let client = app.client();

    let body = upload_ok(
        client,
        "/uploads?visibility=private",
        single_file_form(b"secret".to_vec(), "plan.txt", "text/plain"),
    )
    .await;
    let filename = stored_filename(&body);

    let response = client
        .get(&api_path(&format!("/files/public/{}", filename)))
        .await;
    assert_eq!(response.status_code(), 404);

    let response = client
        .get(&api_path(&format!("/files/private/{}", filename)))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("cache-control"), "private, no-store");
}

#[tokio::test]
async fn test_delete_then_not_found() {
    let app = setup_test_app().await;
    let client = app.client();

    let body = upload_ok(
        client,
        "/uploads",
        single_file_form(b"bye".to_vec(), "old.txt", "text/plain"),
    )
    .await;
    let filename = stored_filename(&body);
    let path = api_path(&format!("/files/public/{}", filename));

    let response = client.delete(&path).await;
    assert_eq!(response.status_code(), 204);
    assert!(!app.public_dir().join(&filename).exists());

    let response = client.get(&path).await;
    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");

    let response = client.delete(&path).await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_unknown_partition_is_bad_request() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&api_path("/files/shared/report-abcdefghijkl.pdf"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_unsanitized_filename_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&api_path("/files/public/..%2F..%2Fetc%2Fpasswd"))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = app
        .client()
        .get(&api_path("/files/public/.hidden"))
        .await;
    assert_eq!(response.status_code(), 400);
}
