//! Test helpers: build the router over temporary partitions for integration tests.
//!
//! Run from workspace root: `cargo test -p agency-api`.

#![allow(dead_code)]

pub mod fixtures;

use agency_api::constants;
use agency_api::setup::build_app;
use agency_core::{BaseConfig, Config, UploadConfig};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use std::path::PathBuf;
use tempfile::TempDir;

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus the temporary upload root it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub root: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn public_dir(&self) -> PathBuf {
        self.root.join("public")
    }

    pub fn private_dir(&self) -> PathBuf {
        self.root.join("private")
    }
}

/// Setup test app with default limits and allow-lists.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup test app after letting the caller adjust the upload configuration.
pub async fn setup_test_app_with(configure: impl FnOnce(&mut UploadConfig)) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().to_path_buf();

    let mut upload = UploadConfig::with_root(&root);
    configure(&mut upload);

    let config = Config {
        base: BaseConfig::default(),
        upload,
    };

    let (_state, app) = build_app(config).await.expect("Failed to build app");
    let server =
        TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        root,
        _temp_dir: temp_dir,
    }
}

/// File part with a name and declared Content-Type.
pub fn file_part(data: Vec<u8>, file_name: &str, mime_type: &str) -> Part {
    Part::bytes(bytes::Bytes::from(data))
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string())
}

/// Form with a single `file` part.
pub fn single_file_form(data: Vec<u8>, file_name: &str, mime_type: &str) -> MultipartForm {
    MultipartForm::new().add_part("file", file_part(data, file_name, mime_type))
}

/// Upload through `path` and return the JSON body, asserting 201.
pub async fn upload_ok(client: &TestServer, path: &str, form: MultipartForm) -> serde_json::Value {
    let response = client.post(&api_path(path)).multipart(form).await;
    assert_eq!(response.status_code(), 201, "body: {}", response.text());
    response.json()
}

/// Stored filename of an upload response.
pub fn stored_filename(body: &serde_json::Value) -> String {
    body["file"]["filename"]
        .as_str()
        .expect("Expected 'file.filename' in upload response")
        .to_string()
}

/// `{stem}-{12 chars of [a-z0-9]}{extension}`
pub fn assert_generated_name(name: &str, stem: &str, extension: &str) {
    let token = name
        .strip_prefix(&format!("{}-", stem))
        .and_then(|rest| rest.strip_suffix(extension))
        .unwrap_or_else(|| panic!("'{}' is not '{}-<token>{}'", name, stem, extension));
    assert_eq!(token.len(), 12, "token in '{}'", name);
    assert!(
        token
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
        "token in '{}'",
        name
    );
}
