//! Configuration module
//!
//! This module provides configuration structures for the upload service: server
//! settings, partition roots, size and count limits, and the MIME/extension allow-lists.
//! Everything is read once from the environment and then passed around immutably.

use std::env;
use std::path::{Path, PathBuf};

use crate::models::Partition;

// Common constants
const SERVER_PORT: u16 = 4000;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Fallback ceiling used when `MAX_FILE_SIZE` is missing, non-numeric, or zero.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
/// Fallback for `MAX_FILES` when missing or invalid.
pub const DEFAULT_MAX_FILES: usize = 5;

const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_PRIVATE_DIR: &str = "private";

const DEFAULT_ALLOWED_FILE_TYPES: &str = "image/jpeg,image/png,image/gif,image/webp,\
application/pdf,application/msword,\
application/vnd.openxmlformats-officedocument.wordprocessingml.document,text/plain";
const DEFAULT_ALLOWED_IMAGE_TYPES: &str =
    "image/jpeg,image/png,image/gif,image/webp,image/svg+xml";
const DEFAULT_ALLOWED_DOCUMENT_TYPES: &str = "application/pdf,application/msword,\
application/vnd.openxmlformats-officedocument.wordprocessingml.document,\
application/vnd.ms-excel,application/vnd.openxmlformats-officedocument.spreadsheetml.sheet,\
text/plain,text/csv";
const DEFAULT_ALLOWED_EXTENSIONS: &str = "jpg,jpeg,png,gif,webp,svg,pdf,doc,docx,xls,xlsx,txt,csv";

/// Which MIME allow-list an upload route filters against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowList {
    General,
    Images,
    Documents,
}

impl AllowList {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllowList::General => "general",
            AllowList::Images => "images",
            AllowList::Documents => "documents",
        }
    }
}

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
    pub log_format: String,
}

/// Upload pipeline configuration
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub upload_root: PathBuf,
    pub public_dir: PathBuf,
    pub private_dir: PathBuf,
    pub max_file_size_bytes: u64,
    pub max_files: usize,
    pub allowed_file_types: Vec<String>,
    pub allowed_image_types: Vec<String>,
    pub allowed_document_types: Vec<String>,
    pub allowed_extensions: Vec<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub upload: UploadConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = Config {
            base: BaseConfig::from_env()?,
            upload: UploadConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        self.upload.validate()
    }

    pub fn upload(&self) -> &UploadConfig {
        &self.upload
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn log_format(&self) -> &str {
        &self.base.log_format
    }
}

impl Default for BaseConfig {
    fn default() -> Self {
        BaseConfig {
            server_port: SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            log_format: "text".to_string(),
        }
    }
}

impl BaseConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        Ok(BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins: parse_list(env::var("CORS_ORIGINS").ok().as_deref(), "*", false),
            environment,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "text".to_string())
                .to_lowercase(),
        })
    }
}

impl UploadConfig {
    pub fn from_env() -> Self {
        let upload_root =
            PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()));
        let public_dir = upload_root.join(
            env::var("UPLOAD_PUBLIC_DIR").unwrap_or_else(|_| DEFAULT_PUBLIC_DIR.to_string()),
        );
        let private_dir = upload_root.join(
            env::var("UPLOAD_PRIVATE_DIR").unwrap_or_else(|_| DEFAULT_PRIVATE_DIR.to_string()),
        );

        UploadConfig {
            upload_root,
            public_dir,
            private_dir,
            max_file_size_bytes: parse_max_file_size(env::var("MAX_FILE_SIZE").ok().as_deref()),
            max_files: parse_max_files(env::var("MAX_FILES").ok().as_deref()),
            allowed_file_types: parse_list(
                env::var("ALLOWED_FILE_TYPES").ok().as_deref(),
                DEFAULT_ALLOWED_FILE_TYPES,
                true,
            ),
            allowed_image_types: parse_list(
                env::var("ALLOWED_IMAGE_TYPES").ok().as_deref(),
                DEFAULT_ALLOWED_IMAGE_TYPES,
                true,
            ),
            allowed_document_types: parse_list(
                env::var("ALLOWED_DOCUMENT_TYPES").ok().as_deref(),
                DEFAULT_ALLOWED_DOCUMENT_TYPES,
                true,
            ),
            allowed_extensions: parse_extensions(env::var("ALLOWED_EXTENSIONS").ok().as_deref()),
        }
    }

    /// Configuration rooted at `root` with the default limits and allow-lists.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let upload_root = root.into();
        UploadConfig {
            public_dir: upload_root.join(DEFAULT_PUBLIC_DIR),
            private_dir: upload_root.join(DEFAULT_PRIVATE_DIR),
            upload_root,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
            max_files: DEFAULT_MAX_FILES,
            allowed_file_types: parse_list(None, DEFAULT_ALLOWED_FILE_TYPES, true),
            allowed_image_types: parse_list(None, DEFAULT_ALLOWED_IMAGE_TYPES, true),
            allowed_document_types: parse_list(None, DEFAULT_ALLOWED_DOCUMENT_TYPES, true),
            allowed_extensions: parse_extensions(None),
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.public_dir == self.private_dir {
            return Err(anyhow::anyhow!(
                "UPLOAD_PUBLIC_DIR and UPLOAD_PRIVATE_DIR must point to different directories"
            ));
        }

        for (name, list) in [
            ("ALLOWED_FILE_TYPES", &self.allowed_file_types),
            ("ALLOWED_IMAGE_TYPES", &self.allowed_image_types),
            ("ALLOWED_DOCUMENT_TYPES", &self.allowed_document_types),
            ("ALLOWED_EXTENSIONS", &self.allowed_extensions),
        ] {
            if list.is_empty() {
                return Err(anyhow::anyhow!("{} must contain at least one entry", name));
            }
        }

        Ok(())
    }

    /// Root directory of a storage partition
    pub fn partition_root(&self, partition: Partition) -> &Path {
        match partition {
            Partition::Public => &self.public_dir,
            Partition::Private => &self.private_dir,
        }
    }

    pub fn allowed_types(&self, list: AllowList) -> &[String] {
        match list {
            AllowList::General => &self.allowed_file_types,
            AllowList::Images => &self.allowed_image_types,
            AllowList::Documents => &self.allowed_document_types,
        }
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }
}

/// Parse the per-file size ceiling. Anything that is not a positive integer falls back
/// to [`DEFAULT_MAX_FILE_SIZE`] so a bad value never rejects or admits everything.
pub fn parse_max_file_size(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

fn parse_max_files(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_MAX_FILES)
}

fn parse_list(raw: Option<&str>, default: &str, lowercase: bool) -> Vec<String> {
    raw.filter(|s| !s.trim().is_empty())
        .unwrap_or(default)
        .split(',')
        .map(|s| {
            if lowercase {
                s.trim().to_lowercase()
            } else {
                s.trim().to_string()
            }
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Extensions are stored without their leading dot.
fn parse_extensions(raw: Option<&str>) -> Vec<String> {
    parse_list(raw, DEFAULT_ALLOWED_EXTENSIONS, true)
        .into_iter()
        .map(|e| e.trim_start_matches('.').to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_max_file_size_falls_back_on_garbage() {
        assert_eq!(parse_max_file_size(Some("1048576")), 1_048_576);
        assert_eq!(parse_max_file_size(Some(" 2048 ")), 2048);
        assert_eq!(parse_max_file_size(Some("ten megabytes")), DEFAULT_MAX_FILE_SIZE);
        assert_eq!(parse_max_file_size(Some("-1")), DEFAULT_MAX_FILE_SIZE);
        assert_eq!(parse_max_file_size(Some("0")), DEFAULT_MAX_FILE_SIZE);
        assert_eq!(parse_max_file_size(None), DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_parse_max_files() {
        assert_eq!(parse_max_files(Some("3")), 3);
        assert_eq!(parse_max_files(Some("0")), DEFAULT_MAX_FILES);
        assert_eq!(parse_max_files(Some("many")), DEFAULT_MAX_FILES);
    }

    #[test]
    fn test_parse_list_normalizes_entries() {
        let list = parse_list(Some(" Image/JPEG, image/png ,,"), "text/plain", true);
        assert_eq!(list, vec!["image/jpeg", "image/png"]);

        let list = parse_list(Some("   "), "text/plain", true);
        assert_eq!(list, vec!["text/plain"]);
    }

    #[test]
    fn test_parse_extensions_strips_leading_dot() {
        let list = parse_extensions(Some(".JPG,png,.pdf"));
        assert_eq!(list, vec!["jpg", "png", "pdf"]);
    }

    #[test]
    fn test_with_root_partitions() {
        let config = UploadConfig::with_root("/srv/uploads");
        assert_eq!(
            config.partition_root(Partition::Public),
            Path::new("/srv/uploads/public")
        );
        assert_eq!(
            config.partition_root(Partition::Private),
            Path::new("/srv/uploads/private")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_shared_partition_dir() {
        let mut config = UploadConfig::with_root("/srv/uploads");
        config.private_dir = config.public_dir.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_allowed_types_by_list() {
        let config = UploadConfig::with_root("/tmp");
        assert!(config
            .allowed_types(AllowList::Images)
            .iter()
            .all(|t| t.starts_with("image/")));
        assert!(config
            .allowed_types(AllowList::Documents)
            .contains(&"application/pdf".to_string()));
        assert!(config
            .allowed_types(AllowList::General)
            .contains(&"image/jpeg".to_string()));
    }

    #[test]
    fn test_production_rejects_wildcard_cors() {
        let config = Config {
            base: BaseConfig {
                server_port: 4000,
                cors_origins: vec!["*".to_string()],
                environment: "production".to_string(),
                http_concurrency_limit: 100,
                log_format: "text".to_string(),
            },
            upload: UploadConfig::with_root("/tmp/uploads"),
        };
        assert!(config.is_production());
        assert!(config.validate().is_err());
    }
}
