//! Accessibility metadata extraction
//!
//! Extraction is split in two stages so that "never fails" holds by construction:
//!
//! 1. [`try_extract_native`] reads whatever embedded metadata the payload carries
//!    (EXIF for images, the Info dictionary for PDFs) and returns `None` when there is
//!    nothing usable.
//! 2. [`normalize`] fills every missing field from filename heuristics.
//!
//! Both stages are pure functions of their input.

mod document;
mod fallback;
mod image;

use agency_core::mime::{normalize_mime_type, top_level_type};
use agency_core::{AccessibilityMetadata, UploadedFile};

pub use fallback::{capitalize_first, humanize};

/// Metadata found embedded in the payload. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub alt_text: Option<String>,
    pub author: Option<String>,
}

impl RawMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.keywords.is_empty()
            && self.alt_text.is_none()
            && self.author.is_none()
    }

    /// `None` when no field carries any text
    fn non_empty(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

/// What the filename heuristics work from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackContext {
    /// Original base name, path and extension removed
    pub stem: String,
    /// MIME top-level type ("image", "text", ...), `None` when unknown
    pub type_token: Option<String>,
}

impl FallbackContext {
    pub fn new(original_name: &str, mime_type: Option<&str>) -> Self {
        Self {
            stem: fallback::stem_of(original_name).to_string(),
            type_token: mime_type.and_then(top_level_type),
        }
    }

    pub fn from_file(file: &UploadedFile) -> Self {
        Self::new(&file.original_name, file.mime_type.as_deref())
    }
}

/// Read embedded metadata from the payload, if the declared type has any
pub fn try_extract_native(file: &UploadedFile) -> Option<RawMetadata> {
    let mime = normalize_mime_type(file.mime_type.as_deref()?);

    let raw = if mime.starts_with("image/") {
        image::read_exif(&file.data)
    } else if mime == "application/pdf" {
        document::read_pdf_info(&file.data)
    } else {
        None
    };

    let raw = raw.and_then(RawMetadata::non_empty);
    if raw.is_none() {
        tracing::debug!(
            filename = %file.original_name,
            mime_type = %mime,
            "No embedded metadata, using filename heuristics"
        );
    }
    raw
}

/// Combine embedded metadata with the filename fallback. Never leaves a field empty.
pub fn normalize(raw: Option<RawMetadata>, context: &FallbackContext) -> AccessibilityMetadata {
    let raw = raw.unwrap_or_default();
    let defaults = fallback::defaults(context);

    let keywords = if raw.keywords.is_empty() {
        defaults.keywords
    } else {
        raw.keywords
    };

    AccessibilityMetadata {
        title: non_blank(raw.title).unwrap_or(defaults.title),
        description: non_blank(raw.description).unwrap_or(defaults.description),
        keywords,
        alt_text: non_blank(raw.alt_text).or(defaults.alt_text),
        author: non_blank(raw.author),
    }
}

/// Derive accessibility metadata for an upload
pub fn extract(file: &UploadedFile) -> AccessibilityMetadata {
    normalize(try_extract_native(file), &FallbackContext::from_file(file))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split a keyword field on `,` and `;`, dropping blanks and repeats
pub(crate) fn split_keywords(raw: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for keyword in raw.split([',', ';']).map(str::trim).filter(|k| !k.is_empty()) {
        if !keywords.iter().any(|k| k == keyword) {
            keywords.push(keyword.to_string());
        }
    }
    keywords
}
