//! Extension to MIME type table
//!
//! Stored files carry no client metadata, so the content type served back is always
//! re-derived from the stored extension.

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content types a given extension may legitimately be uploaded with.
///
/// The first entry is the canonical type. Returns `None` for extensions we don't know.
pub fn expected_content_types(extension: &str) -> Option<&'static [&'static str]> {
    let extension = extension.trim_start_matches('.').to_ascii_lowercase();
    let types: &'static [&'static str] = match extension.as_str() {
        // Images
        "jpg" | "jpeg" => &["image/jpeg"],
        "png" => &["image/png"],
        "gif" => &["image/gif"],
        "webp" => &["image/webp"],
        "svg" => &["image/svg+xml"],
        "bmp" => &["image/bmp"],
        "tif" | "tiff" => &["image/tiff"],
        "ico" => &["image/x-icon", "image/vnd.microsoft.icon"],
        // Documents
        "pdf" => &["application/pdf"],
        "doc" => &["application/msword"],
        "docx" => &["application/vnd.openxmlformats-officedocument.wordprocessingml.document"],
        "xls" => &["application/vnd.ms-excel"],
        "xlsx" => &["application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"],
        "ppt" => &["application/vnd.ms-powerpoint"],
        "pptx" => &["application/vnd.openxmlformats-officedocument.presentationml.presentation"],
        "odt" => &["application/vnd.oasis.opendocument.text"],
        "rtf" => &["application/rtf", "text/rtf"],
        "txt" => &["text/plain"],
        "md" => &["text/markdown", "text/plain"],
        "csv" => &["text/csv", "application/csv"],
        "json" => &["application/json"],
        "zip" => &["application/zip", "application/x-zip-compressed"],
        // Audio / video
        "mp3" => &["audio/mpeg", "audio/mp3"],
        "wav" => &["audio/wav", "audio/wave", "audio/x-wav"],
        "mp4" => &["video/mp4"],
        "webm" => &["video/webm"],
        "mov" => &["video/quicktime"],
        _ => return None,
    };
    Some(types)
}

/// Canonical MIME type for an extension, `application/octet-stream` when unknown
pub fn mime_type_for_extension(extension: &str) -> &'static str {
    expected_content_types(extension)
        .and_then(|types| types.first().copied())
        .unwrap_or(OCTET_STREAM)
}

/// Normalize MIME type by stripping parameters and lower-casing
/// (e.g. "Image/JPEG; charset=utf-8" -> "image/jpeg").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase()
}

/// Top-level type of a MIME string ("image/png" -> "image"), `None` when malformed
pub fn top_level_type(content_type: &str) -> Option<String> {
    let normalized = normalize_mime_type(content_type);
    let (top, sub) = normalized.split_once('/')?;
    if top.is_empty() || sub.is_empty() {
        return None;
    }
    Some(top.to_string())
}
