//! Stored filename generation and parsing.
//!
//! Format: `{stem}-{token}{extension}` where `stem` is the sanitized original base name
//! (or `file` when nothing survives sanitization), `token` is random `[a-z0-9]` and
//! `extension` is the sanitized extension including its dot, possibly absent.

use agency_core::{sanitize_filename, split_extension};
use rand::Rng;

/// Length of the random component of a stored filename
pub const TOKEN_LENGTH: usize = 12;

/// Shortest token `parse_stored_filename` accepts
pub const MIN_TOKEN_LENGTH: usize = 8;

const TOKEN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

const FALLBACK_STEM: &str = "file";

/// Longest stored filename, in bytes. Most filesystems cap a path component at 255.
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Components of a stored filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredNameParts {
    pub stem: String,
    pub token: String,
    /// Includes the leading dot
    pub extension: Option<String>,
}

/// Generate a fresh random token
pub fn random_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LENGTH)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// Build the on-disk name for an upload.
///
/// The result is derived only from the sanitized `original_name` and a new token, and
/// never exceeds [`MAX_FILENAME_LENGTH`] bytes: the stem is shortened first, then the
/// extension if it alone would not fit.
pub fn generate_stored_filename(original_name: &str) -> String {
    let sanitized = sanitize_filename(original_name);
    let (stem, extension) = split_extension(&sanitized);

    let suffix_len = TOKEN_LENGTH + 1;
    let extension = extension.map(|ext| {
        truncate_at_char_boundary(ext, MAX_FILENAME_LENGTH - suffix_len - FALLBACK_STEM.len())
    });

    let stem_budget = MAX_FILENAME_LENGTH - suffix_len - extension.map_or(0, str::len);
    let stem = if stem.len() > stem_budget {
        truncate_at_char_boundary(stem, stem_budget).trim_end_matches('-')
    } else {
        stem
    };
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };

    format!("{}-{}{}", stem, random_token(), extension.unwrap_or(""))
}

fn truncate_at_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Split a stored filename back into its components.
///
/// Returns `None` if the name does not follow the stored filename format.
pub fn parse_stored_filename(filename: &str) -> Option<StoredNameParts> {
    let (base, extension) = split_extension(filename);
    let (stem, token) = base.rsplit_once('-')?;

    if stem.is_empty() || token.len() < MIN_TOKEN_LENGTH {
        return None;
    }
    if !token
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    {
        return None;
    }

    Some(StoredNameParts {
        stem: stem.to_string(),
        token: token.to_string(),
        extension: extension.map(str::to_string),
    })
}
