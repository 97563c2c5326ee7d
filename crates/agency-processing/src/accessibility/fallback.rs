//! Filename heuristics used when a payload carries no usable metadata

use agency_core::{split_extension, AccessibilityMetadata};

use super::FallbackContext;

const UNTITLED: &str = "Untitled";
const DEFAULT_ALT_TEXT: &str = "Image";
const UNKNOWN_TYPE: &str = "file";

/// Base name of a possibly path-qualified filename, without its extension
pub(crate) fn stem_of(name: &str) -> &str {
    let segment = name.rsplit(['/', '\\']).next().unwrap_or(name);
    split_extension(segment).0
}

/// Upper-case the first character, leave the rest alone
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn a filename stem into readable words.
///
/// `_` and `-` become spaces, camel-case boundaries are split, everything is
/// lower-cased and whitespace collapsed. May return an empty string.
pub fn humanize(stem: &str) -> String {
    let mut spaced = String::with_capacity(stem.len() + 8);
    let mut prev: Option<char> = None;

    for c in stem.chars() {
        let c = if c == '_' || c == '-' { ' ' } else { c };
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            spaced.push(' ');
        }
        spaced.push(c);
        prev = Some(c);
    }

    spaced
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn defaults(context: &FallbackContext) -> AccessibilityMetadata {
    let title = capitalize_first(context.stem.trim());
    let title = if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title
    };

    let type_token = context
        .type_token
        .clone()
        .unwrap_or_else(|| UNKNOWN_TYPE.to_string());

    let alt_text = humanize(&context.stem);
    let alt_text = if alt_text.is_empty() {
        DEFAULT_ALT_TEXT.to_string()
    } else {
        alt_text
    };

    AccessibilityMetadata {
        title,
        description: format!("{} file", capitalize_first(&type_token)),
        keywords: vec![type_token],
        alt_text: Some(alt_text),
        author: None,
    }
}
