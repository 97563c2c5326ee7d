//! Filename sanitization
//!
//! Turns an untrusted, client-supplied filename into a fragment that is safe to use as
//! part of an on-disk name. The output alphabet is `[a-z0-9.-]`, with at most one dot
//! (the one introducing the extension).

/// Strip any directory component, keeping the final segment only.
fn final_segment(name: &str) -> &str {
    name.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(name)
}

/// Split a name at its last dot.
///
/// Returns the base and, when present, the extension including its leading dot. A name
/// with a single leading dot (`.env`) is treated as all extension so sanitizing stays
/// idempotent once the base has been stripped away.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) => (&name[..idx], Some(&name[idx..])),
        None => (name, None),
    }
}

/// Sanitize a filename for storage.
///
/// - path components are dropped (`../../etc/passwd` -> `passwd`)
/// - the extension is lower-cased and restricted to ASCII alphanumerics
/// - the base keeps ASCII alphanumerics, whitespace, dots and hyphens; whitespace runs
///   and dot runs each become a single hyphen, and the result is lower-cased
///
/// Never fails. An empty result must be treated as invalid by the caller.
pub fn sanitize_filename(original: &str) -> String {
    let name = final_segment(original);
    if name.is_empty() {
        return String::new();
    }

    let (base, extension) = split_extension(name);

    let mut sanitized = String::with_capacity(name.len());
    let mut pending_whitespace = false;
    let mut previous_dot = false;
    for c in base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '.' || *c == '-')
    {
        if c.is_whitespace() {
            pending_whitespace = true;
            previous_dot = false;
            continue;
        }
        if pending_whitespace {
            sanitized.push('-');
            pending_whitespace = false;
        }
        match c {
            '.' if previous_dot => {}
            '.' => sanitized.push('-'),
            other => sanitized.push(other.to_ascii_lowercase()),
        }
        previous_dot = c == '.';
    }
    if pending_whitespace {
        sanitized.push('-');
    }

    if let Some(extension) = extension {
        sanitized.push('.');
        sanitized.extend(
            extension
                .chars()
                .skip(1)
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase()),
        );
    }

    sanitized
}
