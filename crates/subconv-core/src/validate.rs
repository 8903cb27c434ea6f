//! Source URL validation (http/https only).

use url::Url;

use crate::error::{Result, SubconvError};

/// True when `s` is non-empty, parses as an absolute URL, and uses http or https.
pub fn is_valid_url(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    match Url::parse(s) {
        Ok(u) => matches!(u.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Trim `input` and check it is a usable subscription URL.
///
/// Returns the trimmed string on success so callers compose exactly what was validated.
pub fn validate_source_url(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SubconvError::EmptyUrl);
    }
    if !is_valid_url(trimmed) {
        return Err(SubconvError::InvalidUrl(trimmed.to_string()));
    }
    Ok(trimmed)
}
