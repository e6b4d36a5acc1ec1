//! Destination URL validation.
//!
//! A long URL ends up in a `Location` header, so only absolute HTTP(S) URLs are
//! accepted. The URL is stored exactly as submitted.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Checks that `input` is a non-empty absolute `http` or `https` URL.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the URL is empty, malformed, has no host, uses
/// another scheme (`javascript:`, `data:`, `ftp:` ...) or contains control characters.
/// The URL parser silently drops tabs and newlines, but a `Location` header cannot
/// carry them.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_long_url("https://example.com/path?q=1").is_ok());
/// assert!(validate_long_url("").is_err());
/// assert!(validate_long_url("example.com").is_err());
/// assert!(validate_long_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_long_url(input: &str) -> Result<(), AppError> {
    if input.trim().is_empty() {
        return Err(AppError::bad_request(
            "long_url is required",
            json!({ "field": "long_url" }),
        ));
    }

    if input.chars().any(char::is_control) {
        return Err(AppError::bad_request(
            "long_url must not contain control characters",
            json!({ "field": "long_url" }),
        ));
    }

    let url = Url::parse(input).map_err(|e| {
        AppError::bad_request(
            "long_url is not a valid URL",
            json!({ "long_url": input, "reason": e.to_string() }),
        )
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::bad_request(
            "Only http and https URLs can be shortened",
            json!({ "long_url": input, "scheme": url.scheme() }),
        ));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::bad_request(
            "long_url must include a host",
            json!({ "long_url": input }),
        ));
    }

    Ok(())
}
