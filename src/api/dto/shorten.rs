//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::domain::entities::NewLink;

/// Request to shorten a URL.
///
/// A missing `long_url` deserializes as empty so that it is reported as a
/// validation error rather than a body rejection. Field rules (URL shape, custom
/// code pattern, reserved words) are enforced by the link service.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// The original URL to shorten (absolute HTTP/HTTPS).
    #[serde(default)]
    pub long_url: String,

    /// Optional custom short code. Empty means "generate one".
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub custom_code: Option<String>,

    /// `private` (any case) or anything else for public.
    #[serde(default)]
    pub visibility: Option<String>,

    /// Optional expiry timestamp. After this time, the link returns 410 Gone.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<ShortenRequest> for NewLink {
    fn from(req: ShortenRequest) -> Self {
        NewLink {
            long_url: req.long_url,
            custom_code: req.custom_code,
            visibility: req.visibility,
            expires_at: req.expires_at,
        }
    }
}
