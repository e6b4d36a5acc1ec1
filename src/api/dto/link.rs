//! JSON representation of a link.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{Link, Visibility};

/// A link as returned by the API, with its full short URL.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub visibility: Visibility,
    pub expires_at: Option<DateTime<Utc>>,
}

impl LinkResponse {
    pub fn from_link(link: Link, base_url: &str) -> Self {
        Self {
            short_url: short_url(base_url, &link.code),
            code: link.code,
            long_url: link.long_url,
            created_at: link.created_at,
            visibility: link.visibility,
            expires_at: link.expires_at,
        }
    }
}

/// Joins the public base URL and a code with exactly one slash.
pub fn short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
