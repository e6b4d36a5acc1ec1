//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a link is meant to be listed publicly.
///
/// Parsing is lenient: anything other than `private` (case-insensitive) is public.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    /// Normalizes a raw visibility value.
    ///
    /// ```ignore
    /// assert_eq!(Visibility::normalize(Some("PRIVATE")), Visibility::Private);
    /// assert_eq!(Visibility::normalize(Some("hidden")), Visibility::Public);
    /// assert_eq!(Visibility::normalize(None), Visibility::Public);
    /// ```
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("private") => Self::Private,
            _ => Self::Public,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shortened URL link.
///
/// `code` is the primary key. An expired link stays stored; it is only hidden from
/// listing and refused on redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub visibility: Visibility,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        code: String,
        long_url: String,
        created_at: DateTime<Utc>,
        visibility: Visibility,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            code,
            long_url,
            created_at,
            visibility,
            expires_at,
        }
    }

    /// Returns true if the link can no longer be redirected to at `now`.
    ///
    /// A link whose expiry equals `now` is already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e <= now)
    }

    /// Returns true if the link belongs in listings at `now`.
    ///
    /// Only links whose expiry is strictly before `now` are hidden.
    pub fn is_listed_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|e| e >= now)
    }
}

/// Input for creating a link.
///
/// Raw fields as submitted by the caller; the link service validates and normalizes
/// them before anything is persisted.
#[derive(Debug, Clone, Default)]
pub struct NewLink {
    pub long_url: String,
    pub custom_code: Option<String>,
    pub visibility: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Replacement values for an existing link.
///
/// Expiry is deliberately absent: updates never touch `expires_at`.
#[derive(Debug, Clone)]
pub struct LinkUpdate {
    pub long_url: String,
    pub visibility: Option<String>,
}
