//! Visit entity representing a single recorded redirect.

use chrono::{DateTime, Utc};

/// A visit recorded when a short link is followed.
///
/// Visits are append-only. `code` references a link by value only; deleting the
/// link leaves its visits in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub id: i64,
    pub code: String,
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    pub country: String,
    pub browser: String,
    pub device: String,
}

/// Input data for recording a new visit.
///
/// Produced by the visit recorder after deriving country, browser and device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    pub code: String,
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    pub country: String,
    pub browser: String,
    pub device: String,
}

impl NewVisit {
    /// Attaches a storage id, producing the persisted form.
    pub fn into_visit(self, id: i64) -> Visit {
        Visit {
            id,
            code: self.code,
            timestamp: self.timestamp,
            ip: self.ip,
            country: self.country,
            browser: self.browser,
            device: self.device,
        }
    }
}
