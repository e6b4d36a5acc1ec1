//! JSON representation of a recorded visit.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Visit;

#[derive(Debug, Serialize)]
pub struct VisitResponse {
    pub id: i64,
    pub code: String,
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    pub country: String,
    pub browser: String,
    pub device: String,
}

impl From<Visit> for VisitResponse {
    fn from(visit: Visit) -> Self {
        Self {
            id: visit.id,
            code: visit.code,
            timestamp: visit.timestamp,
            ip: visit.ip,
            country: visit.country,
            browser: visit.browser,
            device: visit.device,
        }
    }
}
