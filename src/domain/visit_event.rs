//! Visit event model for detached visit recording.

use chrono::{DateTime, Utc};

/// Placeholder stored when the client sent no `User-Agent` header.
pub const UNKNOWN_USER_AGENT: &str = "Unknown";

/// An in-memory representation of a redirect, queued for background recording.
///
/// Carries only raw request data. Country, browser and device are derived by the
/// worker so the redirect path never waits on geolocation.
///
/// # Usage Flow
///
/// 1. Created in the redirect handler once the link has been resolved
/// 2. Pushed to the bounded visit queue (non-blocking)
/// 3. Processed by [`crate::domain::visit_worker::run_visit_worker`]
/// 4. Converted to [`crate::domain::entities::NewVisit`] for persistence
#[derive(Debug, Clone)]
pub struct VisitEvent {
    pub code: String,
    pub ip: String,
    pub user_agent: String,
    pub occurred_at: DateTime<Utc>,
}

impl VisitEvent {
    /// Creates a visit event stamped with the current time.
    ///
    /// A missing user agent is recorded as [`UNKNOWN_USER_AGENT`].
    pub fn new(code: String, ip: String, user_agent: Option<&str>) -> Self {
        Self {
            code,
            ip,
            user_agent: user_agent
                .unwrap_or(UNKNOWN_USER_AGENT)
                .to_string(),
            occurred_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_event_creation_full() {
        let before = Utc::now();
        let event = VisitEvent::new(
            "abc123".to_string(),
            "192.168.1.1".to_string(),
            Some("Mozilla/5.0"),
        );

        assert_eq!(event.code, "abc123");
        assert_eq!(event.ip, "192.168.1.1");
        assert_eq!(event.user_agent, "Mozilla/5.0");
        assert!(event.occurred_at >= before);
    }

    #[test]
    fn test_visit_event_without_user_agent() {
        let event = VisitEvent::new("xyz".to_string(), String::new(), None);

        assert_eq!(event.user_agent, UNKNOWN_USER_AGENT);
        assert!(event.ip.is_empty());
    }
}
