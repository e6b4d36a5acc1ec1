//! Geolocation trait.

use async_trait::async_trait;

/// Looks up the country an IP address belongs to.
///
/// Lookups are best-effort: implementations swallow their own failures (logging them)
/// and return `None`. Callers decide how a missing answer is presented.
///
/// # Implementations
///
/// - [`crate::infrastructure::geo::HttpGeoLocator`] - External HTTP API (ipwho.is-compatible)
/// - [`crate::infrastructure::geo::NullGeoLocator`] - Lookups disabled
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Returns the country name for `ip`, or `None` when it cannot be determined.
    async fn lookup_country(&self, ip: &str) -> Option<String>;

    /// Provider name used in logs.
    fn name(&self) -> &'static str;
}
