//! No-op geolocation for disabled lookups and tests.

use super::service::GeoLocator;
use async_trait::async_trait;

/// A geolocator that never knows the answer.
///
/// Used when `GEOIP_API_URL` is empty or `disabled`, and in tests that must not
/// touch the network. Every visit resolves to the unknown country.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGeoLocator;

#[async_trait]
impl GeoLocator for NullGeoLocator {
    async fn lookup_country(&self, _ip: &str) -> Option<String> {
        None
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
