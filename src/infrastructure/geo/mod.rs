//! IP geolocation for visit analytics.
//!
//! Provides a [`GeoLocator`] trait with two implementations:
//! - [`HttpGeoLocator`] - External JSON API lookup with a request timeout
//! - [`NullGeoLocator`] - Lookups disabled

mod http_geo;
mod null_geo;
mod service;

pub use http_geo::{DEFAULT_GEOIP_API_URL, HttpGeoLocator};
pub use null_geo::NullGeoLocator;
pub use service::GeoLocator;

#[cfg(test)]
pub use service::MockGeoLocator;
