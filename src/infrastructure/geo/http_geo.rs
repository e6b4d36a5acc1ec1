//! Geolocation through an external HTTP API.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{trace, warn};

use super::service::GeoLocator;

/// Default lookup endpoint. `{ip}` is replaced with the address being resolved.
pub const DEFAULT_GEOIP_API_URL: &str = "https://ipwho.is/{ip}";

/// Geolocator backed by a JSON HTTP API.
///
/// The URL template uses `{ip}` as a placeholder, e.g. `https://ipwho.is/{ip}` or
/// `http://ip-api.com/json/{ip}?fields=status,country`. Responses reporting failure
/// (`"success": false` or `"status": "fail"`) resolve to `None`.
///
/// Every request is bounded by the client timeout, so a slow provider only delays
/// the background visit worker.
pub struct HttpGeoLocator {
    client: reqwest::Client,
    url_template: String,
}

impl HttpGeoLocator {
    /// Creates a geolocator with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend init failure).
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url_template: url_template.into(),
        })
    }

    fn url_for(&self, ip: &str) -> String {
        self.url_template.replace("{ip}", ip)
    }
}

#[async_trait]
impl GeoLocator for HttpGeoLocator {
    async fn lookup_country(&self, ip: &str) -> Option<String> {
        if ip.parse::<IpAddr>().is_err() {
            trace!(ip, "Skipping geolocation for unparseable address");
            return None;
        }

        let url = self.url_for(ip);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(url = %url, error = %e, "Geolocation request failed");
                return None;
            }
        };

        let response = match response.error_for_status() {
            Ok(r) => r,
            Err(e) => {
                warn!(url = %url, error = %e, "Geolocation API returned an error status");
                return None;
            }
        };

        let json: Value = match response.json().await {
            Ok(j) => j,
            Err(e) => {
                warn!(url = %url, error = %e, "Geolocation response could not be parsed");
                return None;
            }
        };

        let country = parse_country(&json);
        trace!(ip, country = ?country, "Geolocation lookup finished");
        country
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Extracts a country name from a provider response.
///
/// Accepts the ipwho.is shape (`success` + `country`) and the ip-api.com shape
/// (`status` + `country`). Blank names count as missing.
fn parse_country(json: &Value) -> Option<String> {
    if json["success"].as_bool() == Some(false) || json["status"].as_str() == Some("fail") {
        return None;
    }

    json["country"]
        .as_str()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
}
