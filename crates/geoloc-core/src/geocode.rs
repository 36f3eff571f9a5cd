// crates/geoloc-core/src/geocode.rs

//! Reverse geocoding seam for the coordinate path.
//!
//! The resolver only needs `coordinate -> "component, ..., country"`.
//! [`HttpGeocoder`] talks to a Google-Geocoding-compatible endpoint; tests
//! and offline runs plug in a closure instead.

use crate::coord::Coordinate;
use crate::error::GeocodeError;
use std::time::Duration;

/// Turns a coordinate into a human-readable address whose last
/// comma-separated component is the country.
pub trait ReverseGeocoder: Send + Sync {
    fn reverse_geocode(&self, at: Coordinate) -> Result<String, GeocodeError>;
}

impl<F> ReverseGeocoder for F
where
    F: Fn(Coordinate) -> Result<String, GeocodeError> + Send + Sync,
{
    fn reverse_geocode(&self, at: Coordinate) -> Result<String, GeocodeError> {
        self(at)
    }
}

/// Default endpoint of the Google Geocoding API.
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`HttpGeocoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocoderConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeocoderConfig {
    /// Reads `GOOGLE_GEO_API_KEY` and, optionally, `GEOLOC_GEOCODE_URL`.
    pub fn from_env() -> Self {
        let endpoint = env_non_empty("GEOLOC_GEOCODE_URL");
        Self {
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned()),
            api_key: env_non_empty("GOOGLE_GEO_API_KEY"),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(feature = "geocode")]
pub use http::{parse_response, HttpGeocoder};

#[cfg(feature = "geocode")]
mod http {
    use super::{GeocoderConfig, ReverseGeocoder};
    use crate::coord::Coordinate;
    use crate::error::GeocodeError;
    use reqwest::blocking::Client;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct GeocodeResponse {
        #[serde(default)]
        results: Vec<GeocodeResult>,
        status: String,
        #[serde(default)]
        error_message: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct GeocodeResult {
        formatted_address: String,
    }

    /// Extracts the first formatted address from a service response body.
    pub fn parse_response(body: &str) -> Result<String, GeocodeError> {
        let resp: GeocodeResponse = serde_json::from_str(body).map_err(http_error)?;

        match resp.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(GeocodeError::EmptyResult),
            other => {
                let msg = match resp.error_message {
                    Some(m) => format!("{other}: {m}"),
                    None => other.to_owned(),
                };
                return Err(GeocodeError::Status(msg));
            }
        }

        resp.results
            .into_iter()
            .map(|r| r.formatted_address)
            .find(|a| !a.trim().is_empty())
            .ok_or(GeocodeError::EmptyResult)
    }

    /// Blocking HTTP reverse geocoder with a per-request timeout.
    #[derive(Clone)]
    pub struct HttpGeocoder {
        client: Client,
        config: GeocoderConfig,
    }

    impl std::fmt::Debug for HttpGeocoder {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("HttpGeocoder")
                .field("endpoint", &self.config.endpoint)
                .field("timeout", &self.config.timeout)
                .finish()
        }
    }

    impl HttpGeocoder {
        /// Builds the HTTP client. Fails only if the TLS backend cannot start.
        pub fn new(config: GeocoderConfig) -> crate::Result<Self> {
            let client = Client::builder()
                .timeout(config.timeout)
                .user_agent(concat!("geoloc/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| GeocodeError::Http(format!("Failed to create HTTP client: {e}")))?;
            Ok(Self { client, config })
        }

        pub fn config(&self) -> &GeocoderConfig {
            &self.config
        }
    }

    impl ReverseGeocoder for HttpGeocoder {
        fn reverse_geocode(&self, at: Coordinate) -> Result<String, GeocodeError> {
            let key = self
                .config
                .api_key
                .as_deref()
                .ok_or(GeocodeError::NotConfigured)?;
            let latlng = format!("{},{}", at.lat, at.lng);

            tracing::debug!(%latlng, endpoint = %self.config.endpoint, "reverse geocoding");
            let response = self
                .client
                .get(&self.config.endpoint)
                .query(&[("latlng", latlng.as_str()), ("key", key)])
                .send()
                .map_err(|e| {
                    if e.is_timeout() {
                        GeocodeError::Timeout {
                            secs: self.config.timeout.as_secs(),
                        }
                    } else {
                        http_error(e)
                    }
                })?;

            if !response.status().is_success() {
                return Err(GeocodeError::Http(format!("HTTP {}", response.status())));
            }
            let body = response.text().map_err(http_error)?;
            parse_response(&body)
        }
    }

    fn http_error(e: impl std::fmt::Display) -> GeocodeError {
        GeocodeError::Http(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_geocoders() {
        let g = |c: Coordinate| -> Result<String, GeocodeError> {
            Ok(format!("somewhere near {c}, Nowhere"))
        };
        let addr = g.reverse_geocode(Coordinate::new(1.5, -2.0)).unwrap();
        assert_eq!(addr, "somewhere near 1.5,-2, Nowhere");
    }

    #[test]
    fn geocode_errors_lift_into_geo_error() {
        let err: crate::GeoError = GeocodeError::Timeout { secs: 3 }.into();
        assert_eq!(err.to_string(), "Request timed out after 3s");
        assert!(matches!(err, crate::GeoError::Geocode(GeocodeError::Timeout { .. })));
    }

    #[test]
    fn config_builder_sets_timeout() {
        let timeout = Duration::from_secs(3);
        let cfg = GeocoderConfig::default().with_timeout(timeout);
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.api_key, None);
    }

    #[cfg(feature = "geocode")]
    #[test]
    fn parses_first_formatted_address() {
        let body = r#"{
            "results": [
                {"formatted_address": "Westminster, London SW1A 0AA, UK"},
                {"formatted_address": "London, UK"}
            ],
            "status": "OK"
        }"#;
        assert_eq!(
            parse_response(body).unwrap(),
            "Westminster, London SW1A 0AA, UK"
        );
    }

    #[cfg(feature = "geocode")]
    #[test]
    fn service_errors_map_to_geocode_errors() {
        assert_eq!(
            parse_response(r#"{"results": [], "status": "ZERO_RESULTS"}"#),
            Err(GeocodeError::EmptyResult)
        );
        assert_eq!(
            parse_response(r#"{"status": "REQUEST_DENIED", "error_message": "bad key"}"#),
            Err(GeocodeError::Status("REQUEST_DENIED: bad key".into()))
        );
        assert!(matches!(parse_response("<html>"), Err(GeocodeError::Http(_))));
    }

    #[cfg(feature = "geocode")]
    #[test]
    fn missing_api_key_is_not_configured() {
        let g = HttpGeocoder::new(GeocoderConfig::default()).unwrap();
        assert_eq!(g.config().endpoint, DEFAULT_ENDPOINT);
        assert_eq!(
            g.reverse_geocode(Coordinate::new(0.0, 0.0)),
            Err(GeocodeError::NotConfigured)
        );
    }
}
