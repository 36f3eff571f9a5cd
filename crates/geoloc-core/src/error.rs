// crates/geoloc-core/src/error.rs
use thiserror::Error;

/// Crate-wide error for loading and I/O.
///
/// Per-input resolution outcomes use [`ResolveError`] instead, so one bad
/// input never turns into a hard failure for the caller's batch.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Malformed coordinate: {0}")]
    MalformedCoordinate(String),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}

/// Failure of the external reverse-geocoding call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Service returned status {0}")]
    Status(String),

    #[error("Service returned no address")]
    EmptyResult,

    #[error("No reverse geocoder configured")]
    NotConfigured,
}

/// Why a single input string could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Every strategy was tried without a hit.
    #[error("no match")]
    NoMatch,

    /// The coordinate path could not reach the reverse geocoder or got an
    /// unusable answer. There is no fallback to text matching.
    #[error("reverse geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),

    /// The geocoder answered, but the last address component is neither a
    /// known country name nor a country code.
    #[error("unknown country in address: {address}")]
    UnknownAddressCountry { address: String },
}

pub type Result<T> = std::result::Result<T, GeoError>;
