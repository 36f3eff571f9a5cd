//! geoloc prelude: bring common types and traits into scope for demos and drivers.

pub use crate::coord::{try_extract_coordinate, Coordinate};
pub use crate::dictionary::{DictionaryKind, LocationRecord, LocationStore, RecordId, StoreStats};
pub use crate::error::{GeoError, GeocodeError, ResolveError, Result};
#[cfg(feature = "geocode")]
pub use crate::geocode::HttpGeocoder;
pub use crate::geocode::{GeocoderConfig, ReverseGeocoder};
pub use crate::options::{FoldMode, NormalizeOptions, ResolverOptions};
pub use crate::raw::CountryEntry;
pub use crate::resolve::{Match, Resolver, Strategy};
pub use crate::text::{normalize, tokenize};
