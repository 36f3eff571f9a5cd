// crates/geoloc-core/src/lib.rs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # geoloc-core
//!
//! Resolves free-text, human-entered location strings ("Paris, France",
//! "mexico df", "40.7128, -74.0060") into a canonical [`LocationRecord`].
//!
//! The knowledge base is loaded once into a [`LocationStore`] and is
//! read-only afterwards. A [`Resolver`] walks a fixed cascade of matching
//! strategies over it and returns the first hit.
//!
//! ```rust
//! use geoloc_core::prelude::*;
//!
//! let entries = vec![CountryEntry {
//!     name: "France".into(),
//!     cities: vec!["Paris".into()],
//!     short_code: "FR".into(),
//!     long_code: "FRA".into(),
//!     ..Default::default()
//! }];
//! let store = LocationStore::from_entries(entries, &NormalizeOptions::default());
//! let resolver = Resolver::new(&store);
//!
//! let hit = resolver.resolve("Paris, FR").unwrap();
//! assert_eq!(hit.record.country, "france");
//! ```

pub mod coord;
pub mod dictionary;
pub mod error;
pub mod geocode;
pub mod loader;
pub mod options;
pub mod prelude;
pub mod resolve;
pub mod text;
// Shared raw input (knowledge-base rows as they come from disk)
#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::coord::Coordinate;
pub use crate::dictionary::{
    Dictionary, DictionaryKind, LocationRecord, LocationStore, RecordId, StoreStats,
};
pub use crate::error::{GeoError, GeocodeError, ResolveError, Result};
pub use crate::geocode::ReverseGeocoder;
pub use crate::options::{FoldMode, NormalizeOptions, ResolverOptions};
pub use crate::raw::CountryEntry;
pub use crate::resolve::{Match, Resolver, Strategy};
