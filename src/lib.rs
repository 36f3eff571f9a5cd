//! Workspace host crate: re-exports `geoloc-core` so the demos under
//! `demos/` can `use geoloc_rs::prelude::*`.

pub use geoloc_core::*;
