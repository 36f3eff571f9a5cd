//! geoloc-cli
//! ==========
//!
//! Batch driver for the `geoloc-core` location resolver.
//!
//! This crate primarily provides a binary (`geoloc`). The library target
//! only carries this overview page.
//!
//! Basic usage
//! -----------
//!
//! ```text
//! geoloc --file users.txt
//! cat users.txt | geoloc --frequencies
//! geoloc --db my_countries.json.gz --fold full --file users.txt
//! GOOGLE_GEO_API_KEY=... geoloc --geocode --file users.txt
//! ```
//!
//! Every resolved input becomes one CSV row, `"raw","country","code"`, on
//! stdout. Logs go to stderr; set `RUST_LOG` or pass `-v` for per-input
//! details.
//!
//! For programmatic access use the `geoloc-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
