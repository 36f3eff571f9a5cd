// crates/geoloc-core/src/loader/mod.rs

//! # Data Loader
//!
//! Reads the knowledge base (a JSON array of [`CountryEntry`]) from disk,
//! optionally gzip-compressed, and builds a [`LocationStore`] from it.

use crate::dictionary::LocationStore;
use crate::error::{GeoError, Result};
use crate::options::NormalizeOptions;
use crate::raw::CountriesRaw;
use once_cell::sync::OnceCell;
use std::io::Read;
use std::path::{Path, PathBuf};

pub mod common_io;

/// Environment variable naming the knowledge-base file.
pub const LOC_DB_ENV: &str = "LOC_DB";

#[cfg(feature = "json")]
static DEFAULT_STORE: OnceCell<LocationStore> = OnceCell::new();

/// Parses knowledge-base entries from any reader.
#[cfg(feature = "json")]
pub fn read_entries<R: Read>(reader: R) -> Result<CountriesRaw> {
    let entries: CountriesRaw = serde_json::from_reader(reader)?;
    if let Some(pos) = entries.iter().position(|e| e.name.trim().is_empty()) {
        return Err(GeoError::InvalidData(format!(
            "knowledge-base entry #{pos} has no name"
        )));
    }
    Ok(entries)
}

impl LocationStore {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn default_dataset_filename() -> &'static str {
        "countries.json"
    }

    /// `$LOC_DB` if set, otherwise the bundled sample dataset.
    pub fn default_dataset_path() -> PathBuf {
        match std::env::var_os(LOC_DB_ENV) {
            Some(p) if !p.is_empty() => PathBuf::from(p),
            _ => Self::bundled_dataset_path(),
        }
    }

    /// The sample dataset shipped with the crate.
    pub fn bundled_dataset_path() -> PathBuf {
        let dir = Self::default_data_dir();
        dir.join(Self::default_dataset_filename())
    }

    /// Loads a knowledge base from a `.json` or `.json.gz` file.
    #[cfg(feature = "json")]
    pub fn load_from_path(path: impl AsRef<Path>, options: &NormalizeOptions) -> Result<Self> {
        let path = path.as_ref();
        let reader = common_io::open_stream(path)?;
        let entries = read_entries(reader)?;
        let store = Self::from_entries(entries, options);

        let stats = store.stats();
        tracing::info!(
            path = %path.display(),
            records = stats.records,
            countries = stats.countries,
            cities = stats.cities,
            abbreviations = stats.abbreviations,
            guesses = stats.guesses,
            "knowledge base loaded"
        );
        Ok(store)
    }

    /// Loads the default dataset once per process, with default options.
    #[cfg(feature = "json")]
    pub fn load() -> Result<&'static Self> {
        DEFAULT_STORE.get_or_try_init(|| {
            Self::load_from_path(Self::default_dataset_path(), &NormalizeOptions::default())
        })
    }
}
