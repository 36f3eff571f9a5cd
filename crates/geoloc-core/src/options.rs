// crates/geoloc-core/src/options.rs
use serde::{Deserialize, Serialize};

/// How non-ASCII letters are folded during normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldMode {
    /// Only the acute vowels `á é í ó ú` are replaced; everything else is kept.
    #[default]
    Vowels,
    /// Full Unicode → ASCII transliteration (`Łódź` → `lodz`).
    Full,
}

/// Knobs for [`crate::text::normalize`].
///
/// The same options must be used to build the [`crate::LocationStore`] and to
/// resolve against it, otherwise keys and queries are normalized differently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Also drop `,` with the other punctuation. Commas are then no longer
    /// available as token separators.
    pub strip_commas: bool,
    pub fold: FoldMode,
}

/// Tuning for the resolution cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    pub normalize: NormalizeOptions,

    /// Smallest window (in characters) tried by the country and city scans.
    pub min_scan_window: usize,

    /// Smallest window (in characters) tried by the guess scan.
    pub min_guess_window: usize,

    /// Substring scans are O(L²); inputs longer than this skip them.
    pub max_scan_chars: usize,

    /// Country codes whose cities are checked ahead of the global city
    /// dictionary in the two-token step.
    pub priority_city_countries: Vec<String>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            min_scan_window: 4,
            min_guess_window: 2,
            max_scan_chars: 64,
            priority_city_countries: Vec::new(),
        }
    }
}
