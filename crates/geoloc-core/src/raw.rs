// crates/geoloc-core/src/raw.rs
use serde::{Deserialize, Serialize};

/// One country of the knowledge base, as it comes from JSON:
///
/// ```json
/// {
///   "name": "Mexico",
///   "names": ["Méjico", "Estados Unidos Mexicanos"],
///   "cities": ["Guadalajara", "Monterrey"],
///   "city_abbreviations": ["gdl", "mty", "cdmx"],
///   "guesses": ["mx"],
///   "short_code": "MX",
///   "long_code": "MEX"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub name: String,
    /// Alternate country names (translations, historic names, aliases).
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub city_abbreviations: Vec<String>,
    /// Low-confidence fragments, only used as a last resort.
    #[serde(default)]
    pub guesses: Vec<String>,
    #[serde(default)]
    pub short_code: String,
    #[serde(default)]
    pub long_code: String,
    #[serde(default)]
    pub continent: Option<String>,
}

pub type CountriesRaw = Vec<CountryEntry>;
