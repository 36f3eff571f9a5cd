// crates/geoloc-core/src/dictionary.rs

//! # Dictionary Store
//!
//! Records are stored once, in a flat `Vec`. Every dictionary maps a
//! normalized key to a [`RecordId`] into that vector, so the country name,
//! all of its aliases, cities, abbreviations and codes share one record.
//!
//! The store is built once and is read-only afterwards.

use crate::options::NormalizeOptions;
use crate::raw::CountryEntry;
use crate::text::normalize;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::iter;

/// Index of a record inside a [`LocationStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub u32);

impl RecordId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The canonical answer for a resolved location. All text is lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub continent: Option<String>,
    pub country: String,
    /// e.g. `"mx"`
    pub short_country_code: String,
    /// e.g. `"mex"`
    pub long_country_code: String,
    pub city: Option<String>,
    /// Reverse-geocoded address. Never set on stored records; only on the
    /// owned copies handed out by [`crate::Match::to_location`].
    pub address: Option<String>,
}

/// The independent lookup tables of a [`LocationStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DictionaryKind {
    Country,
    City,
    Abbreviation,
    Guess,
    CountryCode,
}

/// Mapping from a normalized key to a record. Last write wins.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, RecordId>,
    min_key_chars: usize,
    max_key_chars: usize,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key`, returning the record it pointed to before, if any.
    pub fn insert(&mut self, key: String, id: RecordId) -> Option<RecordId> {
        let chars = key.chars().count();
        if self.entries.is_empty() {
            self.min_key_chars = chars;
            self.max_key_chars = chars;
        } else {
            self.min_key_chars = self.min_key_chars.min(chars);
            self.max_key_chars = self.max_key_chars.max(chars);
        }
        self.entries.insert(key, id)
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<RecordId> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Brute-force substring scan.
    ///
    /// Tries every window of `query` from the full length down to
    /// `min_window` characters; within one length, windows are tried left to
    /// right. The first window that is a key wins, so the longest match is
    /// preferred and ties go to the lowest start offset.
    ///
    /// Window lengths that no key has are skipped; that never changes which
    /// window hits first. Cost is O(L²) lookups in the character length `L`.
    ///
    /// ```rust
    /// use geoloc_core::{Dictionary, RecordId};
    ///
    /// let mut dict = Dictionary::new();
    /// dict.insert("chile".into(), RecordId(0));
    /// dict.insert("peru".into(), RecordId(1));
    ///
    /// assert_eq!(dict.scan("from peru to chile", 4), Some((RecordId(0), "chile")));
    /// ```
    pub fn scan<'q>(&self, query: &'q str, min_window: usize) -> Option<(RecordId, &'q str)> {
        if self.is_empty() {
            return None;
        }

        // Byte offset of every char boundary, end included.
        let bounds: Vec<usize> = query
            .char_indices()
            .map(|(i, _)| i)
            .chain(iter::once(query.len()))
            .collect();
        let chars = bounds.len() - 1;

        let lo = min_window.max(self.min_key_chars).max(1);
        let hi = chars.min(self.max_key_chars);
        if lo > hi {
            return None;
        }

        for size in (lo..=hi).rev() {
            for start in 0..=(chars - size) {
                let window = &query[bounds[start]..bounds[start + size]];
                if let Some(id) = self.get(window) {
                    return Some((id, window));
                }
            }
        }
        None
    }
}

/// Simple aggregate statistics for a loaded store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub records: usize,
    pub countries: usize,
    pub cities: usize,
    pub abbreviations: usize,
    pub guesses: usize,
    pub codes: usize,
}

/// The in-memory knowledge base: records plus the five dictionaries.
#[derive(Debug, Clone, Default)]
pub struct LocationStore {
    records: Vec<LocationRecord>,
    countries: Dictionary,
    cities: Dictionary,
    abbreviations: Dictionary,
    guesses: Dictionary,
    codes: Dictionary,
    /// Normalized city keys per record, indexed by `RecordId`.
    cities_by_record: Vec<HashSet<String>>,
    options: NormalizeOptions,
}

impl LocationStore {
    /// Empty store whose keys will be normalized with `options`.
    pub fn new(options: &NormalizeOptions) -> Self {
        Self {
            options: options.clone(),
            ..Default::default()
        }
    }

    /// Builds a store from knowledge-base entries.
    pub fn from_entries<I>(entries: I, options: &NormalizeOptions) -> Self
    where
        I: IntoIterator<Item = CountryEntry>,
    {
        let mut store = Self::new(options);
        for entry in entries {
            store.insert_entry(entry);
        }
        tracing::debug!(stats = ?store.stats(), "location store built");
        store
    }

    /// Expands one entry into a record plus its dictionary insertions.
    pub fn insert_entry(&mut self, entry: CountryEntry) -> RecordId {
        let id = RecordId(self.records.len() as u32);
        let lower = |s: &str| s.trim().to_lowercase();

        self.records.push(LocationRecord {
            continent: entry
                .continent
                .as_deref()
                .map(lower)
                .filter(|c| !c.is_empty()),
            country: lower(&entry.name),
            short_country_code: lower(&entry.short_code),
            long_country_code: lower(&entry.long_code),
            city: None,
            address: None,
        });

        let opts = self.options.clone();
        let put = |dict: &mut Dictionary, raw: &str| {
            let key = normalize(raw, &opts);
            if !key.is_empty() {
                dict.insert(key, id);
            }
        };

        put(&mut self.codes, &entry.short_code);
        put(&mut self.codes, &entry.long_code);
        put(&mut self.countries, &entry.name);
        for name in &entry.names {
            put(&mut self.countries, name);
        }
        for city in &entry.cities {
            put(&mut self.cities, city);
        }
        for abbr in &entry.city_abbreviations {
            put(&mut self.abbreviations, abbr);
        }
        for guess in &entry.guesses {
            put(&mut self.guesses, guess);
        }

        self.cities_by_record.push(
            entry
                .cities
                .iter()
                .map(|c| normalize(c, &self.options))
                .filter(|c| !c.is_empty())
                .collect(),
        );
        id
    }

    pub fn normalize_options(&self) -> &NormalizeOptions {
        &self.options
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    /// # Panics
    /// If `id` was not issued by this store.
    pub fn record(&self, id: RecordId) -> &LocationRecord {
        &self.records[id.index()]
    }

    pub fn dictionary(&self, kind: DictionaryKind) -> &Dictionary {
        match kind {
            DictionaryKind::Country => &self.countries,
            DictionaryKind::City => &self.cities,
            DictionaryKind::Abbreviation => &self.abbreviations,
            DictionaryKind::Guess => &self.guesses,
            DictionaryKind::CountryCode => &self.codes,
        }
    }

    /// Exact lookup of an already normalized key.
    pub fn find(&self, kind: DictionaryKind, key: &str) -> Option<RecordId> {
        self.dictionary(kind).get(key)
    }

    /// Country record for a 2- or 3-letter code, case-insensitive.
    pub fn find_by_code(&self, code: &str) -> Option<&LocationRecord> {
        let key = normalize(code, &self.options);
        self.codes.get(&key).map(|id| self.record(id))
    }

    /// True if `city` (normalized) is listed under the record's country,
    /// regardless of which country owns that key in the global city table.
    pub fn has_city(&self, id: RecordId, city: &str) -> bool {
        self.cities_by_record
            .get(id.index())
            .is_some_and(|set| set.contains(city))
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            records: self.records.len(),
            countries: self.countries.len(),
            cities: self.cities.len(),
            abbreviations: self.abbreviations.len(),
            guesses: self.guesses.len(),
            codes: self.codes.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, short: &str, long: &str) -> CountryEntry {
        CountryEntry {
            name: name.into(),
            short_code: short.into(),
            long_code: long.into(),
            ..Default::default()
        }
    }

    fn store_of(entries: impl IntoIterator<Item = CountryEntry>) -> LocationStore {
        LocationStore::from_entries(entries, &NormalizeOptions::default())
    }

    #[test]
    fn scan_prefers_longest_window() {
        let mut dict = Dictionary::new();
        dict.insert("niger".into(), RecordId(0));
        dict.insert("nigeria".into(), RecordId(1));
        let hit = dict.scan("lagos nigeria", 4);
        assert_eq!(hit, Some((RecordId(1), "nigeria")));
    }

    #[test]
    fn scan_breaks_ties_to_the_left() {
        let mut dict = Dictionary::new();
        dict.insert("peru".into(), RecordId(0));
        dict.insert("cuba".into(), RecordId(1));
        assert_eq!(dict.scan("cuba and peru", 4), Some((RecordId(1), "cuba")));
        assert_eq!(dict.scan("peru and cuba", 4), Some((RecordId(0), "peru")));
    }

    #[test]
    fn scan_respects_min_window() {
        let mut dict = Dictionary::new();
        dict.insert("uk".into(), RecordId(0));
        assert_eq!(dict.scan("london uk", 4), None);
        assert_eq!(dict.scan("london uk", 2), Some((RecordId(0), "uk")));
    }

    #[test]
    fn scan_handles_multibyte_input() {
        let mut dict = Dictionary::new();
        dict.insert("köln".into(), RecordId(3));
        assert_eq!(dict.scan("großraum köln", 4), Some((RecordId(3), "köln")));
        assert_eq!(dict.scan("ßß", 2), None);
    }

    #[test]
    fn scan_on_empty_inputs() {
        let dict = Dictionary::new();
        assert_eq!(dict.scan("anything", 1), None);

        let mut dict = Dictionary::new();
        dict.insert("abcd".into(), RecordId(0));
        assert_eq!(dict.scan("", 0), None);
        assert_eq!(dict.scan("abc", 2), None);
    }

    #[test]
    fn insert_overwrites_last_write_wins() {
        let mut dict = Dictionary::new();
        assert_eq!(dict.insert("georgia".into(), RecordId(0)), None);
        let previous = dict.insert("georgia".into(), RecordId(1));
        assert_eq!(previous, Some(RecordId(0)));
        assert_eq!(dict.get("georgia"), Some(RecordId(1)));
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn entry_expands_into_shared_record() {
        let mut mx = entry("Mexico", "MX", "MEX");
        mx.names = vec!["Méjico".into()];
        mx.cities = vec!["Guadalajara".into(), "Monterrey".into()];
        mx.city_abbreviations = vec!["GDL".into()];
        mx.guesses = vec!["mx".into()];
        mx.continent = Some("North America".into());

        let store = store_of([mx]);
        let id = RecordId(0);

        assert_eq!(store.find(DictionaryKind::Country, "mexico"), Some(id));
        assert_eq!(store.find(DictionaryKind::Country, "mejico"), Some(id));
        assert_eq!(store.find(DictionaryKind::City, "guadalajara"), Some(id));
        assert_eq!(store.find(DictionaryKind::Abbreviation, "gdl"), Some(id));
        assert_eq!(store.find(DictionaryKind::Guess, "mx"), Some(id));
        assert_eq!(store.find(DictionaryKind::CountryCode, "mex"), Some(id));

        let rec = store.record(id);
        assert_eq!(rec.country, "mexico");
        assert_eq!(rec.short_country_code, "mx");
        assert_eq!(rec.long_country_code, "mex");
        assert_eq!(rec.continent.as_deref(), Some("north america"));
        assert_eq!(rec.address, None);

        assert_eq!(
            store.stats(),
            StoreStats {
                records: 1,
                countries: 2,
                cities: 2,
                abbreviations: 1,
                guesses: 1,
                codes: 2,
            }
        );
    }

    #[test]
    fn later_entry_wins_shared_city_but_keeps_own_city_set() {
        let mut us = entry("United States", "US", "USA");
        us.cities = vec!["Paris".into()];
        let mut fr = entry("France", "FR", "FRA");
        fr.cities = vec!["Paris".into()];

        let store = store_of([us, fr]);
        let owner = store.find(DictionaryKind::City, "paris");
        assert_eq!(owner, Some(RecordId(1)));
        assert!(store.has_city(RecordId(0), "paris"));
        assert!(store.has_city(RecordId(1), "paris"));
        assert!(!store.has_city(RecordId(7), "paris"));
    }

    #[test]
    fn empty_codes_are_not_inserted() {
        let store = store_of([entry("Atlantis", "", "")]);
        assert_eq!(store.stats().codes, 0);
        assert!(store.find_by_code("").is_none());
    }

    #[test]
    fn find_by_code_is_case_insensitive() {
        let store = store_of([entry("Germany", "DE", "DEU")]);
        assert_eq!(store.find_by_code("De").unwrap().country, "germany");
        assert_eq!(store.find_by_code(" deu ").unwrap().country, "germany");
    }
}
