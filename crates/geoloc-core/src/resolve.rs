// crates/geoloc-core/src/resolve.rs

//! # Resolution Engine
//!
//! A raw string goes through one of two paths:
//!
//! 1. **Coordinates.** If the raw input holds a `lat,long` pair, the pair is
//!    reverse geocoded and the last address component is looked up as a
//!    country name, then as a country code. This path never falls back to
//!    text matching.
//! 2. **Text.** The input is normalized and tokenized once, then handed to
//!    the strategies of [`CASCADE`] in order. The first hit wins.

use crate::coord::{try_extract_coordinate, Coordinate};
use crate::dictionary::{DictionaryKind, LocationRecord, LocationStore, RecordId};
use crate::error::{GeocodeError, ResolveError};
use crate::geocode::ReverseGeocoder;
use crate::options::ResolverOptions;
use crate::text::{normalize, tokenize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The step of the cascade that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Coordinate,
    Exact,
    TwoToken,
    CountryCode,
    CountryScan,
    CityScan,
    Abbreviation,
    Guess,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Coordinate => "coordinate",
            Strategy::Exact => "exact",
            Strategy::TwoToken => "two_token",
            Strategy::CountryCode => "country_code",
            Strategy::CountryScan => "country_scan",
            Strategy::CityScan => "city_scan",
            Strategy::Abbreviation => "abbreviation",
            Strategy::Guess => "guess",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'s> {
    pub id: RecordId,
    /// The shared record in the store. Never mutated.
    pub record: &'s LocationRecord,
    pub strategy: Strategy,
    /// Dictionary that produced the hit.
    pub source: DictionaryKind,
    /// The normalized key that hit.
    pub key: String,
    /// Full reverse-geocoded address (coordinate path only).
    pub address: Option<String>,
}

impl Match<'_> {
    /// Owned copy of the record, with the per-resolution details filled in:
    /// `address` from the coordinate path and `city` when a city dictionary
    /// produced the hit.
    pub fn to_location(&self) -> LocationRecord {
        let mut loc = self.record.clone();
        loc.address = self.address.clone();
        if self.source == DictionaryKind::City {
            loc.city = Some(self.key.clone());
        }
        loc
    }
}

/// Input prepared once and shared by every text strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub normalized: String,
    pub tokens: Vec<String>,
    /// False when the normalized string is too long for the O(L²) scans.
    pub scannable: bool,
}

/// Internal hit before it is turned into a [`Match`].
struct Hit {
    id: RecordId,
    source: DictionaryKind,
    key: String,
}

impl Hit {
    fn new(id: RecordId, source: DictionaryKind, key: &str) -> Self {
        Self {
            id,
            source,
            key: key.to_owned(),
        }
    }
}

type StrategyFn = fn(&Resolver<'_>, &Query) -> Option<Hit>;

/// Text strategies in priority order.
pub const CASCADE: [Strategy; 7] = [
    Strategy::Exact,
    Strategy::TwoToken,
    Strategy::CountryCode,
    Strategy::CountryScan,
    Strategy::CityScan,
    Strategy::Abbreviation,
    Strategy::Guess,
];

fn strategy_fn(strategy: Strategy) -> Option<StrategyFn> {
    let f: StrategyFn = match strategy {
        Strategy::Coordinate => return None,
        Strategy::Exact => exact,
        Strategy::TwoToken => two_token,
        Strategy::CountryCode => country_code,
        Strategy::CountryScan => country_scan,
        Strategy::CityScan => city_scan,
        Strategy::Abbreviation => abbreviation,
        Strategy::Guess => guess,
    };
    Some(f)
}

/// Resolves raw strings against a [`LocationStore`].
pub struct Resolver<'s> {
    store: &'s LocationStore,
    geocoder: Option<Box<dyn ReverseGeocoder + 's>>,
    options: ResolverOptions,
    /// Records whose own city lists are checked first in the two-token step.
    priority: Vec<RecordId>,
}

impl fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("stats", &self.store.stats())
            .field("geocoder", &self.geocoder.is_some())
            .field("options", &self.options)
            .finish()
    }
}

impl<'s> Resolver<'s> {
    /// Resolver with default options and no reverse geocoder.
    pub fn new(store: &'s LocationStore) -> Self {
        Self::with_options(store, ResolverOptions::default())
    }

    /// Text is always normalized with the store's own options, so that
    /// queries and keys agree; `options.normalize` is overridden.
    pub fn with_options(store: &'s LocationStore, mut options: ResolverOptions) -> Self {
        if options.normalize != *store.normalize_options() {
            tracing::warn!(
                requested = ?options.normalize,
                store = ?store.normalize_options(),
                "normalize options differ from the store's, using the store's"
            );
        }
        options.normalize = store.normalize_options().clone();

        let mut priority = Vec::new();
        for code in &options.priority_city_countries {
            let key = normalize(code, &options.normalize);
            match store.find(DictionaryKind::CountryCode, &key) {
                Some(id) if !priority.contains(&id) => priority.push(id),
                Some(_) => {}
                None => tracing::warn!(%code, "unknown priority city country"),
            }
        }

        Self {
            store,
            geocoder: None,
            options,
            priority,
        }
    }

    /// Enables the coordinate path.
    pub fn with_geocoder(mut self, geocoder: impl ReverseGeocoder + 's) -> Self {
        self.geocoder = Some(Box::new(geocoder));
        self
    }

    pub fn store(&self) -> &'s LocationStore {
        self.store
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// The text strategies, in the order they are tried.
    pub fn cascade(&self) -> &'static [Strategy] {
        &CASCADE
    }

    /// Normalizes and tokenizes `raw` the way the text strategies see it.
    pub fn prepare(&self, raw: &str) -> Query {
        let normalized = normalize(raw, &self.options.normalize);
        let tokens = tokenize(&normalized, &self.options.normalize);
        let chars = normalized.chars().count();
        let scannable = chars <= self.options.max_scan_chars;
        if !scannable {
            tracing::debug!(
                chars,
                limit = self.options.max_scan_chars,
                "input too long, substring scans skipped"
            );
        }
        Query {
            normalized,
            tokens,
            scannable,
        }
    }

    /// Resolves one raw location string.
    ///
    /// Deterministic for a given store, apart from whatever the reverse
    /// geocoder answers.
    pub fn resolve(&self, raw: &str) -> Result<Match<'s>, ResolveError> {
        if let Some(at) = try_extract_coordinate(raw) {
            return self.resolve_coordinate(at);
        }
        let query = self.prepare(raw);
        self.resolve_query(&query)
    }

    /// Runs the text cascade over an already prepared query.
    pub fn resolve_query(&self, query: &Query) -> Result<Match<'s>, ResolveError> {
        for &strategy in self.cascade() {
            if let Some(hit) = self.run(strategy, query) {
                return Ok(self.finish(strategy, hit, None));
            }
        }
        tracing::debug!(input = %query.normalized, "no match");
        Err(ResolveError::NoMatch)
    }

    /// Runs a single text strategy; useful to inspect the cascade step by step.
    pub fn try_strategy(&self, strategy: Strategy, query: &Query) -> Option<Match<'s>> {
        self.run(strategy, query)
            .map(|hit| self.finish(strategy, hit, None))
    }

    /// Resolves every non-blank input, one at a time. A failed input never
    /// stops the batch; its error is yielded next to it.
    pub fn resolve_batch<'a, I, S>(
        &'a self,
        inputs: I,
    ) -> impl Iterator<Item = (S, Result<Match<'s>, ResolveError>)> + 'a
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: 'a,
        S: AsRef<str> + 'a,
    {
        inputs
            .into_iter()
            .filter(|s| !s.as_ref().trim().is_empty())
            .map(move |s| {
                let outcome = self.resolve(s.as_ref());
                (s, outcome)
            })
    }

    fn run(&self, strategy: Strategy, query: &Query) -> Option<Hit> {
        strategy_fn(strategy).and_then(|f| f(self, query))
    }

    fn finish(&self, strategy: Strategy, hit: Hit, address: Option<String>) -> Match<'s> {
        let record = self.store.record(hit.id);
        tracing::debug!(
            %strategy,
            source = ?hit.source,
            key = %hit.key,
            country = %record.country,
            "resolved"
        );
        Match {
            id: hit.id,
            record,
            strategy,
            source: hit.source,
            key: hit.key,
            address,
        }
    }

    fn resolve_coordinate(&self, at: Coordinate) -> Result<Match<'s>, ResolveError> {
        let geocoder = self
            .geocoder
            .as_deref()
            .ok_or(ResolveError::Geocode(GeocodeError::NotConfigured))?;

        let address = geocoder.reverse_geocode(at).map_err(|e| {
            tracing::warn!(%at, error = %e, "reverse geocoding failed");
            ResolveError::Geocode(e)
        })?;
        if address.trim().is_empty() {
            return Err(ResolveError::Geocode(GeocodeError::EmptyResult));
        }

        // The country is the last comma-separated component.
        let tail = address.rsplit(',').next().unwrap_or_default();
        let key = normalize(tail, &self.options.normalize);

        let hit = self
            .lookup(DictionaryKind::Country, &key)
            .or_else(|| self.lookup(DictionaryKind::CountryCode, &key))
            .ok_or_else(|| ResolveError::UnknownAddressCountry {
                address: address.clone(),
            })?;
        Ok(self.finish(Strategy::Coordinate, hit, Some(address)))
    }

    fn lookup(&self, kind: DictionaryKind, key: &str) -> Option<Hit> {
        self.store
            .find(kind, key)
            .map(|id| Hit::new(id, kind, key))
    }

    fn scan(&self, kind: DictionaryKind, query: &Query, min_window: usize) -> Option<Hit> {
        if !query.scannable {
            return None;
        }
        self.store
            .dictionary(kind)
            .scan(&query.normalized, min_window)
            .map(|(id, window)| Hit::new(id, kind, window))
    }

    fn priority_city(&self, token: &str) -> Option<Hit> {
        self.priority
            .iter()
            .find(|&&id| self.store.has_city(id, token))
            .map(|&id| Hit::new(id, DictionaryKind::City, token))
    }
}

fn exact(r: &Resolver<'_>, q: &Query) -> Option<Hit> {
    r.lookup(DictionaryKind::Country, &q.normalized)
        .or_else(|| r.lookup(DictionaryKind::City, &q.normalized))
}

/// "city, country" or "country, city".
fn two_token(r: &Resolver<'_>, q: &Query) -> Option<Hit> {
    let [first, second] = q.tokens.as_slice() else {
        return None;
    };
    r.lookup(DictionaryKind::Country, second)
        .or_else(|| r.lookup(DictionaryKind::Country, first))
        .or_else(|| r.priority_city(first))
        .or_else(|| r.priority_city(second))
        .or_else(|| r.lookup(DictionaryKind::City, first))
        .or_else(|| r.lookup(DictionaryKind::City, second))
}

fn country_code(r: &Resolver<'_>, q: &Query) -> Option<Hit> {
    let [_, second] = q.tokens.as_slice() else {
        return None;
    };
    r.lookup(DictionaryKind::CountryCode, second)
}

fn country_scan(r: &Resolver<'_>, q: &Query) -> Option<Hit> {
    r.scan(DictionaryKind::Country, q, r.options.min_scan_window)
}

fn city_scan(r: &Resolver<'_>, q: &Query) -> Option<Hit> {
    r.scan(DictionaryKind::City, q, r.options.min_scan_window)
}

fn abbreviation(r: &Resolver<'_>, q: &Query) -> Option<Hit> {
    q.tokens
        .iter()
        .find_map(|t| r.lookup(DictionaryKind::Abbreviation, t))
}

fn guess(r: &Resolver<'_>, q: &Query) -> Option<Hit> {
    r.scan(DictionaryKind::Guess, q, r.options.min_guess_window)
}
