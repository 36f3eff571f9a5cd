// crates/geoloc-core/src/text.rs

//! Text normalization for dictionary keys and queries.
//!
//! Every key inserted into a [`crate::Dictionary`] and every query looked up
//! against one goes through [`normalize`], so both sides agree on casing,
//! accents and punctuation.

use crate::options::{FoldMode, NormalizeOptions};
use once_cell::sync::Lazy;
use regex::Regex;

/// Token separators, with the surrounding whitespace swallowed.
static SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[,|/-]\s*").unwrap());

/// Punctuation and decorative symbols removed from every string.
static STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new("[.;:'\"`♥✈\u{FE0F}]").unwrap());

/// Same as [`STRIP_RE`], commas included.
static STRIP_WITH_COMMAS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("[.;:,'\"`♥✈\u{FE0F}]").unwrap());

/// Convert a string into a folded key: Unicode → ASCII, then lowercase.
///
/// ```rust
/// use geoloc_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("Straße"), "strasse");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Replaces the acute vowels with their ASCII letter. Expects lowercase input.
pub fn fold_vowels(s: &str) -> String {
    s.chars()
        .map(|ch| match ch {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            _ => ch,
        })
        .collect()
}

/// Clean a raw string: lowercase, fold accents, drop punctuation and
/// symbols, trim.
///
/// The result is a fixed point: `normalize(normalize(s)) == normalize(s)`.
///
/// ```rust
/// use geoloc_core::text::normalize;
/// use geoloc_core::NormalizeOptions;
///
/// let opts = NormalizeOptions::default();
/// assert_eq!(normalize("  México D.F. ", &opts), "mexico df");
/// ```
pub fn normalize(raw: &str, opts: &NormalizeOptions) -> String {
    let lower = raw.to_lowercase();
    let folded = match opts.fold {
        FoldMode::Vowels => fold_vowels(&lower),
        // Symbols go first so they are not transliterated into text.
        FoldMode::Full => fold_key(&STRIP_RE.replace_all(&lower, "")),
    };
    let strip = if opts.strip_commas {
        &STRIP_WITH_COMMAS_RE
    } else {
        &STRIP_RE
    };
    strip.replace_all(&folded, "").trim().to_owned()
}

/// Split a normalized string on `, | / -` and normalize each piece again.
///
/// Empty pieces are kept so callers can rely on positions
/// (`"paris,"` yields `["paris", ""]`).
pub fn tokenize(normalized: &str, opts: &NormalizeOptions) -> Vec<String> {
    SPLIT_RE
        .split(normalized)
        .map(|token| normalize(token, opts))
        .collect()
}
