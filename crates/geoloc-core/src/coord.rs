// crates/geoloc-core/src/coord.rs

//! Detection of raw `lat,long` pairs inside location strings.

use crate::error::{GeoError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two signed decimals separated by a comma, anywhere in the string.
static COORD_RE: Lazy<Regex> = Lazy::new(|| {
    let num = r"[-+]?[0-9]+(?:\.[0-9]*)?";
    Regex::new(&format!(r"{num}\s*,\s*{num}")).unwrap()
});

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Returns the first coordinate-looking substring of `raw`, if any.
pub fn find_coordinate(raw: &str) -> Option<&str> {
    COORD_RE.find(raw).map(|m| m.as_str())
}

/// Parses a matched `"lat , long"` substring.
///
/// All whitespace is removed before splitting on the comma; both halves must
/// parse as `f64`.
pub fn parse_coordinate(matched: &str) -> Result<Coordinate> {
    let compact: String = matched.chars().filter(|c| !c.is_whitespace()).collect();
    let (lat, lng) = compact
        .split_once(',')
        .ok_or_else(|| GeoError::MalformedCoordinate(matched.to_owned()))?;
    let parse = |half: &str| {
        half.parse::<f64>()
            .map_err(|e| GeoError::MalformedCoordinate(format!("{matched}: {e}")))
    };
    Ok(Coordinate::new(parse(lat)?, parse(lng)?))
}

/// Finds and parses a coordinate pair in one step.
///
/// A pair that is detected but does not parse is reported at debug level and
/// treated as absent, so the caller falls back to text matching.
pub fn try_extract_coordinate(raw: &str) -> Option<Coordinate> {
    let matched = find_coordinate(raw)?;
    match parse_coordinate(matched) {
        Ok(c) => Some(c),
        Err(e) => {
            tracing::debug!(input = raw, error = %e, "ignoring malformed coordinate");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_signed_pair_with_spaces() {
        let c = try_extract_coordinate("40.7128, -74.0060").unwrap();
        assert_eq!(c, Coordinate::new(40.7128, -74.006));
    }

    #[test]
    fn extracts_pair_embedded_in_text() {
        assert_eq!(
            find_coordinate("I'm at 51.5,-0.12 right now"),
            Some("51.5,-0.12")
        );
        let c = try_extract_coordinate("gps: +19.43 ,  -99.13 (cdmx)").unwrap();
        assert_eq!(c, Coordinate::new(19.43, -99.13));
    }

    #[test]
    fn integers_and_trailing_dots_count() {
        assert_eq!(
            try_extract_coordinate("10, 20"),
            Some(Coordinate::new(10.0, 20.0))
        );
        assert_eq!(
            try_extract_coordinate("10., 20."),
            Some(Coordinate::new(10.0, 20.0))
        );
    }

    #[test]
    fn plain_text_has_no_coordinate() {
        assert_eq!(find_coordinate("Paris, France"), None);
        assert_eq!(find_coordinate("Route 66"), None);
        assert_eq!(try_extract_coordinate(""), None);
    }

    #[test]
    fn malformed_halves_are_rejected() {
        assert!(matches!(
            parse_coordinate("12.5"),
            Err(GeoError::MalformedCoordinate(_))
        ));
        assert!(matches!(
            parse_coordinate("12.5,abc"),
            Err(GeoError::MalformedCoordinate(_))
        ));
        assert!(matches!(
            parse_coordinate("1.2.3,4"),
            Err(GeoError::MalformedCoordinate(_))
        ));
    }
}
