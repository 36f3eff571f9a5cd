//! Error handling example for geoloc-rs
//!
//! This example demonstrates the failure modes of loading and resolving

use geoloc_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== GeoLoc-RS Error Handling Example ===\n");

    // Example 1: Loading a knowledge base that is not there
    println!("--- Example 1: Missing knowledge base ---");
    let opts = NormalizeOptions::default();
    match LocationStore::load_from_path("does/not/exist.json", &opts) {
        Ok(_) => println!("✓ Loaded (unexpected)"),
        Err(GeoError::NotFound(msg)) => println!("✗ Not found: {msg}"),
        Err(e) => {
            eprintln!("✗ Failed to load knowledge base: {e}");
            return Err(e);
        }
    }
    println!();

    let store = LocationStore::load()?;

    // Example 2: Inputs that match nothing
    println!("--- Example 2: No match ---");
    let resolver = Resolver::new(store);
    for raw in ["", "???", "zqj"] {
        match resolver.resolve(raw) {
            Ok(m) => println!("  {raw:?} -> {}", m.record.country),
            Err(ResolveError::NoMatch) => println!("  {raw:?} -> no match"),
            Err(e) => println!("  {raw:?} -> {e}"),
        }
    }
    println!();

    // Example 3: Coordinates without a reverse geocoder
    println!("--- Example 3: Coordinates, no geocoder ---");
    match resolver.resolve("48.8566, 2.3522") {
        Err(ResolveError::Geocode(GeocodeError::NotConfigured)) => {
            println!("  coordinate input needs a reverse geocoder")
        }
        other => println!("  {other:?}"),
    }
    println!();

    // Example 4: A geocoder that fails, or answers with an unknown country
    println!("--- Example 4: Geocoder failures ---");
    let geocoder = |at: Coordinate| -> std::result::Result<String, GeocodeError> {
        if at.lat > 0.0 {
            Err(GeocodeError::Timeout { secs: 10 })
        } else {
            Ok("Base Esperanza, Antarctica".to_owned())
        }
    };
    let flaky = Resolver::new(store).with_geocoder(geocoder);
    for raw in ["48.8566, 2.3522", "-63.39, -56.99"] {
        match flaky.resolve(raw) {
            Ok(m) => println!("  {raw} -> {}", m.record.country),
            Err(e) => println!("  {raw} -> {e}"),
        }
    }
    println!();

    // Example 5: Numbers without a pair are plain text
    println!("--- Example 5: Not a coordinate pair ---");
    match flaky.resolve("Lima 12, Peru") {
        Ok(m) => {
            let country = &m.record.country;
            println!("  resolved as text: {country} via {}", m.strategy)
        }
        Err(e) => println!("  {e}"),
    }

    Ok(())
}
