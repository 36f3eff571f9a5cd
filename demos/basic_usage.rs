//! Basic usage example for geoloc-rs
//!
//! This example demonstrates how to:
//! - Load the bundled knowledge base
//! - Resolve raw location strings
//! - See which strategy of the cascade answered
//! - Resolve a batch and tally countries

use geoloc_rs::prelude::*;
use std::collections::BTreeMap;

fn main() -> Result<()> {
    println!("=== GeoLoc-RS Basic Usage Example ===\n");

    println!("Loading knowledge base...");
    let store = LocationStore::load()?;
    let stats = store.stats();
    println!(
        "✓ Loaded {} countries ({} names, {} cities, {} abbreviations)\n",
        stats.records, stats.countries, stats.cities, stats.abbreviations
    );

    let resolver = Resolver::new(store);

    // Example 1: Single inputs
    println!("--- Example 1: Resolve single inputs ---");
    let samples = [
        "Paris, France",
        "  MÉXICO ",
        "Seattle, WA",
        "CDMX",
        "Bogotá D.C.",
    ];
    for raw in samples {
        match resolver.resolve(raw) {
            Ok(m) => println!(
                "{raw:<16} -> {} ({}) via {}",
                m.record.country, m.record.long_country_code, m.strategy
            ),
            Err(e) => println!("{raw:<16} -> {e}"),
        }
    }
    println!();

    // Example 2: What the strategies see
    println!("--- Example 2: Normalized query ---");
    let query = resolver.prepare("São Paulo - Brasil ✈️");
    println!("normalized: {:?}", query.normalized);
    println!("tokens:     {:?}", query.tokens);
    for &strategy in resolver.cascade() {
        let hit = resolver.try_strategy(strategy, &query);
        let mark = if hit.is_some() { "hit" } else { "-" };
        println!("  {:<12} {mark}", strategy.as_str());
    }
    println!();

    // Example 3: Owned location with city filled in
    println!("--- Example 3: Owned location ---");
    if let Ok(m) = resolver.resolve("downtown toronto") {
        let loc = m.to_location();
        println!("country:   {}", loc.country);
        println!("city:      {:?}", loc.city);
        println!("continent: {:?}", loc.continent);
    }
    println!();

    // Example 4: Batch with a per-country tally
    println!("--- Example 4: Batch ---");
    let inputs = ["Lima, Peru", "NYC", "london", "", "zqj", "Lagos", "LA"];
    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    for (raw, outcome) in resolver.resolve_batch(inputs) {
        match outcome {
            Ok(m) => {
                let code = m.record.long_country_code.as_str();
                *tally.entry(code).or_default() += 1;
            }
            Err(e) => println!("  unresolved {raw:?}: {e}"),
        }
    }
    for (code, n) in &tally {
        println!("  {code}: {n}");
    }

    Ok(())
}
