//! geoloc: resolve free-text user locations in batch.
//!
//! Reads one raw location per line (from `--file` or stdin), resolves each
//! against the knowledge base and prints a CSV row for every match:
//!
//! ```text
//! $ printf 'Paris, France\nCDMX\n' | geoloc
//! "Paris, France","france","fra"
//! "CDMX","mexico","mex"
//! ```
//!
//! Unmatched inputs produce no row; run with `-v` to see why.
//!
//! Knowledge base
//! --------------
//!
//! `--db <path>` wins, then `$LOC_DB`, then the sample dataset bundled with
//! `geoloc-core`. Both `.json` and `.json.gz` are accepted.
mod args;
mod report;

use crate::args::CliArgs;
use anyhow::Context;
use clap::Parser;
use geoloc_core::{LocationStore, NormalizeOptions, Resolver, ResolverOptions};
use std::borrow::Cow;
use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let normalize = NormalizeOptions {
        strip_commas: args.strip_commas,
        fold: args.fold.into(),
    };
    let db_path = args
        .db
        .clone()
        .unwrap_or_else(LocationStore::default_dataset_path);
    let store = LocationStore::load_from_path(&db_path, &normalize)
        .with_context(|| format!("failed to load knowledge base {}", db_path.display()))?;

    let options = ResolverOptions {
        normalize,
        ..Default::default()
    };
    let mut resolver = Resolver::with_options(&store, options);
    if args.geocode {
        resolver = attach_geocoder(resolver, args.timeout)?;
    }

    let lines = read_input(&args)?;
    tracing::info!(inputs = lines.len(), "resolving");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut codes = Vec::new();
    let mut unmatched = 0usize;

    for (raw, outcome) in resolver.resolve_batch(&lines) {
        match outcome {
            Ok(m) => {
                let location = m.to_location();
                report::write_row(&mut out, raw, &location)?;
                codes.push(m.record.long_country_code.as_str());
            }
            Err(e) => {
                unmatched += 1;
                tracing::debug!(input = %raw, reason = %e, "unresolved");
            }
        }
    }
    tracing::info!(resolved = codes.len(), unmatched, "done");

    if args.frequencies {
        report::write_frequencies(&mut out, &report::tally(codes))?;
    }
    out.flush()?;
    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or(default.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Non-empty lines of `--file`, or of stdin when no file is given.
fn read_input(args: &CliArgs) -> anyhow::Result<Vec<String>> {
    match &args.file {
        Some(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("failed to open input file {}", path.display()))?;
            read_lines(BufReader::new(file))
                .with_context(|| format!("failed to read input file {}", path.display()))
        }
        None => read_lines(io::stdin().lock()).context("reading stdin"),
    }
}

/// Splits `reader` into non-empty lines. Each line is decoded on its own, so
/// invalid UTF-8 only affects that line (as U+FFFD) and never the batch.
fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for (n, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(&bytes);
        if bytes.is_empty() {
            continue;
        }
        let line = String::from_utf8_lossy(bytes);
        if let Cow::Owned(_) = line {
            tracing::warn!(line = n + 1, "input line is not valid UTF-8");
        }
        lines.push(line.into_owned());
    }
    Ok(lines)
}

#[cfg(feature = "geocode")]
fn attach_geocoder(resolver: Resolver<'_>, timeout_secs: u64) -> anyhow::Result<Resolver<'_>> {
    use geoloc_core::geocode::{GeocoderConfig, HttpGeocoder};
    use std::time::Duration;

    let timeout = Duration::from_secs(timeout_secs);
    let config = GeocoderConfig::from_env().with_timeout(timeout);
    let geocoder = HttpGeocoder::new(config).context("geocoder setup failed")?;

    let config = geocoder.config();
    if config.api_key.is_none() {
        tracing::warn!("GOOGLE_GEO_API_KEY is not set, coordinate inputs will fail");
    }
    tracing::info!(endpoint = %config.endpoint, ?timeout, "reverse geocoding enabled");
    Ok(resolver.with_geocoder(geocoder))
}

#[cfg(not(feature = "geocode"))]
fn attach_geocoder(_resolver: Resolver<'_>, _timeout_secs: u64) -> anyhow::Result<Resolver<'_>> {
    anyhow::bail!("--geocode needs geoloc built with the `geocode` feature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_line_does_not_drop_its_neighbours() {
        let input: &[u8] = b"Paris, France\nM\xe9xico\nLagos\n";
        let lines = read_lines(input).unwrap();
        assert_eq!(lines, vec!["Paris, France", "M\u{FFFD}xico", "Lagos"]);
    }

    #[test]
    fn blank_lines_and_crlf_are_dropped() {
        let input: &[u8] = b"Lima, Peru\r\n\r\n\nCDMX";
        let lines = read_lines(input).unwrap();
        assert_eq!(lines, vec!["Lima, Peru", "CDMX"]);
    }
}
