use clap::{Parser, ValueEnum};
use geoloc_core::FoldMode;
use std::path::PathBuf;

/// CLI arguments for geoloc
#[derive(Debug, Parser)]
#[command(
    name = "geoloc",
    version,
    about = "Resolve free-text user locations into countries, one per line"
)]
pub struct CliArgs {
    /// Knowledge-base file, `.json` or `.json.gz` (default: $LOC_DB, then the bundled sample)
    #[arg(long = "db")]
    pub db: Option<PathBuf>,

    /// Read locations from this file instead of stdin
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Print a per-country tally after the rows
    #[arg(long = "frequencies")]
    pub frequencies: bool,

    /// Drop commas while normalizing (inputs then tokenize on `| / -` only)
    #[arg(long = "strip-commas")]
    pub strip_commas: bool,

    /// Accent folding applied to keys and inputs
    #[arg(long = "fold", value_enum, default_value_t = FoldArg::Vowels)]
    pub fold: FoldArg,

    /// Reverse geocode `lat,lng` inputs (needs GOOGLE_GEO_API_KEY)
    #[arg(long = "geocode")]
    pub geocode: bool,

    /// Reverse geocoding request timeout, in seconds
    #[arg(long = "timeout", default_value_t = 10)]
    pub timeout: u64,

    /// Log which strategy matched each input
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FoldArg {
    /// Only á é í ó ú
    Vowels,
    /// Transliterate every non-ASCII character
    Full,
}

impl From<FoldArg> for FoldMode {
    fn from(arg: FoldArg) -> Self {
        match arg {
            FoldArg::Vowels => FoldMode::Vowels,
            FoldArg::Full => FoldMode::Full,
        }
    }
}
