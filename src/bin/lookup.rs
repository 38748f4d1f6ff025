// Kabu Lookup CLI Tool
// Command-line interface for ranked instrument lookup

use kabu_lookup::{Catalog, CatalogError, InstrumentSearch, ScoredCandidate, SearchConfig};
use std::path::{Path, PathBuf};

use clap::Parser;

/// Instrument Lookup Tool - Find tickers by code, name, reading or romaji
#[derive(Parser, Debug)]
#[command(name = "kabu-lookup")]
#[command(about = "Look up listed instruments by partial code, name, kana or romaji", long_about = None)]
#[command(version)]
struct Args {
    /// Search query
    /// - Digits only: bare code match (e.g., "720")
    /// - Anything else: code, name, reading and romaji tiers (e.g., "ﾄﾖﾀ", "softbank")
    #[arg(value_name = "QUERY")]
    query: String,

    /// Catalog file (.json array or converter .js module); embedded sample if omitted
    #[arg(short, long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Maximum number of results to display (defaults to KABU_LOOKUP_LIMIT or 20)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Show score and matching tier for each result
    #[arg(short, long)]
    scores: bool,

    /// Show detailed information
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut config = SearchConfig::from_env();
    if let Some(limit) = args.limit {
        config = config.with_limit(limit);
    }

    let catalog = load_catalog(args.catalog.as_deref(), &config.market_suffix)?;
    let engine = InstrumentSearch::with_config(catalog, config);

    if args.verbose {
        println!("Catalog: {}", engine.stats());
        println!("Query:   {:?}\n", args.query);
    }

    let results = engine.search_scored(&args.query, engine.config().default_limit);

    if results.is_empty() {
        println!("No matches found.");
        return Ok(());
    }

    println!("Found {} matches:\n", results.len());

    for (idx, candidate) in results.iter().enumerate() {
        println!("{}", format_line(idx + 1, candidate));
        if args.scores {
            println!("      Score: {} ({})", candidate.score, candidate.tier);
        }
    }

    Ok(())
}

/// Load the requested catalog with bare codes derived from `market_suffix`
fn load_catalog(path: Option<&Path>, market_suffix: &str) -> Result<Catalog, CatalogError> {
    match path {
        Some(path) => {
            log::debug!("Loading catalog from {}", path.display());
            Catalog::from_path_with_suffix(path, market_suffix)
        }
        None => {
            log::debug!("Using embedded sample catalog");
            Catalog::builtin_with_suffix(market_suffix)
        }
    }
}

/// Render one result as `N. CODE  NAME  (reading / romaji)`
fn format_line(position: usize, candidate: &ScoredCandidate<'_>) -> String {
    let record = candidate.instrument;
    let mut line = format!("{}. {:<10} {}", position, record.code, record.display_name);

    let variants: Vec<&str> = [record.phonetic_reading.as_deref(), record.transliteration.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !variants.is_empty() {
        line.push_str(&format!("  ({})", variants.join(" / ")));
    }
    line
}
