//! winerr CLI
//!
//! Look up Windows error codes by category and value.
//! Reference pages are fetched once and cached as `<category>.cache`.

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;
use tracing::debug;
use winerr::output::{self, Format};
use winerr::{logging, DocumentCache, Lookup, Registry};

#[derive(Parser)]
#[command(name = "winerr")]
#[command(version)]
#[command(about = "Look up Windows error codes (HRESULT, NTSTATUS, Win32)")]
struct Cli {
    /// Error category; unknown names are ignored
    #[arg(short = 't', long = "type", value_name = "CATEGORY")]
    category: Option<String>,

    /// Error value to look up, e.g. E_FAIL
    #[arg(short = 'v', long = "value", value_name = "ERROR_VALUE")]
    value: Option<String>,

    /// List every record instead of one
    #[arg(short, long, conflicts_with = "value")]
    list: bool,

    /// Directory holding the <category>.cache files
    #[arg(long, env = "WINERR_CACHE_DIR", default_value = ".")]
    cache_dir: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Debug logging on stderr
    #[arg(long)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn parse_cli(registry: &Registry) -> Cli {
    let matches = Cli::command()
        .override_usage(registry.usage("winerr"))
        .get_matches();
    Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

/// Trimmed, non-empty flag value
fn flag(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let registry = Registry::default();
    let cli = parse_cli(&registry);

    logging::init(cli.verbose, cli.quiet)?;

    let category = flag(cli.category.as_deref()).filter(|name| {
        let known = registry.get(name).is_some();
        if !known {
            debug!("Ignoring unknown category: {}", name);
        }
        known
    });
    let value = flag(cli.value.as_deref());

    let cache = DocumentCache::new(&cli.cache_dir).context("Failed to create HTTP client")?;
    let mut lookup = Lookup::new(registry, cache);

    let hits = if cli.list {
        lookup.list(category.as_deref()).await
    } else {
        lookup.lookup(category.as_deref(), value.as_deref()).await
    };

    print!("{}", output::render(&hits, cli.format)?);

    Ok(())
}
