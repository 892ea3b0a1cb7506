//! Tracing subscriber setup. Everything goes to stderr; stdout carries results only.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// INFO by default (fetch progress), DEBUG with `verbose`, ERROR with `quiet`.
pub fn init(verbose: bool, quiet: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
