//! # gymloop
//!
//! Entry point for the gymloop binary.

use anyhow::Result;
use clap::Parser;
use gymloop::{app, cli};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout carries the observation telemetry, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = cli::Settings::resolve(cli::Args::parse())?;
    tracing::info!(
        env = %settings.env_id,
        mode = ?settings.render_mode,
        "Starting gymloop"
    );
    app::run_stdout(&settings)?;
    Ok(())
}
