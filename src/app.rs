//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initialises logging
//! - parses CLI arguments and reads the environment
//! - constructs the FRED client
//! - runs the site build

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;
use crate::data::FredClient;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `infographic` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;

    let client = config
        .api_key
        .as_deref()
        .map(|key| FredClient::new(key, config.timeout))
        .transpose()?;

    let report = pipeline::build_site(&config, client.as_ref(), Local::now())?;
    if let Some(archived) = &report.archived {
        println!("Archived previous report: {}", archived.display());
    }
    println!("Wrote {}", report.page.display());
    Ok(())
}

/// Install the `tracing` subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (e.g. by tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
