//! Run configuration, built once from CLI flags and the environment and then
//! passed to whatever needs it.

use std::path::PathBuf;
use std::time::Duration;

use tracing::error;

use crate::cli::Cli;
use crate::error::AppError;

pub const API_KEY_VAR: &str = "FRED_API_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when `FRED_API_KEY` is unset; data collection then fails.
    pub api_key: Option<String>,
    pub output_dir: PathBuf,
    pub static_dir: PathBuf,
    pub title: String,
    pub years: u32,
    pub timeout: Duration,
}

impl Config {
    /// Build from parsed flags, reading `FRED_API_KEY` from the environment
    /// (or a `.env` file).
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_VAR).ok().filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            error!("Configuration error: the {API_KEY_VAR} environment variable is not set.");
        }
        Self::new(cli, api_key)
    }

    pub fn new(cli: &Cli, api_key: Option<String>) -> Result<Self, AppError> {
        if cli.years == 0 {
            return Err(AppError::config("--years must be at least 1."));
        }
        if cli.timeout_secs == 0 {
            return Err(AppError::config("--timeout-secs must be greater than 0."));
        }
        Ok(Self {
            api_key,
            output_dir: cli.output_dir.clone(),
            static_dir: cli.static_dir.clone(),
            title: cli.title.clone(),
            years: cli.years,
            timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}
