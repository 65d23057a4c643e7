//! Command-line parsing.
//!
//! The tool is normally run with no arguments (e.g. from a scheduled CI job);
//! every flag has a default matching the repository layout.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(name = "infographic", version, about = "Static FRED macro infographic builder")]
pub struct Cli {
    /// Directory the site is written to.
    #[arg(long, default_value = "dist")]
    pub output_dir: PathBuf,

    /// Static assets copied into `<output-dir>/static`.
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,

    /// Page title.
    #[arg(long, default_value = "Infografía Financiera")]
    pub title: String,

    /// Years of history shown in the charts.
    #[arg(long, default_value_t = 5)]
    pub years: u32,

    /// Timeout for each FRED request, in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}
