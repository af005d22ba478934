//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// logscope -- access log analysis and failed-login detection.
///
/// Running `logscope` with no command analyzes `sample.log` and writes
/// `log_analysis_results.csv` (both configurable).
#[derive(Parser, Debug)]
#[command(name = "logscope", version, about, long_about = None)]
pub struct Cli {
    /// Path to the logscope.toml configuration file (default: ./logscope.toml if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze an access log (default command).
    Analyze(AnalyzeArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Self::Analyze(AnalyzeArgs::default())
    }
}

// ---- analyze ----

/// Analyze an access log file.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Access log file (default: analysis.source_path).
    pub log_file: Option<PathBuf>,

    /// Failed-login (401) count at which a client is reported as suspicious.
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub threshold: Option<u64>,

    /// Write CSV results to this path (default: analysis.csv_output).
    #[arg(long, conflicts_with = "no_csv")]
    pub csv: Option<PathBuf>,

    /// Do not write the CSV results file.
    #[arg(long)]
    pub no_csv: bool,
}

// ---- config ----

/// Manage logscope configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, analysis).
        #[arg(long)]
        section: Option<String>,
    },
}
