//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::check::CheckArgs;
use crate::cli::commands::sample::SampleArgs;
use crate::cli::commands::show::ShowArgs;

#[derive(Parser, Debug)]
#[command(
    name = "tolstack",
    version,
    about = "Dimensional tolerance stack-ups: limits, tolerance propagation and Monte Carlo draws"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(
        long,
        short = 'f',
        global = true,
        value_enum,
        default_value = "auto",
        env = "TOLSTACK_FORMAT"
    )]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show basic value, tolerances, limits and midpoint of defined dimensions
    Show(ShowArgs),

    /// Print raw Monte Carlo draws of one dimension, one per line
    Sample(SampleArgs),

    /// Validate a definition and flag negative stack tolerances (text, or json/yaml via --format)
    Check(CheckArgs),
}

/// Output format selection
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pick per command (table for `show`, text for `check`, plain lines for `sample`)
    #[default]
    Auto,
    /// Human-readable table
    Table,
    /// YAML document
    Yaml,
    /// Pretty-printed JSON
    Json,
    /// Tab-separated values with header
    Tsv,
    /// Comma-separated values with header
    Csv,
}
