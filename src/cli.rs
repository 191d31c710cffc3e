//! Command-line interface definition
//!
//! Kept in the library so shell completions are generated from the same
//! definition the binary parses.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Production JavaScript payload comparison for web framework sample apps
///
/// bundle-compare builds every application under an apps directory, measures the
/// JavaScript its entry page loads (raw and gzip), and charts the result.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    pub no_emoji: bool,

    /// Config file to use instead of ./.bundle-compare.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and measure every application, then write the report
    Measure(MeasureArgs),

    /// Render the persisted report as an SVG bar chart
    Chart(ChartArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options for `measure`
#[derive(Args, Debug, Clone, Default)]
pub struct MeasureArgs {
    /// Directory containing one subdirectory per application
    #[arg(long, value_name = "DIR")]
    pub apps_dir: Option<PathBuf>,

    /// Report file to write
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Per-application build timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Hide the build spinner
    #[arg(long)]
    pub no_progress: bool,
}

/// Options for `chart`
#[derive(Args, Debug, Clone, Default)]
pub struct ChartArgs {
    /// Report file to read
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// SVG file to write
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
