//! Command handlers for the bundle-compare CLI
//!
//! Each submodule handles a specific CLI command.

pub mod chart;
pub mod completions;
pub mod measure;

use std::path::Path;

use crate::config::{ConfigFile, ConfigLoader};
use crate::error::BundleCompareError;

// Re-export command functions for convenient access
pub use chart::{cmd_chart, render_chart_file};
pub use completions::{cmd_completions, write_completions};
pub use measure::cmd_measure;

/// Load the explicitly named config file, or `.bundle-compare.toml` from the
/// working directory when none is given.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<ConfigFile, BundleCompareError> {
    match explicit {
        Some(path) => ConfigLoader::load_file(path),
        None => ConfigLoader::load(Path::new(".")),
    }
}
