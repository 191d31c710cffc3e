//! Configuration for bundle-compare
//!
//! This module provides:
//! - `.bundle-compare.toml` data structures with defaults for every key
//! - Loading and validation

pub mod file;
pub mod loader;

pub use file::{
    is_hex_colour, BuildSettings, ConfigFile, ScanSettings, CONFIG_FILE_NAME, DEFAULT_APPS_DIR,
    DEFAULT_CHART_FILE, DEFAULT_REPORT_FILE,
};
pub use loader::ConfigLoader;
