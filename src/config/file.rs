//! Configuration file data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::analyzer::{
    DedupStrategy, ResolverOptions, DEFAULT_COMPRESSION_LEVEL, DEFAULT_IMPORT_SCAN_BYTES,
};
use crate::pipeline::{DEFAULT_BUILD_COMMAND, DEFAULT_BUILD_TIMEOUT};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".bundle-compare.toml";

/// Default directory holding one subdirectory per sample application
pub const DEFAULT_APPS_DIR: &str = "apps";

/// Default persisted report path
pub const DEFAULT_REPORT_FILE: &str = "bundle-comparison.json";

/// Default chart output path
pub const DEFAULT_CHART_FILE: &str = "bundle-comparison.svg";

/// bundle-compare configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Directory scanned for sample applications
    pub apps_dir: PathBuf,

    /// Where `measure` writes and `chart` reads the report
    pub report: PathBuf,

    /// Where `chart` writes the SVG
    pub chart: PathBuf,

    /// External build settings
    pub build: BuildSettings,

    /// Reference scanning and sizing settings
    pub scan: ScanSettings,

    /// Extra or overriding bar colours, keyed by application name
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub palette: BTreeMap<String, String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            apps_dir: PathBuf::from(DEFAULT_APPS_DIR),
            report: PathBuf::from(DEFAULT_REPORT_FILE),
            chart: PathBuf::from(DEFAULT_CHART_FILE),
            build: BuildSettings::default(),
            scan: ScanSettings::default(),
            palette: BTreeMap::new(),
        }
    }
}

/// How each application is built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildSettings {
    /// Program and arguments, run in the application directory
    pub command: Vec<String>,

    /// Per-application deadline in seconds
    pub timeout_secs: u64,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            command: DEFAULT_BUILD_COMMAND.iter().map(|s| s.to_string()).collect(),
            timeout_secs: DEFAULT_BUILD_TIMEOUT.as_secs(),
        }
    }
}

impl BuildSettings {
    /// Deadline as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// How references are followed and sized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScanSettings {
    /// Leading bytes of each file searched for static imports
    pub import_scan_bytes: usize,

    /// Gzip level (0-9)
    pub compression_level: u32,

    /// Visited-set keying: `"path"` or `"reference"`
    pub dedup: DedupStrategy,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            import_scan_bytes: DEFAULT_IMPORT_SCAN_BYTES,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            dedup: DedupStrategy::default(),
        }
    }
}

impl ScanSettings {
    /// Resolver options for these settings
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            import_scan_bytes: self.import_scan_bytes,
            compression_level: self.compression_level,
            dedup: self.dedup,
        }
    }
}

/// Whether `value` is `#rgb` or `#rrggbb` hex
pub fn is_hex_colour(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

impl ConfigFile {
    /// Check value constraints, returning every problem found.
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_compare::config::ConfigFile;
    ///
    /// let mut config = ConfigFile::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.build.timeout_secs = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut issues = Vec::new();

        if self.build.command.first().map_or(true, |p| p.trim().is_empty()) {
            issues.push("build.command must name a program".to_string());
        }
        if self.build.timeout_secs == 0 {
            issues.push("build.timeout-secs must be greater than 0".to_string());
        }
        if self.scan.import_scan_bytes == 0 {
            issues.push("scan.import-scan-bytes must be greater than 0".to_string());
        }
        if self.scan.compression_level > 9 {
            issues.push(format!(
                "scan.compression-level must be between 0 and 9 (got {})",
                self.scan.compression_level
            ));
        }
        for (name, colour) in &self.palette {
            if !is_hex_colour(colour) {
                issues.push(format!(
                    "palette.{} must be a #rgb or #rrggbb colour (got '{}')",
                    name, colour
                ));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}
