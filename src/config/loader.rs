//! Configuration file loading

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::BundleCompareError;
use crate::infra::{FileSystem, RealFileSystem};
use std::path::Path;

/// Handles loading configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from `.bundle-compare.toml` in the given directory.
    ///
    /// A missing file yields [`ConfigFile::default`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bundle_compare::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Apps in {}", config.apps_dir.display());
    /// # Ok::<(), bundle_compare::error::BundleCompareError>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile, BundleCompareError> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(
        project_root: &Path,
        fs: &FS,
    ) -> Result<ConfigFile, BundleCompareError> {
        Self::load_file_with_fs(&project_root.join(CONFIG_FILE_NAME), false, fs)
    }

    /// Load an explicitly named config file; it must exist
    pub fn load_file(path: &Path) -> Result<ConfigFile, BundleCompareError> {
        Self::load_file_with_fs(path, true, &RealFileSystem)
    }

    fn load_file_with_fs<FS: FileSystem>(
        config_path: &Path,
        required: bool,
        fs: &FS,
    ) -> Result<ConfigFile, BundleCompareError> {
        let invalid = |reason: String| BundleCompareError::InvalidConfig {
            path: Some(config_path.to_path_buf()),
            reason,
        };

        // Read directly instead of checking existence first
        let contents = match fs.read_to_string(config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                log::debug!("no {} found, using defaults", config_path.display());
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(BundleCompareError::Io {
                    context: format!("reading {}", config_path.display()),
                    source: e,
                });
            }
        };

        let config: ConfigFile = toml_edit::de::from_str(&contents)
            .map_err(|e| invalid(format!("failed to parse {}: {}", config_path.display(), e)))?;

        config.validate().map_err(|issues| invalid(issues.join("; ")))?;

        log::debug!("loaded {}", config_path.display());
        Ok(config)
    }
}
