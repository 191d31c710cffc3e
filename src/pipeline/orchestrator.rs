//! Comparison orchestration
//!
//! Applications are processed strictly one at a time: build, then measure. A failed
//! build or measurement becomes a failure record and the batch moves on; nothing
//! about one application aborts the others.

use console::style;
use std::path::{Path, PathBuf};

use crate::analyzer::SizeResolver;
use crate::error::BundleCompareError;
use crate::fmt::{bytes_to_kb, CHART, PACKAGE, WARNING};
use crate::infra::{CommandExecutor, FileSystem, RealCommandExecutor, RealFileSystem};
use crate::report::{ComparisonReport, MeasurementRecord, BUILD_FAILED, FAILED_TO_MEASURE};

use super::builder::AppBuilder;
use super::measure::measure_app;
use super::progress::BuildSpinner;

/// Builds and measures every application below an apps directory
pub struct ComparisonOrchestrator<
    FS: FileSystem = RealFileSystem,
    CE: CommandExecutor = RealCommandExecutor,
> {
    apps_dir: PathBuf,
    builder: AppBuilder<CE>,
    resolver: SizeResolver<FS>,
    show_progress: bool,
}

impl<FS: FileSystem, CE: CommandExecutor> ComparisonOrchestrator<FS, CE> {
    /// Create an orchestrator over `apps_dir`
    pub fn new(
        apps_dir: impl Into<PathBuf>,
        builder: AppBuilder<CE>,
        resolver: SizeResolver<FS>,
    ) -> Self {
        Self {
            apps_dir: apps_dir.into(),
            builder,
            resolver,
            show_progress: false,
        }
    }

    /// Show a spinner while each build runs
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Directory scanned for applications
    pub fn apps_dir(&self) -> &Path {
        &self.apps_dir
    }

    /// Names of the immediate subdirectories of the apps directory, in lexical order
    pub fn discover_apps(&self) -> Result<Vec<String>, BundleCompareError> {
        let fs = self.resolver.fs();
        if !fs.is_dir(&self.apps_dir) {
            return Err(BundleCompareError::AppsDirNotFound {
                path: self.apps_dir.clone(),
            });
        }

        let entries = fs
            .read_dir(&self.apps_dir)
            .map_err(|source| BundleCompareError::Io {
                context: format!("listing {}", self.apps_dir.display()),
                source,
            })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| fs.is_dir(&entry.path()))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        Ok(names)
    }

    /// Build and measure one application. Always yields a record.
    pub fn measure_one(&self, name: &str) -> MeasurementRecord {
        let app_dir = self.apps_dir.join(name);
        println!("\n{} Building {}...", PACKAGE, style(name).cyan().bold());

        let spinner = if self.show_progress {
            BuildSpinner::new(&self.builder.command_line())
        } else {
            BuildSpinner::hidden()
        };
        let outcome = self.builder.build(&app_dir);
        if !outcome.is_success() {
            log::warn!("{}: {}", name, outcome);
            spinner.fail(&format!("{} ({})", BUILD_FAILED, outcome));
            return MeasurementRecord::failed(name, BUILD_FAILED);
        }
        spinner.succeed("Built successfully");

        match measure_app(&app_dir, &self.resolver) {
            Ok(bundle) => {
                println!(
                    "   {} {:.2} KB (gzip) / {:.2} KB (raw)",
                    CHART,
                    bytes_to_kb(bundle.totals.gzip_bytes),
                    bytes_to_kb(bundle.totals.raw_bytes)
                );
                MeasurementRecord::measured(name, &bundle)
            }
            Err(failure) => {
                log::warn!("{}: {}", name, failure);
                println!("   {} {}", WARNING, failure);
                MeasurementRecord::failed(name, FAILED_TO_MEASURE)
            }
        }
    }

    /// Process every application and return the sorted report
    pub fn run(&self) -> Result<ComparisonReport, BundleCompareError> {
        let apps = self.discover_apps()?;
        log::info!("{} applications in {}", apps.len(), self.apps_dir.display());

        let mut report = ComparisonReport::default();
        for name in &apps {
            report.push(self.measure_one(name));
        }
        report.sort();
        Ok(report)
    }
}
