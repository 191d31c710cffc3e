//! Measure command implementation
//!
//! Handles the `bundle-compare measure` command: build and measure every
//! application, persist the sorted report and print the summary table.

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::analyzer::SizeResolver;
use crate::cli::MeasureArgs;
use crate::config::ConfigFile;
use crate::error::BundleCompareError;
use crate::fmt::{CHECKMARK, ROCKET, TREND, WARNING};
use crate::pipeline::{AppBuilder, ComparisonOrchestrator};

use super::load_config;

/// Apply command-line overrides on top of file configuration
fn apply_overrides(mut config: ConfigFile, args: &MeasureArgs) -> Result<ConfigFile, BundleCompareError> {
    if let Some(apps_dir) = &args.apps_dir {
        config.apps_dir = apps_dir.clone();
    }
    if let Some(output) = &args.output {
        config.report = output.clone();
    }
    if let Some(timeout) = args.timeout {
        config.build.timeout_secs = timeout;
    }
    config
        .validate()
        .map_err(|issues| BundleCompareError::InvalidConfig {
            path: None,
            reason: issues.join("; "),
        })?;
    Ok(config)
}

/// Warn when the build program cannot be found on PATH; every build would fail.
fn preflight_build_program(program: &str) {
    let is_bare_name = !program.contains('/') && !program.contains('\\');
    if is_bare_name && which::which(program).is_err() {
        println!(
            "{} {} not found on PATH; builds will be recorded as failed",
            WARNING,
            style(program).yellow()
        );
    }
}

/// Main measure command handler
///
/// # Examples
///
/// ```no_run
/// use bundle_compare::cli::MeasureArgs;
/// use bundle_compare::cmd::cmd_measure;
///
/// cmd_measure(None, &MeasureArgs::default())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the apps directory does not
/// exist, or the report cannot be written. Individual build or measurement
/// failures are recorded in the report instead.
pub fn cmd_measure(config_path: Option<&Path>, args: &MeasureArgs) -> Result<()> {
    let config = apply_overrides(load_config(config_path)?, args)?;

    println!("{} Starting bundle size comparison...", ROCKET);
    log::debug!(
        "apps dir {}, build command {:?}, timeout {}s",
        config.apps_dir.display(),
        config.build.command,
        config.build.timeout_secs
    );
    if let Some(program) = config.build.command.first() {
        preflight_build_program(program);
    }

    let orchestrator = ComparisonOrchestrator::new(
        &config.apps_dir,
        AppBuilder::new(config.build.command.clone(), config.build.timeout()),
        SizeResolver::new(config.scan.resolver_options()),
    )
    .with_progress(!args.no_progress);

    let report = orchestrator.run()?;

    let saved = report.save(&config.report);
    if saved.is_ok() {
        println!(
            "\n{} Results saved to {}",
            CHECKMARK,
            style(config.report.display()).cyan()
        );
    }

    println!("\n{} Summary (sorted by size):", TREND);
    report.print_summary();

    saved.context("Failed to persist report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_overrides_replace_file_values() {
        let args = MeasureArgs {
            apps_dir: Some(PathBuf::from("samples")),
            output: Some(PathBuf::from("out/report.json")),
            timeout: Some(5),
            no_progress: true,
        };

        let config = apply_overrides(ConfigFile::default(), &args).unwrap();

        assert_eq!(config.apps_dir, PathBuf::from("samples"));
        assert_eq!(config.report, PathBuf::from("out/report.json"));
        assert_eq!(config.build.timeout_secs, 5);
    }

    #[test]
    fn test_zero_timeout_override_is_rejected() {
        let args = MeasureArgs {
            timeout: Some(0),
            ..Default::default()
        };

        let err = apply_overrides(ConfigFile::default(), &args).unwrap_err();
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_missing_apps_dir_fails_before_writing_report() {
        let temp = tempfile::TempDir::new().unwrap();
        let report = temp.path().join("report.json");
        let args = MeasureArgs {
            apps_dir: Some(temp.path().join("missing")),
            output: Some(report.clone()),
            timeout: None,
            no_progress: true,
        };

        let err = cmd_measure(None, &args).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BundleCompareError>(),
            Some(BundleCompareError::AppsDirNotFound { .. })
        ));
        assert!(!report.exists());
    }
}
