//! Chart command implementation
//!
//! Handles the `bundle-compare chart` command: read the persisted report and
//! write an SVG bar chart of the measured applications.

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::chart::{generation_timestamp, ChartRenderer, Palette};
use crate::cli::ChartArgs;
use crate::error::BundleCompareError;
use crate::fmt::CHECKMARK;
use crate::infra::{FileSystem, RealFileSystem};
use crate::report::{ComparisonReport, MeasuredApp};

use super::load_config;

/// Render `report_path` to `chart_path`, returning how many bars were drawn
pub fn render_chart_file<FS: FileSystem>(
    fs: &FS,
    report_path: &Path,
    chart_path: &Path,
    palette: Palette,
) -> Result<usize, BundleCompareError> {
    let report = ComparisonReport::load_with_fs(fs, report_path)?;
    let apps: Vec<MeasuredApp> = report.measured().cloned().collect();
    if apps.is_empty() {
        return Err(BundleCompareError::ReportEmpty {
            path: report_path.to_path_buf(),
            failed: report.failed_count(),
        });
    }

    let svg = ChartRenderer::new(palette).render(&apps, &generation_timestamp());

    let io_error = |source| BundleCompareError::Io {
        context: format!("writing {}", chart_path.display()),
        source,
    };
    if let Some(parent) = chart_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs.create_dir_all(parent).map_err(io_error)?;
    }
    fs.write(chart_path, svg).map_err(io_error)?;
    Ok(apps.len())
}

/// Main chart command handler
///
/// # Examples
///
/// ```no_run
/// use bundle_compare::cli::ChartArgs;
/// use bundle_compare::cmd::cmd_chart;
///
/// cmd_chart(None, &ChartArgs::default())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Fails with a non-zero exit code when the report is missing, malformed, or
/// has no successfully measured application.
pub fn cmd_chart(config_path: Option<&Path>, args: &ChartArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let input = args.input.clone().unwrap_or(config.report);
    let output = args.output.clone().unwrap_or(config.chart);

    let bars = render_chart_file(
        &RealFileSystem,
        &input,
        &output,
        Palette::with_overrides(config.palette),
    )?;
    log::info!("{} bars rendered from {}", bars, input.display());

    println!(
        "{} Chart generated: {}",
        CHECKMARK,
        style(output.display()).cyan()
    );
    Ok(())
}
