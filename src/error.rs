//! Error types with contextual suggestions
//!
//! Fatal errors end a single CLI action (the measurement batch itself never aborts
//! on one application's failure). Each variant carries:
//! - An actionable message
//! - A suggested fix
//! - A sysexits-style exit code
//!
//! # Examples
//!
//! ```no_run
//! use bundle_compare::error::BundleCompareError;
//! use bundle_compare::report::ComparisonReport;
//! use std::path::Path;
//!
//! match ComparisonReport::load(Path::new("bundle-comparison.json")) {
//!     Ok(report) => println!("{} records", report.len()),
//!     Err(e) => {
//!         eprintln!("{}", e);
//!         if let Some(help) = e.suggestion() {
//!             eprintln!("help: {}", help);
//!         }
//!         std::process::exit(e.exit_code());
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors for a single CLI action
#[derive(Error, Debug)]
pub enum BundleCompareError {
    /// The directory holding the sample applications does not exist
    #[error("Apps directory not found: {}", path.display())]
    AppsDirNotFound {
        /// Directory that was looked up
        path: PathBuf,
    },

    /// The persisted report does not exist
    #[error("Report not found: {}", path.display())]
    ReportMissing {
        /// Report path
        path: PathBuf,
    },

    /// The persisted report has no successfully measured application
    #[error("No valid data to chart in {}", path.display())]
    ReportEmpty {
        /// Report path
        path: PathBuf,
        /// Number of failed records that were skipped
        failed: usize,
    },

    /// The persisted report is not a list of measurement records
    #[error("Invalid report {}: {reason}", path.display())]
    InvalidReport {
        /// Report path
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// The configuration file is unreadable or has invalid values
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Offending file, if the problem came from one
        path: Option<PathBuf>,
        /// What is wrong
        reason: String,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl BundleCompareError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_compare::error::BundleCompareError;
    /// use std::path::PathBuf;
    ///
    /// let error = BundleCompareError::ReportMissing {
    ///     path: PathBuf::from("bundle-comparison.json"),
    /// };
    ///
    /// assert!(error.suggestion().unwrap().contains("bundle-compare measure"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::AppsDirNotFound { path } => Some(format!(
                "Create {} with one subdirectory per sample application, or pass --apps-dir",
                path.display()
            )),
            Self::ReportMissing { .. } => {
                Some("Run 'bundle-compare measure' first to produce the report".to_string())
            }
            Self::ReportEmpty { failed, .. } if *failed > 0 => Some(format!(
                "All {} applications failed to build or measure; rerun with RUST_LOG=debug for details",
                failed
            )),
            Self::ReportEmpty { .. } => {
                Some("Add applications to the apps directory and run 'bundle-compare measure'".to_string())
            }
            Self::InvalidReport { .. } => Some(
                "Regenerate the report with 'bundle-compare measure'; it must be a JSON array of records"
                    .to_string(),
            ),
            Self::InvalidConfig { path: Some(path), .. } => {
                Some(format!("Fix or remove {}", path.display()))
            }
            Self::InvalidConfig { path: None, .. } => {
                Some("Check the command-line overrides".to_string())
            }
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error, following sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_compare::error::BundleCompareError;
    /// use std::path::PathBuf;
    ///
    /// let error = BundleCompareError::ReportEmpty {
    ///     path: PathBuf::from("bundle-comparison.json"),
    ///     failed: 0,
    /// };
    ///
    /// assert_eq!(error.exit_code(), 65); // EX_DATAERR
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AppsDirNotFound { .. } => 66, // EX_NOINPUT
            Self::ReportMissing { .. } => 66,   // EX_NOINPUT
            Self::ReportEmpty { .. } => 65,     // EX_DATAERR
            Self::InvalidReport { .. } => 65,   // EX_DATAERR
            Self::InvalidConfig { .. } => 78,   // EX_CONFIG
            Self::Io { .. } => 74,              // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(bc_error) = error.downcast_ref::<BundleCompareError>() {
            if let Some(suggestion) = bc_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(bc_error) = error.downcast_ref::<BundleCompareError>() {
            bc_error.exit_code()
        } else {
            1 // Generic error
        }
    }
}
