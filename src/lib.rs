#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! bundle-compare library
//!
//! This library builds a set of sample web applications, measures the production
//! JavaScript each one's entry page actually loads (raw and gzip), persists a
//! sorted comparison report and renders it as an SVG bar chart. It can be used
//! programmatically in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Measuring an already built application:
//!
//! ```
//! use bundle_compare::analyzer::{ResolverOptions, SizeResolver};
//! use bundle_compare::pipeline::measure_app;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let app = TempDir::new().unwrap();
//! let dist = app.path().join("dist");
//! fs::create_dir_all(dist.join("assets")).unwrap();
//! fs::write(
//!     dist.join("index.html"),
//!     r#"<script type="module" src="/assets/index.js"></script>"#,
//! )
//! .unwrap();
//! fs::write(dist.join("assets/index.js"), "console.log('hello');").unwrap();
//!
//! let resolver = SizeResolver::new(ResolverOptions::default());
//! let bundle = measure_app(app.path(), &resolver).unwrap();
//!
//! assert_eq!(bundle.files.len(), 1);
//! assert_eq!(bundle.totals.raw_bytes, 21);
//! ```
//!
//! # Advanced Example: Ordering and Charting
//!
//! Reports sort by gzip size with failures last, and only measured records
//! become bars:
//!
//! ```
//! use bundle_compare::chart::{ChartRenderer, Palette};
//! use bundle_compare::report::{ComparisonReport, MeasurementRecord};
//!
//! let report: ComparisonReport = serde_json::from_str(
//!     r#"[
//!         {"name": "solid", "error": "Build failed"},
//!         {"name": "vue", "sizeKB": 80.0, "gzipSizeKB": 30.5, "files": []},
//!         {"name": "react-19", "sizeKB": 190.2, "gzipSizeKB": 60.1, "files": []}
//!     ]"#,
//! )
//! .unwrap();
//! let report = ComparisonReport::new(report.records().to_vec());
//!
//! let names: Vec<&str> = report.records().iter().map(MeasurementRecord::name).collect();
//! assert_eq!(names, ["react-19", "vue", "solid"]);
//!
//! let apps: Vec<_> = report.measured().cloned().collect();
//! let svg = ChartRenderer::new(Palette::new()).render(&apps, "1/1/2026, 9:00:00 AM");
//! assert!(svg.contains("<svg"));
//! ```

/// Entry discovery, reference scanning and size resolution
pub mod analyzer;
/// SVG chart rendering
pub mod chart;
/// Command-line interface definition
pub mod cli;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file loading and validation
pub mod config;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// Build and measurement pipeline orchestration
pub mod pipeline;
/// Comparison report records and persistence
pub mod report;
