//! Measurement records, the sorted comparison report, and its JSON persistence.
//!
//! The persisted format is a JSON array of records, each either
//! `{name, sizeKB, gzipSizeKB, files: [{path, sizeKB, gzipSizeKB}]}` or
//! `{name, error}`. KB figures are bytes divided by 1000, rounded to two decimals.

use console::style;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::path::Path;

use crate::analyzer::{ResolvedBundle, ResolvedFile};
use crate::error::BundleCompareError;
use crate::fmt::{bytes_to_kb, CROSSMARK};
use crate::infra::{FileSystem, RealFileSystem};

/// Failure reason recorded when the external build exits non-zero or times out
pub const BUILD_FAILED: &str = "Build failed";

/// Failure reason recorded when a built application yields no measurable payload
pub const FAILED_TO_MEASURE: &str = "Failed to measure";

/// Width of the horizontal rules framing the summary table
const SUMMARY_RULE_WIDTH: usize = 60;

/// Accept a KB figure written either as a number or as a decimal string.
fn deserialize_kb<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Kb {
        Number(f64),
        Text(String),
    }

    match Kb::deserialize(deserializer)? {
        Kb::Number(value) => Ok(value),
        Kb::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid KB value '{}'", text))),
    }
}

/// One counted file in a measured record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the entry document's directory
    pub path: String,
    /// Raw size in KB
    #[serde(rename = "sizeKB", deserialize_with = "deserialize_kb")]
    pub size_kb: f64,
    /// Gzip size in KB
    #[serde(rename = "gzipSizeKB", deserialize_with = "deserialize_kb")]
    pub gzip_size_kb: f64,
}

impl From<&ResolvedFile> for FileEntry {
    fn from(file: &ResolvedFile) -> Self {
        Self {
            path: file.path.clone(),
            size_kb: bytes_to_kb(file.sizes.raw_bytes),
            gzip_size_kb: bytes_to_kb(file.sizes.gzip_bytes),
        }
    }
}

/// A successfully measured application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredApp {
    /// Application directory name
    pub name: String,
    /// Total raw size in KB
    #[serde(rename = "sizeKB", deserialize_with = "deserialize_kb")]
    pub size_kb: f64,
    /// Total gzip size in KB
    #[serde(rename = "gzipSizeKB", deserialize_with = "deserialize_kb")]
    pub gzip_size_kb: f64,
    /// Counted files in discovery order
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// An application that could not be built or measured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedApp {
    /// Application directory name
    pub name: String,
    /// `"Build failed"` or `"Failed to measure"`
    pub error: String,
}

/// Outcome for one sample application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasurementRecord {
    /// Sizes were computed
    Measured(MeasuredApp),
    /// Build or discovery failed
    Failed(FailedApp),
}

impl MeasurementRecord {
    /// Record the sizes of a resolved bundle
    pub fn measured(name: impl Into<String>, bundle: &ResolvedBundle) -> Self {
        Self::Measured(MeasuredApp {
            name: name.into(),
            size_kb: bytes_to_kb(bundle.totals.raw_bytes),
            gzip_size_kb: bytes_to_kb(bundle.totals.gzip_bytes),
            files: bundle.files.iter().map(FileEntry::from).collect(),
        })
    }

    /// Record a failure with the given reason
    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failed(FailedApp {
            name: name.into(),
            error: error.into(),
        })
    }

    /// Application name
    pub fn name(&self) -> &str {
        match self {
            Self::Measured(app) => &app.name,
            Self::Failed(app) => &app.name,
        }
    }

    /// Gzip KB, or `None` for a failure
    pub fn gzip_size_kb(&self) -> Option<f64> {
        match self {
            Self::Measured(app) => Some(app.gzip_size_kb),
            Self::Failed(_) => None,
        }
    }

    /// Whether this record carries sizes
    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured(_))
    }
}

/// Descending gzip size; failures compare as larger than any measurement and sort last.
fn compare_records(a: &MeasurementRecord, b: &MeasurementRecord) -> Ordering {
    match (a.gzip_size_kb(), b.gzip_size_kb()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Ordered sequence of measurement records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonReport {
    records: Vec<MeasurementRecord>,
}

impl ComparisonReport {
    /// Build a report from records, sorted
    pub fn new(records: Vec<MeasurementRecord>) -> Self {
        let mut report = Self { records };
        report.sort();
        report
    }

    /// Append a record (call [`ComparisonReport::sort`] afterwards)
    pub fn push(&mut self, record: MeasurementRecord) {
        self.records.push(record);
    }

    /// Stable sort: descending gzip size, failures last, ties keep insertion order
    pub fn sort(&mut self) {
        self.records.sort_by(compare_records);
    }

    /// Records in report order
    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    /// Successfully measured applications in report order
    pub fn measured(&self) -> impl Iterator<Item = &MeasuredApp> {
        self.records.iter().filter_map(|record| match record {
            MeasurementRecord::Measured(app) => Some(app),
            MeasurementRecord::Failed(_) => None,
        })
    }

    /// Number of failure records
    pub fn failed_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_measured()).count()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records at all
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load a persisted report from disk
    pub fn load(path: &Path) -> Result<Self, BundleCompareError> {
        Self::load_with_fs(&RealFileSystem, path)
    }

    /// Load a persisted report through a custom filesystem.
    ///
    /// The loaded record order is kept as written.
    pub fn load_with_fs<FS: FileSystem>(fs: &FS, path: &Path) -> Result<Self, BundleCompareError> {
        if !fs.is_file(path) {
            return Err(BundleCompareError::ReportMissing {
                path: path.to_path_buf(),
            });
        }
        let content = fs
            .read_to_string(path)
            .map_err(|source| BundleCompareError::Io {
                context: format!("reading {}", path.display()),
                source,
            })?;
        serde_json::from_str(&content).map_err(|e| BundleCompareError::InvalidReport {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Persist as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), BundleCompareError> {
        self.save_with_fs(&RealFileSystem, path)
    }

    /// Persist through a custom filesystem, creating parent directories as needed
    pub fn save_with_fs<FS: FileSystem>(&self, fs: &FS, path: &Path) -> Result<(), BundleCompareError> {
        let io_error = |source| BundleCompareError::Io {
            context: format!("writing {}", path.display()),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs.create_dir_all(parent).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| BundleCompareError::InvalidReport {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs.write(path, json).map_err(io_error)
    }

    /// Fixed-width summary lines, one per record, without the framing rules
    pub fn summary_lines(&self) -> Vec<String> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| match record {
                MeasurementRecord::Measured(app) => format!(
                    "{}. {:<15} - {:<8} KB (gzip) / {:<8} KB (raw)",
                    index + 1,
                    app.name,
                    app.gzip_size_kb.to_string(),
                    app.size_kb.to_string()
                ),
                MeasurementRecord::Failed(app) => format!(
                    "{}. {:<15} - {} {}",
                    index + 1,
                    app.name,
                    CROSSMARK,
                    app.error
                ),
            })
            .collect()
    }

    /// Print the summary table to stdout
    pub fn print_summary(&self) {
        let rule = "─".repeat(SUMMARY_RULE_WIDTH);
        println!("{}", style(&rule).dim());
        for line in self.summary_lines() {
            println!("{}", line);
        }
        println!("{}", style(&rule).dim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::FileSizes;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn measured(name: &str, gzip: f64) -> MeasurementRecord {
        MeasurementRecord::Measured(MeasuredApp {
            name: name.to_string(),
            size_kb: gzip * 3.0,
            gzip_size_kb: gzip,
            files: Vec::new(),
        })
    }

    fn names(report: &ComparisonReport) -> Vec<&str> {
        report.records().iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_sort_descending_with_failures_last() {
        let report = ComparisonReport::new(vec![
            MeasurementRecord::failed("angular-21", BUILD_FAILED),
            measured("preact", 12.5),
            measured("react-19", 60.1),
            MeasurementRecord::failed("aaa", FAILED_TO_MEASURE),
            measured("vue", 30.0),
        ]);

        assert_eq!(
            names(&report),
            vec!["react-19", "vue", "preact", "angular-21", "aaa"]
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_sizes() {
        let report = ComparisonReport::new(vec![
            measured("b", 10.0),
            measured("a", 10.0),
            measured("c", 10.0),
        ]);
        assert_eq!(names(&report), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_measured_record_rounds_kb_from_bytes() {
        let bundle = {
            let mut bundle = ResolvedBundle::default();
            bundle.push(ResolvedFile {
                path: "assets/main.js".to_string(),
                sizes: FileSizes {
                    raw_bytes: 500,
                    gzip_bytes: 200,
                },
            });
            bundle.push(ResolvedFile {
                path: "assets/chunk.js".to_string(),
                sizes: FileSizes {
                    raw_bytes: 12_345,
                    gzip_bytes: 125,
                },
            });
            bundle
        };

        let record = MeasurementRecord::measured("vue", &bundle);
        let MeasurementRecord::Measured(app) = record else {
            panic!("expected a measured record");
        };
        assert_eq!(app.size_kb, 12.85);
        assert_eq!(app.gzip_size_kb, 0.33);
        assert_eq!(app.files[1].size_kb, 12.35);
        assert_eq!(app.files[1].gzip_size_kb, 0.13);
    }

    #[test]
    fn test_serialized_shape_matches_persisted_format() {
        let report = ComparisonReport::new(vec![
            MeasurementRecord::Measured(MeasuredApp {
                name: "solid".to_string(),
                size_kb: 20.5,
                gzip_size_kb: 8.25,
                files: vec![FileEntry {
                    path: "assets/index.js".to_string(),
                    size_kb: 20.5,
                    gzip_size_kb: 8.25,
                }],
            }),
            MeasurementRecord::failed("qwik", BUILD_FAILED),
        ]);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {
                    "name": "solid",
                    "sizeKB": 20.5,
                    "gzipSizeKB": 8.25,
                    "files": [{"path": "assets/index.js", "sizeKB": 20.5, "gzipSizeKB": 8.25}]
                },
                {"name": "qwik", "error": "Build failed"}
            ])
        );
    }

    #[test]
    fn test_legacy_string_kb_values_are_accepted() {
        let json = r#"[
            {"name": "vue", "sizeKB": 80.12, "gzipSizeKB": 30.5,
             "files": [{"path": "assets/index.js", "sizeKB": "80.12", "gzipSizeKB": "30.50"}]},
            {"name": "nuxt-4", "error": "Failed to measure"}
        ]"#;

        let report: ComparisonReport = serde_json::from_str(json).unwrap();

        let app = report.measured().next().unwrap();
        assert_eq!(app.files[0].gzip_size_kb, 30.5);
        assert_eq!(report.failed_count(), 1);
    }

    #[test]
    fn test_integer_kb_values_are_accepted() {
        let json = r#"[{"name": "vue", "sizeKB": 80, "gzipSizeKB": 30}]"#;
        let report: ComparisonReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.records()[0].gzip_size_kb(), Some(30.0));
    }

    #[test]
    fn test_save_then_load_preserves_records() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out/bundle-comparison.json");
        let report = ComparisonReport::new(vec![
            measured("react-19", 60.1),
            MeasurementRecord::failed("angular-21", BUILD_FAILED),
        ]);

        report.save(&path).unwrap();
        let loaded = ComparisonReport::load(&path).unwrap();

        assert_eq!(loaded, report);
    }

    #[test]
    fn test_load_missing_report_is_report_missing() {
        let temp = TempDir::new().unwrap();
        let err = ComparisonReport::load(&temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, BundleCompareError::ReportMissing { .. }));
    }

    #[test]
    fn test_load_malformed_report_is_invalid_report() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        std::fs::write(&path, r#"{"name": "not an array"}"#).unwrap();

        let err = ComparisonReport::load(&path).unwrap_err();
        assert!(matches!(err, BundleCompareError::InvalidReport { .. }));
    }

    #[test]
    fn test_summary_lines_are_fixed_width() {
        let report = ComparisonReport::new(vec![
            measured("preact", 4.5),
            MeasurementRecord::failed("angular-21", BUILD_FAILED),
        ]);

        let lines = report.summary_lines();
        assert_eq!(
            lines[0],
            "1. preact          - 4.5      KB (gzip) / 13.5     KB (raw)"
        );
        assert!(lines[1].starts_with("2. angular-21      - "));
        assert!(lines[1].ends_with("Build failed"));
    }

    fn arb_record() -> impl Strategy<Value = MeasurementRecord> {
        prop_oneof![
            ("[a-z]{1,8}", 0u32..100_000).prop_map(|(name, hundredths)| measured(
                &name,
                f64::from(hundredths) / 100.0
            )),
            "[a-z]{1,8}".prop_map(|name| MeasurementRecord::failed(name, BUILD_FAILED)),
        ]
    }

    proptest! {
        #[test]
        fn prop_failures_always_sort_after_measurements(
            records in prop::collection::vec(arb_record(), 0..20)
        ) {
            let report = ComparisonReport::new(records.clone());

            let first_failure = report
                .records()
                .iter()
                .position(|r| !r.is_measured())
                .unwrap_or(report.len());
            prop_assert!(report.records()[first_failure..].iter().all(|r| !r.is_measured()));

            let sizes: Vec<f64> = report.records().iter().filter_map(|r| r.gzip_size_kb()).collect();
            prop_assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
            prop_assert_eq!(report.len(), records.len());
        }
    }
}
