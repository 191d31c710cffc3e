//! Test fixture helpers for creating sample application trees
//!
//! Each fixture lays out already-built applications (`dist/index.html` plus
//! assets) so tests can pair them with a trivial build command.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Marker file that makes [`FAILING_BUILD_COMMAND`] fail for an application
pub const FAIL_MARKER: &str = "fail-build";

/// Build command that succeeds unless the application holds [`FAIL_MARKER`]
pub const FAILING_BUILD_COMMAND: &str = r#"command = ["sh", "-c", "test ! -f fail-build"]"#;

/// A temporary workspace with an `apps/` directory
pub struct AppsFixture {
    pub temp: TempDir,
}

impl AppsFixture {
    pub fn new() -> anyhow::Result<Self> {
        let temp = TempDir::new()?;
        fs::create_dir(temp.path().join("apps"))?;
        Ok(Self { temp })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn apps_dir(&self) -> PathBuf {
        self.root().join("apps")
    }

    pub fn report_path(&self) -> PathBuf {
        self.root().join("bundle-comparison.json")
    }

    pub fn chart_path(&self) -> PathBuf {
        self.root().join("bundle-comparison.svg")
    }

    /// Create a Vite-style app whose entry loads one module script
    pub fn vite_app(&self, name: &str, script: &str) -> anyhow::Result<PathBuf> {
        let app = self.apps_dir().join(name);
        let assets = app.join("dist/assets");
        fs::create_dir_all(&assets)?;
        fs::write(
            app.join("dist/index.html"),
            r#"<!doctype html><html><head><script type="module" crossorigin src="/assets/index.js"></script></head><body></body></html>"#,
        )?;
        fs::write(assets.join("index.js"), script)?;
        Ok(app)
    }

    /// Create an app with a build directory but no entry document
    pub fn app_without_entry(&self, name: &str) -> anyhow::Result<PathBuf> {
        let app = self.apps_dir().join(name);
        fs::create_dir_all(app.join("build/static"))?;
        fs::write(app.join("build/static/main.js"), "void 0;")?;
        Ok(app)
    }

    /// Mark an app so [`FAILING_BUILD_COMMAND`] fails for it
    pub fn mark_failing(&self, name: &str) -> anyhow::Result<()> {
        fs::write(self.apps_dir().join(name).join(FAIL_MARKER), "")?;
        Ok(())
    }

    /// Write a config file with `[build]` set to `build_section` and return its path
    pub fn write_config(&self, build_section: &str) -> anyhow::Result<PathBuf> {
        let path = self.root().join("bundle-compare.toml");
        fs::write(
            &path,
            format!(
                "apps-dir = {apps:?}\nreport = {report:?}\nchart = {chart:?}\n\n[build]\n{build}\ntimeout-secs = 10\n",
                apps = self.apps_dir().display().to_string(),
                report = self.report_path().display().to_string(),
                chart = self.chart_path().display().to_string(),
                build = build_section,
            ),
        )?;
        Ok(path)
    }

    /// Write a report file directly
    pub fn write_report(&self, json: &str) -> anyhow::Result<PathBuf> {
        let path = self.report_path();
        fs::write(&path, json)?;
        Ok(path)
    }
}
