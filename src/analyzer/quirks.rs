//! Framework-specific corrections to the statically resolved file set.
//!
//! Resumability-style frameworks (Qwik) ship a serialized bundle graph
//! (`assets/bundle-graph-<hash>.json`) and fetch chunks at runtime from it. Those
//! chunks are referenced neither from the HTML nor through static imports, so the
//! resolver cannot see them. When the marker is present, every `.js` file in the
//! `assets` directory is counted.
//!
//! This is deliberately narrow: it applies only to an `assets` directory next to
//! the entry document and only when the bundle-graph marker exists.

use crate::infra::FileSystem;
use std::path::Path;

use super::resolver::{ResolvedBundle, ResolvedFile, SizeResolver};
use super::AnalysisError;

/// Directory, relative to the entry document, that holds runtime-loaded chunks.
pub const ASSETS_DIR_NAME: &str = "assets";

/// File-name prefix of the serialized bundle graph.
pub const BUNDLE_GRAPH_PREFIX: &str = "bundle-graph-";

/// File-name suffix of the serialized bundle graph.
pub const BUNDLE_GRAPH_SUFFIX: &str = ".json";

/// Whether `name` is a bundle-graph marker file
pub fn is_bundle_graph_marker(name: &str) -> bool {
    name.starts_with(BUNDLE_GRAPH_PREFIX) && name.ends_with(BUNDLE_GRAPH_SUFFIX)
}

/// Add runtime-graph chunks from `<entry_dir>/assets` to `bundle`.
///
/// Files already counted (same file name, any directory) are skipped. Returns the
/// number of files added; `0` when there is no `assets` directory or no marker.
pub fn apply_bundle_graph_quirk<FS: FileSystem>(
    bundle: &mut ResolvedBundle,
    entry_dir: &Path,
    resolver: &SizeResolver<FS>,
) -> Result<usize, AnalysisError> {
    let assets_dir = entry_dir.join(ASSETS_DIR_NAME);
    let fs = resolver.fs();
    if !fs.is_dir(&assets_dir) {
        return Ok(0);
    }

    let entries = fs
        .read_dir(&assets_dir)
        .map_err(|source| AnalysisError::Read {
            path: assets_dir.clone(),
            source,
        })?;
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();

    if !names.iter().any(|name| is_bundle_graph_marker(name)) {
        return Ok(0);
    }
    log::info!(
        "bundle graph marker found in {}, counting all assets/*.js",
        assets_dir.display()
    );

    let mut added = 0;
    for name in names.iter().filter(|name| name.ends_with(".js")) {
        if bundle.contains_file_name(name) {
            continue;
        }
        let sizes = resolver.measure_file(&assets_dir.join(name))?;
        bundle.push(ResolvedFile {
            path: format!("{}/{}", ASSETS_DIR_NAME, name),
            sizes,
        });
        added += 1;
    }

    Ok(added)
}
