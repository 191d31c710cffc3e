//! Transitive size resolution over the static import graph of built JavaScript.
//!
//! Starting from the references found in the entry document, every reachable file is
//! read once, sized (raw and gzip), and scanned for `import ... from "....js"`
//! statements whose targets are resolved against the importing file's own
//! directory. Traversal uses an explicit worklist and a visited set, so cyclic
//! imports terminate and stack depth stays flat on deep chunk graphs.
//!
//! Only the first [`DEFAULT_IMPORT_SCAN_BYTES`] of each file are scanned for imports:
//! bundlers hoist import statements to the top of a chunk, and scanning whole
//! multi-megabyte vendor bundles buys nothing. The bound is an approximation and is
//! exposed through [`ResolverOptions::import_scan_bytes`].

use crate::infra::{FileSystem, RealFileSystem};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::compression::{FileSizes, DEFAULT_COMPRESSION_LEVEL};
use super::AnalysisError;

/// Default number of leading bytes scanned for static imports in each file.
pub const DEFAULT_IMPORT_SCAN_BYTES: usize = 100_000;

static STATIC_IMPORT_RE: OnceLock<Regex> = OnceLock::new();

fn static_import_re() -> &'static Regex {
    STATIC_IMPORT_RE.get_or_init(|| {
        // SAFETY: literal pattern covered by the tests below; compilation cannot fail.
        Regex::new(r#"\bimport\b\s*(?:\{[^}]*\}|[^'"]*)?\s*from\s*["']([^"']+\.js)["']"#)
            .expect("static import regex is valid")
    })
}

/// Key used to decide whether a file has already been counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupStrategy {
    /// Normalised root-relative path: each file on disk is counted once.
    #[default]
    Path,
    /// Reference string as encountered during traversal: two spellings of the same
    /// file (`/assets/a.js` and `assets/a.js`) are counted separately. Matches the
    /// legacy measurement scripts.
    Reference,
}

impl DedupStrategy {
    /// Name as written in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Reference => "reference",
        }
    }
}

/// Tunables for a resolver run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Leading bytes of each file scanned for static imports
    pub import_scan_bytes: usize,
    /// Gzip level for compressed sizes
    pub compression_level: u32,
    /// Visited-set keying
    pub dedup: DedupStrategy,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            import_scan_bytes: DEFAULT_IMPORT_SCAN_BYTES,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            dedup: DedupStrategy::default(),
        }
    }
}

/// A file on disk counted towards an application's payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// Path relative to the entry document's directory, `/`-separated
    pub path: String,
    /// Raw and gzip sizes
    pub sizes: FileSizes,
}

impl ResolvedFile {
    /// File name component of [`ResolvedFile::path`]
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Accumulated result of a resolution: counted files in discovery order plus totals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedBundle {
    /// Files in the order they were counted
    pub files: Vec<ResolvedFile>,
    /// Sum over `files`
    pub totals: FileSizes,
}

impl ResolvedBundle {
    /// Count a file
    pub fn push(&mut self, file: ResolvedFile) {
        self.totals += file.sizes;
        self.files.push(file);
    }

    /// Whether a counted file has this file name (directory ignored)
    pub fn contains_file_name(&self, name: &str) -> bool {
        self.files.iter().any(|f| f.file_name() == name)
    }

    /// Whether nothing was counted
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Pending traversal step: the visited key and the root-relative location it names
struct WorkItem {
    key: String,
    rel_path: String,
}

/// Walks the static import graph below an entry directory and sizes what it finds
///
/// # Examples
///
/// ```no_run
/// use bundle_compare::analyzer::{extract_references, ResolverOptions, SizeResolver};
/// use std::path::Path;
///
/// let entry_dir = Path::new("apps/react-19/dist");
/// let html = std::fs::read_to_string(entry_dir.join("index.html"))?;
/// let refs = extract_references(&html);
///
/// let resolver = SizeResolver::new(ResolverOptions::default());
/// let bundle = resolver.resolve(entry_dir, refs.iter())?;
/// println!("{} files, {} bytes gzip", bundle.files.len(), bundle.totals.gzip_bytes);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct SizeResolver<FS: FileSystem = RealFileSystem> {
    options: ResolverOptions,
    fs: FS,
}

impl SizeResolver<RealFileSystem> {
    /// Create a resolver over the real filesystem
    pub fn new(options: ResolverOptions) -> Self {
        Self::with_fs(options, RealFileSystem)
    }
}

impl<FS: FileSystem> SizeResolver<FS> {
    /// Create a resolver with a custom filesystem implementation
    pub fn with_fs(options: ResolverOptions, fs: FS) -> Self {
        Self { options, fs }
    }

    /// Options this resolver runs with
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Filesystem this resolver reads through
    pub fn fs(&self) -> &FS {
        &self.fs
    }

    /// Resolve `seeds` against `base_dir` and follow static imports transitively.
    ///
    /// References that do not name an existing file (CDN URLs, stale hashes) are
    /// dropped without error. Read failures on files that do exist are errors.
    pub fn resolve<'a, I>(&self, base_dir: &Path, seeds: I) -> Result<ResolvedBundle, AnalysisError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut bundle = ResolvedBundle::default();
        let mut visited: HashSet<String> = HashSet::new();

        let seeds: Vec<&str> = seeds.into_iter().collect();
        let mut worklist: Vec<WorkItem> = seeds
            .iter()
            .rev()
            .map(|seed| self.work_item(seed, within_root("", seed)))
            .collect();

        while let Some(item) = worklist.pop() {
            if visited.contains(&item.key) {
                continue;
            }

            let full_path = base_dir.join(&item.rel_path);
            if item.rel_path.is_empty() || !self.fs.is_file(&full_path) {
                log::debug!("dropping unresolved reference {}", item.key);
                continue;
            }
            visited.insert(item.key.clone());

            let contents = self.read(&full_path)?;
            let sizes = FileSizes::measure(&contents, self.options.compression_level).map_err(
                |source| AnalysisError::Compress {
                    path: full_path.clone(),
                    source,
                },
            )?;
            log::debug!(
                "counted {} ({} B raw, {} B gzip)",
                item.rel_path,
                sizes.raw_bytes,
                sizes.gzip_bytes
            );

            let imports = self.scan_imports(&contents);
            bundle.push(ResolvedFile {
                path: item.rel_path.clone(),
                sizes,
            });

            // Reverse so the first import is processed next (depth-first, source order)
            for import in imports.iter().rev() {
                let key_path = join_posix(parent_posix(&item.key), import);
                let rel_path = within_root(parent_posix(&item.rel_path), import);
                log::trace!("{} imports {}", item.rel_path, rel_path);
                worklist.push(self.work_item(&key_path, rel_path));
            }
        }

        Ok(bundle)
    }

    /// Read and size a single file, for callers that add files outside the import graph.
    pub fn measure_file(&self, path: &Path) -> Result<FileSizes, AnalysisError> {
        let contents = self.read(path)?;
        FileSizes::measure(&contents, self.options.compression_level).map_err(|source| {
            AnalysisError::Compress {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, AnalysisError> {
        self.fs.read(path).map_err(|source| AnalysisError::Read {
            path: PathBuf::from(path),
            source,
        })
    }

    /// Static import targets in the scanned prefix of `contents`, in source order
    fn scan_imports(&self, contents: &[u8]) -> Vec<String> {
        let end = contents.len().min(self.options.import_scan_bytes);
        let text = String::from_utf8_lossy(&contents[..end]);
        static_import_re()
            .captures_iter(&text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }

    fn work_item(&self, reference: &str, rel_path: String) -> WorkItem {
        let key = match self.options.dedup {
            DedupStrategy::Path => rel_path.clone(),
            DedupStrategy::Reference => reference.to_string(),
        };
        WorkItem { key, rel_path }
    }
}

/// Lexically normalise a `/`-separated path: drop `.` and empty segments, fold `..`.
///
/// A leading `/` is preserved; `..` above an absolute root is discarded.
fn normalize_posix(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Join `child` onto `dir` and normalise, `path.posix.join` style
fn join_posix(dir: &str, child: &str) -> String {
    normalize_posix(&format!("{}/{}", dir, child))
}

/// Directory part of a `/`-separated path (`"."` when there is none)
fn parent_posix(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => ".",
    }
}

/// Resolve `reference` from the root-relative directory `dir`, clamped at the root.
///
/// `..` segments never climb above the entry directory, so the result is always
/// root-relative (`""` for the root itself).
fn within_root(dir: &str, reference: &str) -> String {
    let dir = dir.trim_start_matches('/');
    let rooted_dir = if dir == "." { "/".to_string() } else { format!("/{}", dir) };
    root_relative(&join_posix(&rooted_dir, reference))
}

/// Root-relative form of a normalised reference: no leading separators, no `.`
fn root_relative(normalized: &str) -> String {
    let trimmed = normalized.trim_start_matches('/');
    if trimmed == "." {
        String::new()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::compression::gzip_len;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, contents: &[u8]) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn gz(data: &[u8]) -> u64 {
        gzip_len(data, DEFAULT_COMPRESSION_LEVEL).unwrap()
    }

    fn resolve(dir: &Path, seeds: &[&str]) -> ResolvedBundle {
        SizeResolver::new(ResolverOptions::default())
            .resolve(dir, seeds.iter().copied())
            .unwrap()
    }

    fn paths(bundle: &ResolvedBundle) -> Vec<&str> {
        bundle.files.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn test_entry_with_one_static_import_sums_both_files() {
        let temp = TempDir::new().unwrap();
        let mut main = b"import {x} from \"./chunk.js\";\nconsole.log(x);\n".to_vec();
        main.resize(500, b' ');
        let mut chunk = b"export const x = 1;\n".to_vec();
        chunk.resize(300, b'/');
        write(temp.path(), "main.js", &main);
        write(temp.path(), "chunk.js", &chunk);

        let bundle = resolve(temp.path(), &["main.js"]);

        assert_eq!(paths(&bundle), vec!["main.js", "chunk.js"]);
        assert_eq!(bundle.totals.raw_bytes, 800);
        assert_eq!(bundle.totals.gzip_bytes, gz(&main) + gz(&chunk));
    }

    #[test]
    fn test_self_import_is_counted_once() {
        let temp = TempDir::new().unwrap();
        let content = b"import { a } from './self.js'; export const a = 1;";
        write(temp.path(), "self.js", content);

        let bundle = resolve(temp.path(), &["self.js"]);

        assert_eq!(bundle.files.len(), 1);
        assert_eq!(bundle.totals.raw_bytes, content.len() as u64);
    }

    #[test]
    fn test_import_cycle_terminates_counting_each_file_once() {
        let temp = TempDir::new().unwrap();
        let a = b"import { b } from './b.js'; export const a = 1;";
        let b = b"import { a } from './a.js'; export const b = 2;";
        write(temp.path(), "assets/a.js", a);
        write(temp.path(), "assets/b.js", b);

        let bundle = resolve(temp.path(), &["/assets/a.js"]);

        assert_eq!(paths(&bundle), vec!["assets/a.js", "assets/b.js"]);
        assert_eq!(bundle.totals.raw_bytes, (a.len() + b.len()) as u64);
    }

    #[test]
    fn test_missing_reference_contributes_nothing() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "main.js", b"console.log(1)");

        let bundle = resolve(
            temp.path(),
            &["main.js", "missing.js", "https://cdn.example.com/lib.js"],
        );

        assert_eq!(paths(&bundle), vec!["main.js"]);
        assert_eq!(bundle.totals.raw_bytes, 14);
    }

    #[test]
    fn test_imports_resolve_against_importing_file_directory() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "assets/entry/main.js",
            b"import { h } from '../shared/h.js';",
        );
        write(temp.path(), "assets/shared/h.js", b"export const h = 0;");
        // Decoy at the base directory must not be picked up
        write(temp.path(), "shared/h.js", b"decoy");

        let bundle = resolve(temp.path(), &["/assets/entry/main.js"]);

        assert_eq!(
            paths(&bundle),
            vec!["assets/entry/main.js", "assets/shared/h.js"]
        );
    }

    #[test]
    fn test_parent_imports_are_clamped_at_entry_directory() {
        let outer = TempDir::new().unwrap();
        let dist = outer.path().join("dist");
        write(&dist, "assets/a.js", b"import x from '../../x.js';");
        write(&dist, "x.js", b"export default 1;");
        // Decoy next to the build output must never be read
        write(outer.path(), "x.js", b"decoy outside the entry directory");

        let bundle = resolve(&dist, &["/assets/a.js"]);

        assert_eq!(paths(&bundle), vec!["assets/a.js", "x.js"]);
        assert_eq!(
            bundle.totals.raw_bytes,
            (b"import x from '../../x.js';".len() + b"export default 1;".len()) as u64
        );
    }

    #[test]
    fn test_parent_seed_is_clamped_at_entry_directory() {
        let outer = TempDir::new().unwrap();
        let dist = outer.path().join("dist");
        write(&dist, "index.js", b"void 0;");
        write(outer.path(), "index.js", b"decoy");

        let bundle = resolve(&dist, &["../index.js"]);

        assert_eq!(paths(&bundle), vec!["index.js"]);
        assert_eq!(bundle.totals.raw_bytes, 7);
    }

    #[test]
    fn test_within_root_never_escapes() {
        assert_eq!(within_root("assets", "../../x.js"), "x.js");
        assert_eq!(within_root(".", "./chunk.js"), "chunk.js");
        assert_eq!(within_root("", "/assets/a.js"), "assets/a.js");
        assert_eq!(within_root("a/b", "../c.js"), "a/c.js");
        assert_eq!(within_root("", ".."), "");
    }

    #[test]
    fn test_traversal_is_depth_first_in_source_order() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "main.js",
            b"import a from './a.js';\nimport b from './b.js';",
        );
        write(temp.path(), "a.js", b"import { c } from './c.js';");
        write(temp.path(), "b.js", b"export default 2");
        write(temp.path(), "c.js", b"export const c = 3");

        let bundle = resolve(temp.path(), &["main.js"]);

        assert_eq!(paths(&bundle), vec!["main.js", "a.js", "c.js", "b.js"]);
    }

    #[test]
    fn test_minified_imports_without_whitespace_are_followed() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "index.js",
            b"import{r as e,j as t}from\"./vendor.js\";import*as n from\"./ns.js\";",
        );
        write(temp.path(), "vendor.js", b"export{}");
        write(temp.path(), "ns.js", b"export{}");

        let bundle = resolve(temp.path(), &["index.js"]);

        assert_eq!(paths(&bundle), vec!["index.js", "vendor.js", "ns.js"]);
    }

    #[test]
    fn test_non_js_and_side_effect_imports_are_not_followed() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "main.js",
            b"import data from './data.json';\nimport './side.js';\nconst important = 1;",
        );
        write(temp.path(), "data.json", b"{}");
        write(temp.path(), "side.js", b"");

        let bundle = resolve(temp.path(), &["main.js"]);

        assert_eq!(paths(&bundle), vec!["main.js"]);
    }

    #[test]
    fn test_imports_beyond_scan_limit_are_ignored() {
        let temp = TempDir::new().unwrap();
        let mut main = vec![b' '; 64];
        main.extend_from_slice(b"import { late } from './late.js';");
        write(temp.path(), "main.js", &main);
        write(temp.path(), "late.js", b"export const late = 1");

        let options = ResolverOptions {
            import_scan_bytes: 32,
            ..Default::default()
        };
        let bundle = SizeResolver::new(options)
            .resolve(temp.path(), ["main.js"])
            .unwrap();

        assert_eq!(paths(&bundle), vec!["main.js"]);
    }

    #[test]
    fn test_path_dedup_counts_differently_spelled_references_once() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "assets/app.js", b"import { v } from './vendor.js';");
        write(temp.path(), "assets/vendor.js", b"export const v = 1;");

        let bundle = resolve(temp.path(), &["/assets/app.js", "assets/vendor.js"]);

        assert_eq!(paths(&bundle), vec!["assets/app.js", "assets/vendor.js"]);
    }

    #[test]
    fn test_reference_dedup_counts_each_spelling() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "assets/app.js", b"import { v } from './vendor.js';");
        write(temp.path(), "assets/vendor.js", b"export const v = 1;");

        let options = ResolverOptions {
            dedup: DedupStrategy::Reference,
            ..Default::default()
        };
        let bundle = SizeResolver::new(options)
            .resolve(temp.path(), ["/assets/app.js", "assets/vendor.js"])
            .unwrap();

        // "/assets/vendor.js" (via import) and "assets/vendor.js" (seed) differ as strings
        assert_eq!(
            paths(&bundle),
            vec!["assets/app.js", "assets/vendor.js", "assets/vendor.js"]
        );
    }

    #[test]
    fn test_reference_dedup_still_terminates_on_cycles() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.js", b"import { b } from './b.js';");
        write(temp.path(), "b.js", b"import { a } from './a.js';");

        let options = ResolverOptions {
            dedup: DedupStrategy::Reference,
            ..Default::default()
        };
        let bundle = SizeResolver::new(options)
            .resolve(temp.path(), ["a.js"])
            .unwrap();

        assert_eq!(bundle.files.len(), 2);
    }

    #[test]
    fn test_directory_reference_is_dropped() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("assets.js")).unwrap();

        let bundle = resolve(temp.path(), &["assets.js", "/", "."]);

        assert!(bundle.is_empty());
    }

    #[test]
    fn test_normalize_posix_handles_dots_and_parents() {
        assert_eq!(normalize_posix("./a/./b.js"), "a/b.js");
        assert_eq!(normalize_posix("a/../b.js"), "b.js");
        assert_eq!(normalize_posix("../x.js"), "../x.js");
        assert_eq!(normalize_posix("/assets/../x.js"), "/x.js");
        assert_eq!(normalize_posix("/../x.js"), "/x.js");
        assert_eq!(normalize_posix("//cdn.example.com/x.js"), "/cdn.example.com/x.js");
        assert_eq!(normalize_posix(""), ".");
    }

    #[test]
    fn test_parent_posix() {
        assert_eq!(parent_posix("/assets/a.js"), "/assets");
        assert_eq!(parent_posix("assets/a.js"), "assets");
        assert_eq!(parent_posix("a.js"), ".");
        assert_eq!(parent_posix("/a.js"), "/");
    }

    #[test]
    fn test_resolved_file_name() {
        let file = ResolvedFile {
            path: "assets/deep/q-abc.js".to_string(),
            sizes: FileSizes::default(),
        };
        assert_eq!(file.file_name(), "q-abc.js");
    }
}
