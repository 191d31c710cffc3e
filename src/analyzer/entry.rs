//! Locating an application's build output and its entry HTML document.
//!
//! Bundlers disagree on the output directory (`dist` for Vite-style tools, `build`
//! for others) and some nest the shell page below it (`dist/browser/index.html`,
//! `build/client/index.html`). The search is bounded and deterministic: directory
//! entries are visited depth-first in lexical file-name order, hidden directories
//! are skipped, and the first `index.html` wins.
//!
//! Output directory lookup, the direct `index.html` check and document reads go
//! through [`FileSystem`]. The nested search walks the real disk with `walkdir`.

use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::infra::{FileSystem, RealFileSystem};

/// Output directory names, in priority order.
pub const OUTPUT_DIR_CANDIDATES: [&str; 2] = ["dist", "build"];

/// File name of the application shell page.
pub const ENTRY_DOCUMENT_NAME: &str = "index.html";

/// How many directory levels below the output directory are searched.
pub const MAX_ENTRY_SEARCH_DEPTH: usize = 3;

/// An application's build artifacts directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// The directory that was found (`<app>/dist` or `<app>/build`)
    pub dir: PathBuf,
    /// Which conventional name matched
    pub dir_name: &'static str,
}

impl BuildOutput {
    /// Find the first existing output directory below `app_dir`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bundle_compare::analyzer::BuildOutput;
    /// use std::path::Path;
    ///
    /// if let Some(output) = BuildOutput::locate(Path::new("apps/vue")) {
    ///     println!("artifacts in {}", output.dir.display());
    /// }
    /// ```
    pub fn locate(app_dir: &Path) -> Option<Self> {
        Self::locate_with_fs(&RealFileSystem, app_dir)
    }

    /// Find the output directory with a custom filesystem implementation
    pub fn locate_with_fs<FS: FileSystem>(fs: &FS, app_dir: &Path) -> Option<Self> {
        OUTPUT_DIR_CANDIDATES.iter().find_map(|name| {
            let dir = app_dir.join(name);
            fs.is_dir(&dir).then_some(Self {
                dir,
                dir_name: *name,
            })
        })
    }

    /// Locate the entry document inside this output directory
    pub fn entry_document(&self) -> Option<EntryDocument> {
        self.entry_document_with_fs(&RealFileSystem)
    }

    /// Locate the entry document, checking `<dir>/index.html` through `fs` first
    pub fn entry_document_with_fs<FS: FileSystem>(&self, fs: &FS) -> Option<EntryDocument> {
        let direct = self.dir.join(ENTRY_DOCUMENT_NAME);
        let path = if fs.is_file(&direct) {
            Some(direct)
        } else {
            find_entry_document(&self.dir)
        };
        path.map(|path| EntryDocument { path })
    }
}

/// The located application shell page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDocument {
    /// Path to `index.html`
    pub path: PathBuf,
}

impl EntryDocument {
    /// Directory containing the document; references resolve against it
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Read the document text (lossy on invalid UTF-8)
    pub fn read(&self) -> io::Result<String> {
        self.read_with_fs(&RealFileSystem)
    }

    /// Read the document text through `fs`
    pub fn read_with_fs<FS: FileSystem>(&self, fs: &FS) -> io::Result<String> {
        let bytes = fs.read(&self.path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_string_lossy().starts_with('.')
}

/// Find the entry document for a build output directory.
///
/// `dir/index.html` is used when present. Otherwise directories up to
/// [`MAX_ENTRY_SEARCH_DEPTH`] levels down are searched depth-first in lexical
/// order and the first `index.html` file encountered is returned.
pub fn find_entry_document(dir: &Path) -> Option<PathBuf> {
    let direct = dir.join(ENTRY_DOCUMENT_NAME);
    if direct.is_file() {
        return Some(direct);
    }

    // Files inside a directory at depth N sit at walk depth N + 1
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(MAX_ENTRY_SEARCH_DEPTH + 1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden_dir(e))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("skipping unreadable entry while searching for index.html: {}", e);
                None
            }
        })
        .find(|entry| entry.file_type().is_file() && entry.file_name() == ENTRY_DOCUMENT_NAME)
        .map(DirEntry::into_path)
}
