//! Bundle analysis: from a built application's output directory to the set of
//! JavaScript files a first visit downloads and their combined sizes.
//!
//! - [`entry`] locates the output directory and the `index.html` shell page
//! - [`references`] extracts script and preload references from that page
//! - [`resolver`] follows static imports transitively and sizes each file once
//! - [`compression`] computes raw and gzip sizes
//! - [`quirks`] adds runtime-graph chunks for resumability-style frameworks

pub mod compression;
pub mod entry;
pub mod quirks;
pub mod references;
pub mod resolver;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use compression::{gzip_len, FileSizes, DEFAULT_COMPRESSION_LEVEL};
pub use entry::{find_entry_document, BuildOutput, EntryDocument};
pub use quirks::apply_bundle_graph_quirk;
pub use references::{extract_references, ReferenceSet};
pub use resolver::{
    DedupStrategy, ResolvedBundle, ResolvedFile, ResolverOptions, SizeResolver,
    DEFAULT_IMPORT_SCAN_BYTES,
};

/// Errors raised while sizing files that were found on disk
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Reading a file or directory failed
    #[error("Failed to read {}", path.display())]
    Read {
        /// Path being read
        path: PathBuf,
        #[source]
        /// IO error source
        source: io::Error,
    },

    /// The gzip encoder failed
    #[error("Failed to compress {}", path.display())]
    Compress {
        /// Path being sized
        path: PathBuf,
        #[source]
        /// IO error source
        source: io::Error,
    },
}
