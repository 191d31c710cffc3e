//! Measuring one built application: output directory, entry document, references,
//! transitive sizes, then framework quirks.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::analyzer::{
    apply_bundle_graph_quirk, extract_references, AnalysisError, BuildOutput, ResolvedBundle,
    SizeResolver,
};
use crate::infra::FileSystem;

/// Why a successfully built application could not be measured.
///
/// All variants are recorded in the report as `"Failed to measure"`; the variant
/// itself is only logged.
#[derive(Error, Debug)]
pub enum MeasureFailure {
    /// Neither `dist/` nor `build/` exists
    #[error("no dist/ or build/ directory in {}", app_dir.display())]
    NoOutputDirectory {
        /// Application directory
        app_dir: PathBuf,
    },

    /// No `index.html` within the search depth
    #[error("no index.html found under {}", output_dir.display())]
    NoEntryDocument {
        /// Output directory that was searched
        output_dir: PathBuf,
    },

    /// The entry document references no scripts
    #[error("no script references in {}", entry.display())]
    NoReferences {
        /// Entry document path
        entry: PathBuf,
    },

    /// The entry document could not be read
    #[error("failed to read entry document {}", entry.display())]
    Io {
        /// Entry document path
        entry: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// A referenced file could not be read or sized
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Measure the built application in `app_dir`.
///
/// Locates `dist/` (or `build/`), finds `index.html`, extracts its references,
/// resolves them transitively against the document's directory and finally adds
/// runtime-graph chunks when a bundle-graph marker is present.
pub fn measure_app<FS: FileSystem>(
    app_dir: &Path,
    resolver: &SizeResolver<FS>,
) -> Result<ResolvedBundle, MeasureFailure> {
    let fs = resolver.fs();
    let output =
        BuildOutput::locate_with_fs(fs, app_dir).ok_or_else(|| MeasureFailure::NoOutputDirectory {
            app_dir: app_dir.to_path_buf(),
        })?;
    log::debug!("using {} output in {}", output.dir_name, output.dir.display());

    let entry = output
        .entry_document_with_fs(fs)
        .ok_or_else(|| MeasureFailure::NoEntryDocument {
            output_dir: output.dir.clone(),
        })?;
    log::debug!("entry document {}", entry.path.display());

    let html = entry.read_with_fs(fs).map_err(|source| MeasureFailure::Io {
        entry: entry.path.clone(),
        source,
    })?;
    let references = extract_references(&html);
    if references.is_empty() {
        return Err(MeasureFailure::NoReferences {
            entry: entry.path.clone(),
        });
    }
    log::debug!("{} references in {}", references.len(), entry.path.display());

    let mut bundle = resolver.resolve(entry.dir(), references.iter())?;
    let added = apply_bundle_graph_quirk(&mut bundle, entry.dir(), resolver)?;
    if added > 0 {
        log::info!("added {} runtime-graph chunks for {}", added, app_dir.display());
    }

    Ok(bundle)
}
