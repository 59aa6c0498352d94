//! Batch directory processing: source documents → curriculum collection.
//!
//! One document is parsed fully before the next begins; the whole pipeline
//! is synchronous. Files are visited in sorted-filename order so the
//! collection's last-write-wins collision policy is deterministic.

use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

use curricula_extract::extract_document;
use curricula_shared::{CurriculaError, CurriculumCollection, Result, derive_program_key};

/// Configuration for processing one source directory.
#[derive(Debug, Clone)]
pub struct ProcessDirConfig {
    /// Directory of rendered document text files.
    pub dir: PathBuf,
    /// Extension of the documents to process (matched case-insensitively).
    pub source_ext: String,
    /// Directory label used in rows and artifacts. Defaults to the
    /// directory's basename.
    pub label: Option<String>,
}

/// Result of processing one directory.
#[derive(Debug, Clone)]
pub struct ProcessDirResult {
    /// Directory label.
    pub directory: String,
    /// Accumulated collection, keyed by derived program name.
    pub collection: CurriculumCollection,
    /// Documents successfully extracted.
    pub documents_processed: usize,
    /// Documents skipped after a read failure.
    pub documents_failed: usize,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each document is extracted.
    fn document_processed(&self, name: &str, current: usize, total: usize);
    /// Called when the directory completes.
    fn done(&self, result: &ProcessDirResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn document_processed(&self, _name: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &ProcessDirResult) {}
}

/// Process every document in a directory into one collection.
///
/// A missing directory is a valid terminal state: it logs and yields an
/// empty collection. A document that cannot be read is logged and skipped —
/// no single document aborts the batch.
#[instrument(skip_all, fields(dir = %config.dir.display()))]
pub fn process_directory(
    config: &ProcessDirConfig,
    progress: &dyn ProgressReporter,
) -> Result<ProcessDirResult> {
    let directory = directory_label(config);

    if !config.dir.is_dir() {
        warn!(dir = %config.dir.display(), "source directory not found, nothing to process");
        let result = ProcessDirResult {
            directory,
            collection: CurriculumCollection::new(),
            documents_processed: 0,
            documents_failed: 0,
        };
        progress.done(&result);
        return Ok(result);
    }

    progress.phase("Listing documents");
    let files = list_documents(&config.dir, &config.source_ext)?;
    let total = files.len();

    progress.phase("Extracting documents");
    let mut collection = CurriculumCollection::new();
    let mut failed = 0usize;

    for (i, path) in files.iter().enumerate() {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match std::fs::read_to_string(path) {
            Ok(text) => {
                let document = extract_document(&text);
                collection.insert(derive_program_key(&file_name), document);
                progress.document_processed(&file_name, i + 1, total);
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to read document, skipping");
                failed += 1;
            }
        }
    }

    let result = ProcessDirResult {
        directory,
        documents_processed: total - failed,
        documents_failed: failed,
        collection,
    };

    info!(
        directory = %result.directory,
        processed = result.documents_processed,
        failed = result.documents_failed,
        programs = result.collection.len(),
        "directory processed"
    );

    progress.done(&result);
    Ok(result)
}

/// The label used for this directory in rows and artifacts.
fn directory_label(config: &ProcessDirConfig) -> String {
    config.label.clone().unwrap_or_else(|| {
        config
            .dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.dir.display().to_string())
    })
}

/// List the document files to process, in sorted-filename order.
fn list_documents(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| CurriculaError::io(dir, e))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_extension(path, ext))
        .collect();

    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
