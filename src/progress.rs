//! Progress-callback trait for per-document scan events.
//!
//! Inject an [`Arc<dyn ScanProgressCallback>`] via
//! [`crate::config::IndexConfigBuilder::progress_callback`] to receive an
//! event as each candidate PDF is processed.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a terminal progress bar, a log, or a database
//! record without the library knowing how the host application
//! communicates. The scan is single-threaded, so implementations are called
//! strictly in scan order; the trait is still `Send + Sync` so the same
//! callback value can be shared with other threads of the host application.

use std::path::Path;
use std::sync::Arc;

/// Called by the extractor as it processes each candidate PDF.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ScanProgressCallback: Send + Sync {
    /// Called once after the directory walk, before any PDF is opened.
    ///
    /// # Arguments
    /// * `total_files` — number of candidate `.pdf` files found
    fn on_scan_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called when a document's bookmarks were extracted successfully.
    ///
    /// # Arguments
    /// * `path`           — absolute path of the document
    /// * `bookmark_count` — bookmarks resolved from it (may be 0; such
    ///   documents do not appear in the index)
    fn on_document_indexed(&self, path: &Path, bookmark_count: usize) {
        let _ = (path, bookmark_count);
    }

    /// Called when a document was skipped entirely.
    ///
    /// # Arguments
    /// * `path`  — path of the skipped file
    /// * `error` — human-readable reason
    fn on_document_skipped(&self, path: &Path, error: &str) {
        let _ = (path, error);
    }

    /// Called once after the last candidate file has been attempted.
    ///
    /// # Arguments
    /// * `indexed` — documents that contributed bookmarks
    /// * `skipped` — documents skipped with an error
    fn on_scan_complete(&self, indexed: usize, skipped: usize) {
        let _ = (indexed, skipped);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopScanCallback;

impl ScanProgressCallback for NoopScanCallback {}

/// Convenience alias matching the type stored in [`crate::config::IndexConfig`].
pub type ScanProgress = Arc<dyn ScanProgressCallback>;
