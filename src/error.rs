//! Error types for the pdf2toc library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`IndexError`] — **Fatal**: the run cannot proceed at all (input
//!   directory missing, template broken, output not writable). Returned as
//!   `Err(IndexError)` from the top-level `generate`/`extract`/`render`
//!   functions.
//!
//! * [`DocumentError`] — **Non-fatal**: a single PDF could not be read
//!   (corrupt file, unsupported encryption, I/O error) but every other
//!   document in the scan is fine. Stored inside
//!   [`crate::output::SkippedDocument`] so callers can inspect partial
//!   success rather than losing the whole batch to one bad file.
//!
//! Failures below document granularity (a single bookmark whose destination
//! cannot be resolved) are contained inside the extractor: the entry is
//! skipped, a diagnostic is logged, and `skipped_bookmarks` is bumped in
//! [`crate::output::IndexStats`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2toc library.
///
/// Document-level failures use [`DocumentError`] and are stored in
/// [`crate::output::SkippedDocument`] rather than propagated here.
#[derive(Debug, Error)]
pub enum IndexError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The scan root does not exist.
    #[error("Input directory not found: '{path}'\nCreate it and add PDF files to it.")]
    InputDirNotFound { path: PathBuf },

    /// The scan root exists but is not a directory.
    #[error("Input path '{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    /// The scan root exists but cannot be read.
    #[error("Failed to read input directory '{path}': {source}")]
    InputDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Render errors ─────────────────────────────────────────────────────
    /// The handlebars template failed to parse or render.
    #[error("Failed to render the bookmark index template: {detail}")]
    TemplateFailed { detail: String },

    /// Could not create the output directory or write the HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
PDFium is normally provisioned automatically at startup.\n\
If that failed, set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single PDF document.
///
/// Stored in [`crate::output::SkippedDocument`] when a candidate file is
/// skipped. The overall scan continues with the remaining files.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum DocumentError {
    /// pdfium could not open or parse the file.
    #[error("Failed to open '{path}' as a PDF: {detail}")]
    OpenFailed { path: PathBuf, detail: String },

    /// The file could not be read or its path could not be canonicalized.
    #[error("Failed to read '{path}': {detail}")]
    Unreadable { path: PathBuf, detail: String },
}

impl DocumentError {
    /// The path of the document this error belongs to.
    pub fn path(&self) -> &PathBuf {
        match self {
            DocumentError::OpenFailed { path, .. } => path,
            DocumentError::Unreadable { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_dir_not_found_display() {
        let e = IndexError::InputDirNotFound {
            path: PathBuf::from("/no/such/dir"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/no/such/dir"), "got: {msg}");
    }

    #[test]
    fn output_write_failed_keeps_source() {
        use std::error::Error;
        let e = IndexError::OutputWriteFailed {
            path: PathBuf::from("/out/bookmarks.html"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("bookmarks.html"));
        assert!(e.source().is_some());
    }

    #[test]
    fn document_error_exposes_path() {
        let e = DocumentError::OpenFailed {
            path: PathBuf::from("/docs/broken.pdf"),
            detail: "bad xref".into(),
        };
        assert_eq!(e.path(), &PathBuf::from("/docs/broken.pdf"));
        assert!(e.to_string().contains("bad xref"));
    }
}
