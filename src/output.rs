//! Output types: the bookmark index and the run report.
//!
//! The central data product is [`BookmarkIndex`], a map from absolute
//! document path to the ordered list of bookmarks resolved from that
//! document. A `BTreeMap` keeps cross-document order deterministic (sorted
//! by path), which together with the sorted directory walk makes repeated
//! runs over unchanged input byte-identical.

use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A single resolved bookmark: title plus 1-based target page number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Bookmark title as stored in the PDF outline.
    pub title: String,
    /// Target page number, 1-based.
    pub page: usize,
}

impl Bookmark {
    pub fn new(title: impl Into<String>, page: usize) -> Self {
        Self {
            title: title.into(),
            page,
        }
    }
}

/// Map from absolute document path to its ordered bookmarks.
///
/// Invariant: every key holds a non-empty `Vec`. Documents that failed to
/// open, had no outline, or resolved zero bookmarks are absent, not present
/// with an empty list. Keys are strings (not `PathBuf`) because the index is
/// handed as-is to the template engine and to JSON output.
pub type BookmarkIndex = BTreeMap<String, Vec<Bookmark>>;

/// A candidate PDF that was skipped during extraction, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub error: DocumentError,
}

/// Counters and timings for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Candidate `.pdf` files found by the directory walk.
    pub scanned_files: usize,
    /// Documents that contributed at least one resolved bookmark.
    pub indexed_documents: usize,
    /// Documents skipped entirely (unreadable, corrupt).
    pub skipped_documents: usize,
    /// Bookmarks resolved across all documents.
    pub total_bookmarks: usize,
    /// Outline entries dropped because their destination did not resolve.
    pub skipped_bookmarks: usize,
    /// Wall-clock time of the scan + extraction phase.
    pub scan_duration_ms: u64,
    /// Wall-clock time of templating + writing (0 when nothing was rendered).
    pub render_duration_ms: u64,
    /// Wall-clock time of the whole run.
    pub total_duration_ms: u64,
}

/// Outcome of the render step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderResult {
    /// The HTML index was written to this path.
    Written(PathBuf),
    /// The index was empty; no output file was produced.
    EmptyIndex,
}

impl RenderResult {
    /// The written path, if any output was produced.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            RenderResult::Written(p) => Some(p),
            RenderResult::EmptyIndex => None,
        }
    }
}

/// Everything a run produced: the index itself, the documents that were
/// skipped, the render outcome, and the stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexOutput {
    pub index: BookmarkIndex,
    pub skipped: Vec<SkippedDocument>,
    pub render: RenderResult,
    pub stats: IndexStats,
}
