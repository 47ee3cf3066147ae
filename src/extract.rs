//! Bookmark extraction: walk a directory tree, open each PDF via pdfium,
//! and resolve every outline entry to a 1-based page number.
//!
//! ## Why a two-step read-then-resolve?
//!
//! pdfium handles borrow the `Pdfium` instance and the document, so the raw
//! outline is first copied into an owned [`OutlineEntry`] tree while the
//! document is open, then resolved into flat [`Bookmark`]s by pure code.
//! Each document handle lives only inside [`extract_document`]: every
//! destination is resolved against the handle that produced its entry, and
//! the handle is dropped before the next file opens. A parse failure on one
//! document cannot leak state into the next one's processing.
//!
//! ## Failure containment
//!
//! A file that cannot be opened is skipped with a logged error and recorded
//! in the returned [`ScanOutput::skipped`]; an outline entry whose
//! destination does not resolve is skipped with a logged warning and
//! counted. Neither aborts the batch.

use crate::config::{IndexConfig, NestedOutlineMode};
use crate::error::{DocumentError, IndexError};
use crate::output::{Bookmark, BookmarkIndex, SkippedDocument};
use pdfium_render::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Title used for outline entries that carry no title string.
const UNTITLED: &str = "Untitled";

/// Everything the extraction phase produced.
#[derive(Debug)]
pub struct ScanOutput {
    /// Documents that contributed at least one resolved bookmark.
    pub index: BookmarkIndex,
    /// Documents skipped entirely, with the reason.
    pub skipped: Vec<SkippedDocument>,
    /// Candidate `.pdf` files found by the walk.
    pub scanned_files: usize,
    /// Outline entries dropped because their destination did not resolve.
    pub skipped_bookmarks: usize,
}

/// Extract bookmarks from every PDF under `root_dir`.
///
/// Fatal errors are limited to the scan root itself (missing, not a
/// directory, unreadable) and pdfium binding; everything below that is
/// contained per file or per entry.
pub fn extract(root_dir: &Path, config: &IndexConfig) -> Result<ScanOutput, IndexError> {
    let candidates = scan_pdf_files(root_dir)?;
    info!(
        "Found {} candidate PDF files under {}",
        candidates.len(),
        root_dir.display()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_scan_start(candidates.len());
    }

    let mut index = BookmarkIndex::new();
    let mut skipped = Vec::new();
    let mut skipped_bookmarks = 0usize;

    if candidates.is_empty() {
        if let Some(ref cb) = config.progress_callback {
            cb.on_scan_complete(0, 0);
        }
        return Ok(ScanOutput {
            index,
            skipped,
            scanned_files: 0,
            skipped_bookmarks,
        });
    }

    // Binding is deferred until at least one PDF needs opening, so an empty
    // scan never touches the pdfium library.
    let pdfium = bind_pdfium()?;

    for path in &candidates {
        match extract_document(&pdfium, path, config.nested_outlines) {
            Ok(extracted) => {
                skipped_bookmarks += extracted.dropped_entries;
                if let Some(ref cb) = config.progress_callback {
                    cb.on_document_indexed(path, extracted.bookmarks.len());
                }
                if extracted.bookmarks.is_empty() {
                    debug!("No bookmarks in {}", path.display());
                } else {
                    debug!(
                        "Indexed {} bookmarks from {}",
                        extracted.bookmarks.len(),
                        extracted.path
                    );
                    index.insert(extracted.path, extracted.bookmarks);
                }
            }
            Err(err) => {
                error!("{err}");
                if let Some(ref cb) = config.progress_callback {
                    cb.on_document_skipped(path, &err.to_string());
                }
                skipped.push(SkippedDocument {
                    path: path.clone(),
                    error: err,
                });
            }
        }
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_scan_complete(index.len(), skipped.len());
    }

    Ok(ScanOutput {
        index,
        skipped,
        scanned_files: candidates.len(),
        skipped_bookmarks,
    })
}

/// Recursively enumerate candidate `.pdf` files under `root_dir`.
///
/// Entries are sorted by name at every level so the scan order, and with it
/// the rendered output, is stable across runs.
pub fn scan_pdf_files(root_dir: &Path) -> Result<Vec<PathBuf>, IndexError> {
    if !root_dir.exists() {
        return Err(IndexError::InputDirNotFound {
            path: root_dir.to_path_buf(),
        });
    }
    if !root_dir.is_dir() {
        return Err(IndexError::NotADirectory {
            path: root_dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    walk(root_dir, root_dir, &mut files)?;
    Ok(files)
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), IndexError> {
    let reader = match fs::read_dir(dir) {
        Ok(r) => r,
        // An unreadable scan root is fatal; an unreadable subdirectory is
        // skipped like any other bad file.
        Err(e) if dir == root => {
            return Err(IndexError::InputDirUnreadable {
                path: dir.to_path_buf(),
                source: e,
            });
        }
        Err(e) => {
            warn!("Skipping unreadable directory {}: {}", dir.display(), e);
            return Ok(());
        }
    };

    let mut entries: Vec<PathBuf> = Vec::new();
    for entry in reader {
        match entry {
            Ok(entry) => entries.push(entry.path()),
            Err(e) => warn!("Skipping unreadable entry in {}: {}", dir.display(), e),
        }
    }
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk(root, &path, out)?;
        } else if is_pdf_candidate(&path) {
            out.push(path);
        }
    }
    Ok(())
}

/// Case-sensitive suffix match on `.pdf`, the original scan rule.
fn is_pdf_candidate(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".pdf"))
}

/// Bind to the pdfium library, honouring a `PDFIUM_LIB_PATH` override.
fn bind_pdfium() -> Result<Pdfium, IndexError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(lib) if !lib.is_empty() => Pdfium::bind_to_library(&lib),
        _ => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| IndexError::PdfiumBindingFailed(format!("{e:?}")))?;
    Ok(Pdfium::new(bindings))
}

/// Bookmarks extracted from one document.
struct ExtractedDocument {
    /// Absolute canonical path, as stored in the index.
    path: String,
    bookmarks: Vec<Bookmark>,
    dropped_entries: usize,
}

/// Open one PDF, read its outline, and resolve it to bookmarks.
fn extract_document(
    pdfium: &Pdfium,
    path: &Path,
    mode: NestedOutlineMode,
) -> Result<ExtractedDocument, DocumentError> {
    let canonical = fs::canonicalize(path).map_err(|e| DocumentError::Unreadable {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let document =
        pdfium
            .load_pdf_from_file(&canonical, None)
            .map_err(|e| DocumentError::OpenFailed {
                path: canonical.clone(),
                detail: format!("{e:?}"),
            })?;

    let outline = read_outline(&document);
    let mut dropped_entries = 0usize;
    let bookmarks = resolve_outline(&outline, mode, &canonical, &mut dropped_entries);

    Ok(ExtractedDocument {
        path: canonical.to_string_lossy().into_owned(),
        bookmarks,
        dropped_entries,
    })
}

/// An outline node copied out of pdfium into owned data.
#[derive(Debug, Clone)]
struct OutlineEntry {
    title: Option<String>,
    /// 0-based destination page index, `None` when the destination is
    /// missing or does not resolve to a page.
    page_index: Option<usize>,
    children: Vec<OutlineEntry>,
}

/// Copy the document's outline tree into owned [`OutlineEntry`] nodes.
fn read_outline(document: &PdfDocument<'_>) -> Vec<OutlineEntry> {
    document
        .bookmarks()
        .iter()
        .filter(|bookmark| bookmark.parent().is_none())
        .map(|bookmark| read_entry(&bookmark))
        .collect()
}

fn read_entry(bookmark: &PdfBookmark) -> OutlineEntry {
    let title = bookmark.title().map(|s| s.to_string());
    let page_index = bookmark
        .destination()
        .and_then(|dest| dest.page_index().ok())
        .map(|ix| ix as usize);

    let mut children = Vec::new();
    let mut child = bookmark.first_child();
    while let Some(c) = child {
        children.push(read_entry(&c));
        child = c.next_sibling();
    }

    OutlineEntry {
        title,
        page_index,
        children,
    }
}

/// Resolve an outline tree into the flat per-document bookmark sequence.
///
/// Entries whose destination did not resolve are skipped with a warning and
/// counted in `dropped`; their children (in flatten mode) are still
/// processed, since each outline entry carries its own destination.
fn resolve_outline(
    outline: &[OutlineEntry],
    mode: NestedOutlineMode,
    document: &Path,
    dropped: &mut usize,
) -> Vec<Bookmark> {
    let mut resolved = Vec::new();
    for entry in outline {
        resolve_entry(entry, mode, document, dropped, &mut resolved);
    }
    resolved
}

fn resolve_entry(
    entry: &OutlineEntry,
    mode: NestedOutlineMode,
    document: &Path,
    dropped: &mut usize,
    out: &mut Vec<Bookmark>,
) {
    let title = entry.title.clone().unwrap_or_else(|| UNTITLED.to_string());

    match entry.page_index {
        Some(ix) => {
            // pdfium page indices are 0-based; the index stores 1-based
            // page numbers.
            let page = ix + 1;
            debug!("'{}' -> page {} ({})", title, page, document.display());
            out.push(Bookmark::new(title, page));
        }
        None => {
            warn!(
                "Skipping bookmark '{}' in {}: destination did not resolve to a page",
                title,
                document.display()
            );
            *dropped += 1;
        }
    }

    if mode == NestedOutlineMode::FlattenDepthFirst {
        for child in &entry.children {
            resolve_entry(child, mode, document, dropped, out);
        }
    }
}
