//! Top-level orchestration: scan, extract, render, write.
//!
//! One linear synchronous pass per run:
//!
//! ```text
//! SCANNING -> EXTRACTING -> EMPTY ............. done, nothing written
//!                        -> RENDERING -> WRITING -> done, HTML on disk
//! ```
//!
//! Exactly one terminal state is reached per invocation; there are no
//! retries. Document- and entry-level failures are contained inside the
//! extractor, so the only fatal outcomes here are a bad scan root and a
//! failed output write.

use crate::config::IndexConfig;
use crate::error::IndexError;
use crate::extract;
use crate::output::{IndexOutput, IndexStats, RenderResult};
use crate::render;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Scan `input_dir`, extract all bookmarks, and render the HTML index into
/// `output_dir`.
///
/// # Returns
/// `Ok(IndexOutput)` on success, even when some documents were skipped
/// (check `output.skipped`) or when the index was empty and nothing was
/// written (check `output.render`).
///
/// # Errors
/// Returns `Err(IndexError)` only for fatal errors:
/// - `input_dir` missing, not a directory, or unreadable
/// - the template failed to render
/// - the output file could not be written
pub fn generate(
    input_dir: &Path,
    output_dir: &Path,
    config: &IndexConfig,
) -> Result<IndexOutput, IndexError> {
    let total_start = Instant::now();
    info!("Indexing bookmarks under {}", input_dir.display());

    // ── Step 1: Scan and extract ─────────────────────────────────────────
    let scan_start = Instant::now();
    let scanned = extract::extract(input_dir, config)?;
    let scan_duration_ms = scan_start.elapsed().as_millis() as u64;
    info!(
        "Extracted {} bookmarks from {}/{} documents in {}ms",
        scanned.index.values().map(Vec::len).sum::<usize>(),
        scanned.index.len(),
        scanned.scanned_files,
        scan_duration_ms
    );

    // ── Step 2: Empty index short-circuits the render ────────────────────
    if scanned.index.is_empty() {
        warn!(
            "No bookmarks were found in the {} directory; no output file written",
            input_dir.display()
        );
        if config.cleanup_empty_output {
            render::remove_empty_output_dir(output_dir);
        }
        return Ok(assemble_output(
            scanned,
            RenderResult::EmptyIndex,
            scan_duration_ms,
            0,
            total_start,
        ));
    }

    // ── Step 3: Render and write ─────────────────────────────────────────
    let render_start = Instant::now();
    let html = render::render_html(&scanned.index, config)?;
    let written = render::write_index(&html, output_dir, &config.output_filename)?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    Ok(assemble_output(
        scanned,
        RenderResult::Written(written),
        scan_duration_ms,
        render_duration_ms,
        total_start,
    ))
}

fn assemble_output(
    scanned: extract::ScanOutput,
    render: RenderResult,
    scan_duration_ms: u64,
    render_duration_ms: u64,
    total_start: Instant,
) -> IndexOutput {
    let stats = IndexStats {
        scanned_files: scanned.scanned_files,
        indexed_documents: scanned.index.len(),
        skipped_documents: scanned.skipped.len(),
        total_bookmarks: scanned.index.values().map(Vec::len).sum(),
        skipped_bookmarks: scanned.skipped_bookmarks,
        scan_duration_ms,
        render_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    IndexOutput {
        index: scanned.index,
        skipped: scanned.skipped,
        render,
        stats,
    }
}
