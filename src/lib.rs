//! # pdf2toc
//!
//! Build a single HTML table of contents from the bookmarks of a directory
//! of PDF files.
//!
//! ## Why this crate?
//!
//! A folder full of PDFs (manuals, standards, papers) has no combined
//! navigation: to find "Chapter 7" you open each file in turn. This crate
//! walks a directory tree, reads every PDF's internal outline via pdfium,
//! resolves each bookmark to its 1-based page number, and renders one
//! templated HTML page mapping every document to its bookmarks.
//!
//! ## Pipeline Overview
//!
//! ```text
//! directory tree
//!  │
//!  ├─ 1. Scan     recursive walk, case-sensitive *.pdf candidates
//!  ├─ 2. Extract  per-document outline traversal + page resolution (pdfium)
//!  ├─ 3. Render   handlebars template over the bookmark index
//!  └─ 4. Write    {output_dir}/{filename}, UTF-8, overwrite
//! ```
//!
//! The run is one linear synchronous pass. Failures are contained at the
//! granularity they occur: a corrupt PDF skips that file, a dangling
//! bookmark destination skips that entry, and only a missing input
//! directory or a failed output write aborts the run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2toc::{generate, IndexConfig, RenderResult};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = IndexConfig::default();
//!     let output = generate(Path::new("docs"), Path::new("out"), &config)?;
//!     match output.render {
//!         RenderResult::Written(path) => println!("index at {}", path.display()),
//!         RenderResult::EmptyIndex => println!("no bookmarks found"),
//!     }
//!     eprintln!(
//!         "{} bookmarks from {} documents",
//!         output.stats.total_bookmarks, output.stats.indexed_documents
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature   | Default | Description |
//! |-----------|---------|-------------|
//! | `cli`     | on      | Enables the `pdf2toc` binary (clap + anyhow + tracing-subscriber + indicatif) |
//! | `bundled` | on      | Embeds the pdfium shared library via pdfium-auto |
//!
//! Disable both when using only the library:
//! ```toml
//! pdf2toc = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod generate;
pub mod output;
pub mod progress;
pub mod render;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{IndexConfig, IndexConfigBuilder, NestedOutlineMode, DEFAULT_OUTPUT_FILENAME};
pub use error::{DocumentError, IndexError};
pub use extract::{extract, scan_pdf_files, ScanOutput};
pub use generate::generate;
pub use output::{Bookmark, BookmarkIndex, IndexOutput, IndexStats, RenderResult, SkippedDocument};
pub use progress::{NoopScanCallback, ScanProgress, ScanProgressCallback};
pub use render::{render_html, write_index, DEFAULT_TEMPLATE};
