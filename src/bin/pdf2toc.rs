//! CLI binary for pdf2toc.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `IndexConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2toc::{
    extract, generate, IndexConfig, NestedOutlineMode, RenderResult, ScanProgress,
    ScanProgressCallback,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar and a per-document
/// log line as each PDF is processed.
struct CliScanCallback {
    /// The single progress bar anchored at the bottom of the terminal.
    bar: ProgressBar,
    /// Count of documents that were skipped with an error.
    errors: AtomicUsize,
}

impl CliScanCallback {
    /// Create a callback whose progress-bar length is set by
    /// `on_scan_start` (called once the directory walk knows the total).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_scan_start

        // Initial style: spinner only (no counter until we know the total).
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Scanning");
        bar.set_message("Walking directory…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            errors: AtomicUsize::new(0),
        })
    }

    fn short_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

impl ScanProgressCallback for CliScanCallback {
    fn on_scan_start(&self, total_files: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total_files as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Extracting");
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Found {total_files} PDF files…"))
        ));
    }

    fn on_document_indexed(&self, path: &Path, bookmark_count: usize) {
        let name = Self::short_name(path);
        let detail = match bookmark_count {
            0 => dim("no bookmarks"),
            1 => dim("1 bookmark"),
            n => dim(&format!("{n} bookmarks")),
        };
        self.bar
            .println(format!("  {} {:<40}  {}", green("✓"), name, detail));
        self.bar.inc(1);
    }

    fn on_document_skipped(&self, path: &Path, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);
        let name = Self::short_name(path);

        // Truncate very long error messages to keep output tidy.
        let msg: String = if error.chars().count() > 80 {
            let mut truncated: String = error.chars().take(79).collect();
            truncated.push('\u{2026}');
            truncated
        } else {
            error.to_string()
        };

        self.bar
            .println(format!("  {} {:<40}  {}", red("✗"), name, red(&msg)));
        self.bar.inc(1);
    }

    fn on_scan_complete(&self, indexed: usize, skipped: usize) {
        self.bar.finish_and_clear();

        if skipped == 0 {
            eprintln!(
                "{} {} documents indexed",
                green("✔"),
                bold(&indexed.to_string())
            );
        } else {
            eprintln!(
                "{} {} documents indexed  ({} skipped)",
                cyan("⚠"),
                bold(&indexed.to_string()),
                red(&skipped.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Index every PDF under ./docs into ./out/bookmarks.html
  pdf2toc --input-dir docs --output-dir out

  # Custom output file name
  pdf2toc --input-dir docs --output-dir out --output-filename toc.html

  # Top-level bookmarks only (ignore nested outline levels)
  pdf2toc --input-dir docs --output-dir out --top-level-only

  # Use your own handlebars template
  pdf2toc --input-dir docs --output-dir out --template my_template.html.hbs

  # Print the raw index as JSON instead of writing HTML
  pdf2toc --input-dir docs --json

  # Per-bookmark diagnostics
  pdf2toc --input-dir docs --output-dir out --verbose

TEMPLATE CONTRACT:
  The template receives a single value, `bookmarks`: a map from absolute
  document path to an ordered list of { title, page } objects (page is
  1-based). The built-in template renders one <section> per document.

ENVIRONMENT VARIABLES:
  PDF2TOC_OUTPUT_FILENAME  Output file name (default: bookmarks.html)
  PDF2TOC_TEMPLATE         Path to a custom handlebars template
  PDF2TOC_VERBOSE          Enable DEBUG-level logs
  PDF2TOC_QUIET            Suppress all output except errors
  PDF2TOC_NO_PROGRESS      Disable the progress bar
  PDFIUM_LIB_PATH          Path to an existing libpdfium — skips auto-download

EXIT STATUS:
  Non-zero when the input directory is missing or the output file cannot be
  written. Unreadable PDFs and unresolvable bookmarks are logged and skipped;
  they do not fail the run.
"#;

/// Generate an HTML table of contents from the bookmarks of a directory of PDFs.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2toc",
    version,
    about = "Generate an HTML table of contents from the bookmarks of a directory of PDFs",
    long_about = "Recursively scan a directory for PDF files, read each file's bookmark \
(outline) tree, resolve every entry to its 1-based page number, and render a single \
navigable HTML index.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// The directory containing the input PDF files (scanned recursively).
    #[arg(long, short = 'i')]
    input_dir: PathBuf,

    /// Destination directory for the rendered HTML file (created if absent).
    /// Required unless --json is given.
    #[arg(long, short = 'o', required_unless_present = "json")]
    output_dir: Option<PathBuf>,

    /// Name of the output file inside the output directory.
    #[arg(
        long,
        env = "PDF2TOC_OUTPUT_FILENAME",
        default_value = pdf2toc::DEFAULT_OUTPUT_FILENAME
    )]
    output_filename: String,

    /// Index top-level bookmarks only; nested outline levels are ignored.
    #[arg(long)]
    top_level_only: bool,

    /// Path to a custom handlebars template file.
    #[arg(long, env = "PDF2TOC_TEMPLATE")]
    template: Option<PathBuf>,

    /// Print the extracted index as JSON to stdout instead of writing HTML.
    #[arg(long, env = "PDF2TOC_JSON")]
    json: bool,

    /// Remove the output directory if it is empty and no bookmarks were found.
    #[arg(long)]
    cleanup_empty_dir: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2TOC_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level logs (one line per resolved bookmark).
    #[arg(short, long, env = "PDF2TOC_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2TOC_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active; the
    // bar provides the per-document feedback. Verbose mode always wins so
    // per-bookmark diagnostics are visible regardless of the bar.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Ensure the PDFium engine is available ────────────────────────────
    // When compiled with `--features bundled` (default), the pdfium shared
    // library was embedded at compile time and only needs extracting.
    // Without `bundled`, the first run downloads it (~30 MB) into the user
    // cache; subsequent startups are an instant path check.
    #[cfg(feature = "bundled")]
    pdfium_auto::ensure_pdfium_bundled().context("Failed to extract bundled PDFium engine")?;

    #[cfg(not(feature = "bundled"))]
    if !pdfium_auto::is_pdfium_cached() {
        pdfium_auto::ensure_pdfium_library(None).context("Failed to download PDFium engine")?;
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ScanProgress> = if show_progress {
        Some(CliScanCallback::new_dynamic() as ScanProgress)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── JSON mode: extract only, print to stdout ─────────────────────────
    if cli.json {
        let scanned = extract(&cli.input_dir, &config).context("Extraction failed")?;
        let json = serde_json::to_string_pretty(&serde_json::json!({
            "bookmarks": scanned.index,
            "skipped": scanned.skipped,
        }))
        .context("Failed to serialise index")?;
        println!("{json}");
        return Ok(());
    }

    // ── Run generation ───────────────────────────────────────────────────
    let output_dir = cli
        .output_dir
        .as_ref()
        .expect("clap enforces --output-dir unless --json");
    let output = generate(&cli.input_dir, output_dir, &config)
        .context("Bookmark index generation failed")?;

    if !cli.quiet {
        match &output.render {
            RenderResult::Written(path) => {
                eprintln!(
                    "{}  {} bookmarks from {}/{} documents  {}ms  →  {}",
                    if output.stats.skipped_documents == 0 {
                        green("✔")
                    } else {
                        cyan("⚠")
                    },
                    output.stats.total_bookmarks,
                    output.stats.indexed_documents,
                    output.stats.scanned_files,
                    output.stats.total_duration_ms,
                    bold(&path.display().to_string()),
                );
                if output.stats.skipped_bookmarks > 0 {
                    eprintln!(
                        "   {}",
                        dim(&format!(
                            "{} bookmarks had unresolvable destinations",
                            output.stats.skipped_bookmarks
                        ))
                    );
                }
            }
            RenderResult::EmptyIndex => {
                eprintln!(
                    "{}  No bookmarks found under {} ({} files scanned); nothing written",
                    cyan("⚠"),
                    cli.input_dir.display(),
                    output.stats.scanned_files,
                );
            }
        }
    }

    Ok(())
}

/// Map CLI args to `IndexConfig`.
fn build_config(cli: &Cli, progress: Option<ScanProgress>) -> Result<IndexConfig> {
    let mut builder = IndexConfig::builder()
        .output_filename(&cli.output_filename)
        .cleanup_empty_output(cli.cleanup_empty_dir)
        .nested_outlines(if cli.top_level_only {
            NestedOutlineMode::TopLevelOnly
        } else {
            NestedOutlineMode::FlattenDepthFirst
        });

    if let Some(ref path) = cli.template {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template from {:?}", path))?;
        builder = builder.template(source);
    }

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
