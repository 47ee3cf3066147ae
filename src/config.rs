//! Configuration types for bookmark index generation.
//!
//! All behaviour is controlled through [`IndexConfig`], built via its
//! [`IndexConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to pass a run's configuration around explicitly — the extractor and
//! renderer read from it instead of ambient global state, so the core stays
//! testable in isolation.

use crate::error::IndexError;
use crate::progress::ScanProgress;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default name of the rendered HTML file.
pub const DEFAULT_OUTPUT_FILENAME: &str = "bookmarks.html";

/// Configuration for one index-generation run.
///
/// Built via [`IndexConfig::builder()`] or using
/// [`IndexConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2toc::{IndexConfig, NestedOutlineMode};
///
/// let config = IndexConfig::builder()
///     .output_filename("toc.html")
///     .nested_outlines(NestedOutlineMode::TopLevelOnly)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct IndexConfig {
    /// Name of the HTML file written into the output directory.
    /// Default: `"bookmarks.html"`.
    pub output_filename: String,

    /// How nested outline levels are treated. Default:
    /// [`NestedOutlineMode::FlattenDepthFirst`].
    ///
    /// PDF outlines are trees; the index is a flat per-document sequence.
    /// The original tooling never stated which of the two it meant, so the
    /// choice is an explicit, tested policy here rather than an accident of
    /// whatever the reader's iterator yields.
    pub nested_outlines: NestedOutlineMode,

    /// Custom handlebars template source. When `None`, the built-in
    /// template ([`crate::render::DEFAULT_TEMPLATE`]) is used. The index is
    /// bound to the single template value `bookmarks`.
    pub template: Option<String>,

    /// Remove the output directory when the index comes up empty and the
    /// directory itself is empty. Default: false.
    ///
    /// An earlier variant of this tool always removed the directory it had
    /// just created on the no-bookmark path; a later one left it alone.
    /// Both behaviours are legitimate, so it is a switch.
    pub cleanup_empty_output: bool,

    /// Optional per-document progress callback.
    pub progress_callback: Option<ScanProgress>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            nested_outlines: NestedOutlineMode::default(),
            template: None,
            cleanup_empty_output: false,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for IndexConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexConfig")
            .field("output_filename", &self.output_filename)
            .field("nested_outlines", &self.nested_outlines)
            .field("template", &self.template.as_ref().map(|_| "<custom>"))
            .field("cleanup_empty_output", &self.cleanup_empty_output)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl IndexConfig {
    /// Create a new builder for `IndexConfig`.
    pub fn builder() -> IndexConfigBuilder {
        IndexConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`IndexConfig`].
#[derive(Debug)]
pub struct IndexConfigBuilder {
    config: IndexConfig,
}

impl IndexConfigBuilder {
    pub fn output_filename(mut self, name: impl Into<String>) -> Self {
        self.config.output_filename = name.into();
        self
    }

    pub fn nested_outlines(mut self, mode: NestedOutlineMode) -> Self {
        self.config.nested_outlines = mode;
        self
    }

    pub fn template(mut self, source: impl Into<String>) -> Self {
        self.config.template = Some(source.into());
        self
    }

    pub fn cleanup_empty_output(mut self, v: bool) -> Self {
        self.config.cleanup_empty_output = v;
        self
    }

    pub fn progress_callback(mut self, cb: ScanProgress) -> Self {
        self.config.progress_callback = Some(Arc::clone(&cb));
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<IndexConfig, IndexError> {
        let c = &self.config;
        if c.output_filename.is_empty() {
            return Err(IndexError::InvalidConfig(
                "Output filename must not be empty".into(),
            ));
        }
        if c.output_filename.contains(std::path::MAIN_SEPARATOR) || c.output_filename.contains('/')
        {
            return Err(IndexError::InvalidConfig(format!(
                "Output filename must not contain path separators, got '{}'",
                c.output_filename
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// How nested outline levels map onto the flat per-document sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NestedOutlineMode {
    /// Flatten the whole tree depth-first, preserving tree order. (default)
    #[default]
    FlattenDepthFirst,
    /// Index top-level entries only; children are ignored.
    TopLevelOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = IndexConfig::builder().build().unwrap();
        assert_eq!(config.output_filename, "bookmarks.html");
        assert_eq!(
            config.nested_outlines,
            NestedOutlineMode::FlattenDepthFirst
        );
        assert!(!config.cleanup_empty_output);
    }

    #[test]
    fn empty_filename_rejected() {
        let err = IndexConfig::builder().output_filename("").build();
        assert!(matches!(err, Err(IndexError::InvalidConfig(_))));
    }

    #[test]
    fn filename_with_separator_rejected() {
        let err = IndexConfig::builder()
            .output_filename("sub/bookmarks.html")
            .build();
        assert!(matches!(err, Err(IndexError::InvalidConfig(_))));
    }

    #[test]
    fn debug_omits_callback_internals() {
        use crate::progress::NoopScanCallback;
        let config = IndexConfig::builder()
            .progress_callback(Arc::new(NoopScanCallback))
            .build()
            .unwrap();
        let dbg = format!("{config:?}");
        assert!(dbg.contains("<dyn callback>"), "got: {dbg}");
    }
}
