//! Index rendering: turn a [`BookmarkIndex`] into HTML and write it out.
//!
//! The template engine is handlebars; the index is bound to the single
//! template value `bookmarks` as a map of document path to bookmark list.
//! Titles and paths are HTML-escaped by the engine's default escaping, so
//! the template stays dumb and the data contract stays one value wide.

use crate::config::IndexConfig;
use crate::error::IndexError;
use crate::output::BookmarkIndex;
use handlebars::Handlebars;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Built-in HTML template.
///
/// Iterates the index map: `@key` is the document path, `this` its ordered
/// bookmark list. Callers can replace it wholesale via
/// [`crate::config::IndexConfigBuilder::template`]; the data contract is
/// the single `bookmarks` value.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>PDF Bookmark Index</title>
<style>
  body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }
  h2 { font-size: 1rem; border-bottom: 1px solid #ccc; padding-bottom: 0.25rem; }
  ol { margin-top: 0.5rem; }
  .page { color: #666; }
</style>
</head>
<body>
<h1>PDF Bookmark Index</h1>
{{#each bookmarks}}
<section>
<h2>{{@key}}</h2>
<ol>
{{#each this}}
<li>{{title}} <span class="page">(p. {{page}})</span></li>
{{/each}}
</ol>
</section>
{{/each}}
</body>
</html>
"#;

/// Render the index to HTML text.
///
/// Uses the built-in template unless the config carries a custom one.
pub fn render_html(index: &BookmarkIndex, config: &IndexConfig) -> Result<String, IndexError> {
    let template = config.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
    let data = serde_json::json!({ "bookmarks": index });

    let handlebars = Handlebars::new();
    handlebars
        .render_template(template, &data)
        .map_err(|e| IndexError::TemplateFailed {
            detail: e.to_string(),
        })
}

/// Write the rendered HTML to `{output_dir}/{filename}`, UTF-8, overwriting
/// any existing file. Parent directories are created as needed.
pub fn write_index(html: &str, output_dir: &Path, filename: &str) -> Result<PathBuf, IndexError> {
    fs::create_dir_all(output_dir).map_err(|e| IndexError::OutputWriteFailed {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let target = output_dir.join(filename);
    fs::write(&target, html).map_err(|e| IndexError::OutputWriteFailed {
        path: target.clone(),
        source: e,
    })?;

    info!("Wrote bookmark index to {}", target.display());
    Ok(target)
}

/// Remove `output_dir` if it exists and is empty.
///
/// Used on the no-bookmark path when
/// [`crate::config::IndexConfig::cleanup_empty_output`] is set. A non-empty
/// directory is left alone.
pub(crate) fn remove_empty_output_dir(output_dir: &Path) {
    if !output_dir.is_dir() {
        return;
    }
    match fs::remove_dir(output_dir) {
        Ok(()) => debug!("Removed empty output directory {}", output_dir.display()),
        Err(e) => warn!(
            "Left output directory {} in place: {}",
            output_dir.display(),
            e
        ),
    }
}
