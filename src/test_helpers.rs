//! Shared test utilities for the textsite test suite.
//!
//! Builds throwaway content trees and templates in temp directories so each
//! test gets an isolated copy it can mutate.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = content_tree(&[("a.txt", "Hello"), ("notes/b.md", "# Title")]);
//! let template = write_template(tmp.path(), PAGE_TEMPLATE);
//! let settings = directory_settings(tmp.path(), &template);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::MarkdownConfig;
use crate::render::{OutputLayout, RenderSettings};

/// Minimal page template: the content value inside `<main>`.
pub const PAGE_TEMPLATE: &str =
    "<!DOCTYPE html>\n<html><body><main>{{ content }}</main></body></html>\n";

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp directory holding `files`, given as `(relative path, content)`.
///
/// Parent directories are created as needed.
pub fn content_tree(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, content) in files {
        let path = tmp.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }
    tmp
}

/// Write `source` as `template.tmpl` under `dir` and return its path.
pub fn write_template(dir: &Path, source: &str) -> PathBuf {
    let path = dir.join("template.tmpl");
    fs::write(&path, source).unwrap();
    path
}

// =========================================================================
// Settings
// =========================================================================

/// Render settings writing into `<root>/output` with default Markdown options.
pub fn directory_settings(root: &Path, template: &Path) -> RenderSettings {
    RenderSettings {
        root: root.to_path_buf(),
        template: template.to_path_buf(),
        layout: OutputLayout::Directory {
            dir: root.join("output"),
        },
        markdown: MarkdownConfig::default(),
    }
}

// =========================================================================
// Output inspection
// =========================================================================

/// Read a generated page. Panics with the missing path on failure.
pub fn read_page(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("could not read page {}: {e}", path.display()))
}

/// Extract whatever the template placed between `<main>` and `</main>`.
pub fn main_body(page: &str) -> &str {
    let start = page.find("<main>").expect("page has no <main>") + "<main>".len();
    let end = page.find("</main>").expect("page has no </main>");
    &page[start..end]
}

/// All `.html` files under `dir`, relative, sorted.
pub fn html_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "html"))
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}
