//! # textsite
//!
//! Turns a directory of plain-text and Markdown notes into static HTML pages
//! through a single user-supplied template.
//!
//! # Pipeline
//!
//! ```text
//! 1. Locate   --dir   →  [SourceFile]    (walk the tree, pick .txt/.md or --file)
//! 2. Render   source  →  output/*.html   (read, convert, template, write)
//! 3. Report   results →  RunSummary      (pages, kilobytes, seconds, counts)
//! ```
//!
//! Everything runs on one thread, one file at a time. The first failure stops
//! the run unless `on_error = "continue"` (or `--keep-going`) is set.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`locate`] | Walks the content root and selects source files |
//! | [`render`] | Renders one source file through the template to disk |
//! | [`site`] | Build loop: locate, render each source, accumulate the summary |
//! | [`template`] | Runtime page template with forced HTML auto-escaping (minijinja) |
//! | [`markdown`] | Markdown to HTML conversion (pulldown-cmark) |
//! | [`config`] | `textsite.toml` loading and validation |
//! | [`types`] | `SourceFile`, `SourceKind`, `RenderResult`, `RunSummary` |
//! | [`output`] | CLI output formatting: per-page status and the final summary |
//!
//! # Design Decisions
//!
//! ## Runtime Templates
//!
//! The page template is an ordinary file next to the notes, not something
//! compiled in: authors edit it without a Rust toolchain. It is re-read for
//! every page. The template sees one value, `content`. Auto-escaping is always
//! on, so plain text cannot inject markup, while converted Markdown is marked
//! safe and inserted verbatim.
//!
//! ## Mirrored Output Paths
//!
//! Pages land under `output/` at the same relative path as their source, so
//! `x/notes.txt` and `y/notes.txt` become `output/x/notes.html` and
//! `output/y/notes.html`. The `in-place` layout writes next to the source
//! instead.
//!
//! ## One Classification Point
//!
//! Whether a file is Markdown is decided once, by [`types::SourceKind::of`],
//! and the renderer matches on the enum. Adding a format means adding a
//! variant and a match arm.

pub mod config;
pub mod locate;
pub mod markdown;
pub mod output;
pub mod render;
pub mod site;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
