//! Shared types passed between the locate, render and build stages.
//!
//! A [`SourceFile`] is produced by [`locate`](crate::locate), consumed once by
//! [`render`](crate::render), which hands back a [`RenderResult`]. The build
//! loop folds every result into a [`RunSummary`].

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How a source file's content is turned into template input.
///
/// Classification is by file suffix and happens once, in [`SourceKind::of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Raw text handed to the template as a plain string.
    PlainText,
    /// Markdown converted to HTML and handed to the template as safe HTML.
    Markdown,
}

impl SourceKind {
    /// `.md` is Markdown, everything else is plain text.
    pub fn of(path: &Path) -> Self {
        if file_name_str(path).ends_with(".md") {
            SourceKind::Markdown
        } else {
            SourceKind::PlainText
        }
    }
}

/// A file found under the content root, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Size in bytes as reported by the filesystem during the walk.
    pub size: u64,
    pub kind: SourceKind,
}

impl SourceFile {
    pub fn new(path: PathBuf, size: u64) -> Self {
        let kind = SourceKind::of(&path);
        Self { path, size, kind }
    }

    /// Whether the file carries the `.txt` suffix.
    ///
    /// Not the same as `kind == PlainText`: a file picked by `--file` may have
    /// any extension and still render as plain text.
    pub fn is_txt(&self) -> bool {
        file_name_str(&self.path).ends_with(".txt")
    }

    pub fn is_md(&self) -> bool {
        self.kind == SourceKind::Markdown
    }
}

/// Outcome of rendering one source file.
#[derive(Debug, Clone, Serialize)]
pub struct RenderResult {
    pub source: PathBuf,
    pub output: PathBuf,
    pub kind: SourceKind,
    /// Source size in binary kilobytes.
    pub size_kb: f64,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

/// A source that failed to render while running with `on_error = "continue"`.
#[derive(Debug, Clone, Serialize)]
pub struct RenderFailure {
    pub source: PathBuf,
    pub message: String,
}

/// Running totals for one invocation.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub pages: usize,
    pub total_kb: f64,
    #[serde(rename = "total_secs", serialize_with = "serialize_secs")]
    pub total_time: Duration,
    pub txt_sources: usize,
    pub md_sources: usize,
    pub results: Vec<RenderResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<RenderFailure>,
}

impl RunSummary {
    /// Fold one successful render into the totals.
    pub fn record(&mut self, source: &SourceFile, result: RenderResult) {
        self.pages += 1;
        self.total_kb += result.size_kb;
        self.total_time += result.elapsed;
        if source.is_txt() {
            self.txt_sources += 1;
        } else if source.is_md() {
            self.md_sources += 1;
        }
        self.results.push(result);
    }

    pub fn record_failure(&mut self, source: &SourceFile, message: String) {
        self.failures.push(RenderFailure {
            source: source.path.clone(),
            message,
        });
    }
}

fn file_name_str(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default()
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}
