//! Page rendering.
//!
//! Turns one [`SourceFile`] into one HTML page:
//!
//! 1. Read the source bytes.
//! 2. Load the template from disk. This happens for every page, so template
//!    edits show up without restarting anything, and a missing template fails
//!    before any output path is touched.
//! 3. Work out the destination (see [`OutputLayout`]) and create its parents.
//! 4. Plain text goes to the template as an escaped string; Markdown is
//!    converted first and goes in as trusted HTML.
//! 5. Execute the template straight into the destination file.
//!
//! ## Output Layouts
//!
//! ```text
//! content/                      Directory { dir: "output" }     InPlace
//! ├── a.txt                     output/a.html                   content/a.html
//! └── notes/
//!     └── b.md                  output/notes/b.html             content/notes/b.html
//! ```
//!
//! The directory layout mirrors paths relative to the content root, so two
//! `notes.txt` files in different folders never overwrite each other. Only the
//! last extension is replaced: `a.b.txt` becomes `a.b.html`, and `a.txt` next
//! to `a.md` maps to the same page. The build loop refuses the second one with
//! [`RenderError::OutputCollision`].

use crate::config::MarkdownConfig;
use crate::markdown;
use crate::template::{PageContent, PageTemplate, TemplateError};
use crate::types::{RenderResult, SourceFile, SourceKind};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} was already rendered from {previous}")]
    OutputCollision { path: PathBuf, previous: PathBuf },
}

/// Where a page lands relative to its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLayout {
    /// `<dir>/<source parent relative to root>/<name>.html`
    Directory { dir: PathBuf },
    /// `<source parent>/<name>.html`
    InPlace,
}

/// Everything the renderer needs besides the source itself.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Content root the locator walked; used to mirror relative paths.
    pub root: PathBuf,
    pub template: PathBuf,
    pub layout: OutputLayout,
    pub markdown: MarkdownConfig,
}

/// Render `source` to HTML and write it to its destination.
pub fn render(source: &SourceFile, settings: &RenderSettings) -> Result<RenderResult, RenderError> {
    let start = Instant::now();

    let (bytes, size) = read_source(&source.path)?;
    let template = PageTemplate::load(&settings.template)?;

    let output = destination(&source.path, &settings.root, &settings.layout);
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| RenderError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let content = match source.kind {
        SourceKind::PlainText => PageContent::Text(String::from_utf8_lossy(&bytes).into_owned()),
        SourceKind::Markdown => {
            PageContent::TrustedHtml(markdown::to_html(&bytes, &settings.markdown))
        }
    };

    let write_err = |e: std::io::Error| RenderError::Write {
        path: output.clone(),
        source: e,
    };
    let file = File::create(&output).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    template.render_to(content, &mut writer)?;
    writer.flush().map_err(write_err)?;

    Ok(RenderResult {
        source: source.path.clone(),
        output,
        kind: source.kind,
        size_kb: size as f64 / 1024.0,
        elapsed: start.elapsed(),
    })
}

/// Read the whole file, returning its bytes and the size reported at open time.
fn read_source(path: &Path) -> Result<(Vec<u8>, u64), RenderError> {
    let read_err = |e: std::io::Error| RenderError::Read {
        path: path.to_path_buf(),
        source: e,
    };
    let mut file = File::open(path).map_err(read_err)?;
    let size = file.metadata().map_err(read_err)?.len();
    let mut bytes = Vec::with_capacity(size as usize);
    file.read_to_end(&mut bytes).map_err(read_err)?;
    Ok((bytes, size))
}

/// Compute the output path for `source` under `layout`.
pub fn destination(source: &Path, root: &Path, layout: &OutputLayout) -> PathBuf {
    let name = source.file_name().unwrap_or(OsStr::new("index"));
    let file_name = Path::new(name).with_extension("html");

    match layout {
        OutputLayout::InPlace => source.with_file_name(file_name),
        OutputLayout::Directory { dir } => {
            let relative_parent = source
                .strip_prefix(root)
                .ok()
                .and_then(Path::parent)
                .unwrap_or(Path::new(""));
            dir.join(relative_parent).join(file_name)
        }
    }
}
