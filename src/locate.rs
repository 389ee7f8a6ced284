//! Source discovery.
//!
//! Walks the content root and returns the files that should become pages.
//! Two modes:
//!
//! - **Target name** (`--file notes.txt`): every entry whose base name equals
//!   the target exactly, whatever its extension, in any subdirectory. The same
//!   name in several directories yields several matches.
//! - **No target**: every non-directory entry whose name ends in `.txt` or
//!   `.md`. Suffixes are matched case-sensitively, so `notes.txtx` and
//!   `NOTES.TXT` are skipped.
//!
//! Entries are visited depth-first with siblings sorted by file name, which
//! fixes the render order. The root itself is visited too. Symlinked
//! directories are not descended into, but a selected symlink records the size
//! of the file it points to.
//!
//! Any traversal error aborts the whole walk: a partially listed tree would
//! silently drop pages. So does a selected entry that cannot be stat'ed,
//! such as a dangling symlink.

use crate::types::SourceFile;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const SOURCE_SUFFIXES: &[&str] = &[".txt", ".md"];

#[derive(Error, Debug)]
pub enum LocateError {
    #[error("failed to walk {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to read metadata for {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Collect source files under `root`.
///
/// `target` of `None` or `Some("")` selects every `.txt`/`.md` file.
pub fn locate(target: Option<&str>, root: &Path) -> Result<Vec<SourceFile>, LocateError> {
    let target = target.filter(|t| !t.is_empty());
    let mut sources = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| LocateError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy();

        let selected = match target {
            Some(target) => name == target,
            None => !entry.file_type().is_dir() && is_source_name(&name),
        };
        if !selected {
            continue;
        }

        let size = fs::metadata(entry.path())
            .map_err(|source| LocateError::Metadata {
                path: entry.path().to_path_buf(),
                source,
            })?
            .len();
        sources.push(SourceFile::new(entry.into_path(), size));
    }

    Ok(sources)
}

fn is_source_name(name: &str) -> bool {
    SOURCE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}
