//! Whole-site build: locate once, render each source, total the results.
//!
//! The loop is strictly sequential. Progress is reported through
//! [`BuildEvent`]s handed to a caller-supplied callback, so the CLI can print
//! while tests collect.
//!
//! With [`ErrorPolicy::Abort`] the first failed page ends the build and pages
//! already written stay on disk. With [`ErrorPolicy::Continue`] failures are
//! recorded in the [`RunSummary`] and the caller decides how to exit.
//!
//! Each destination is claimed by the first source that maps to it. A later
//! source with the same destination (`a.txt` beside `a.md`) is not rendered
//! and fails with [`RenderError::OutputCollision`], so one page never silently
//! replaces another.

use crate::config::{ErrorPolicy, OutputLayoutKind, SiteConfig};
use crate::locate::{self, LocateError};
use crate::render::{self, OutputLayout, RenderError, RenderSettings};
use crate::types::{RenderResult, RunSummary, SourceFile};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error("failed to render {path}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
    #[error("{failed} of {total} pages failed to render")]
    Incomplete { failed: usize, total: usize },
}

/// Progress notifications emitted during [`build`].
#[derive(Debug)]
pub enum BuildEvent<'a> {
    /// The walk finished; `count` sources will be rendered.
    Located { count: usize },
    Rendered(&'a RenderResult),
    /// A page failed and the build is continuing past it.
    Failed {
        source: &'a SourceFile,
        error: &'a RenderError,
    },
}

/// Inputs for one build.
#[derive(Debug, Clone)]
pub struct BuildSettings {
    /// Exact base name to look for; `None` selects every `.txt`/`.md` file.
    pub target: Option<String>,
    pub render: RenderSettings,
    pub on_error: ErrorPolicy,
}

impl BuildSettings {
    /// Derive build settings from a resolved config and the content root.
    pub fn from_config(config: &SiteConfig, target: Option<String>, root: &Path) -> Self {
        let layout = match config.output.layout {
            OutputLayoutKind::Directory => OutputLayout::Directory {
                dir: PathBuf::from(&config.output.dir),
            },
            OutputLayoutKind::InPlace => OutputLayout::InPlace,
        };
        Self {
            target: target.filter(|t| !t.is_empty()),
            render: RenderSettings {
                root: root.to_path_buf(),
                template: PathBuf::from(&config.template),
                layout,
                markdown: config.markdown.clone(),
            },
            on_error: config.on_error,
        }
    }
}

/// Locate sources under the configured root and render each of them.
pub fn build(
    settings: &BuildSettings,
    mut on_event: impl FnMut(&BuildEvent<'_>),
) -> Result<RunSummary, BuildError> {
    let sources = locate::locate(settings.target.as_deref(), &settings.render.root)?;
    on_event(&BuildEvent::Located {
        count: sources.len(),
    });

    let mut summary = RunSummary::default();
    let mut claimed = HashMap::new();
    for source in &sources {
        match render_unclaimed(source, &settings.render, &mut claimed) {
            Ok(result) => {
                on_event(&BuildEvent::Rendered(&result));
                summary.record(source, result);
            }
            Err(error) => match settings.on_error {
                ErrorPolicy::Abort => {
                    return Err(BuildError::Render {
                        path: source.path.clone(),
                        source: error,
                    });
                }
                ErrorPolicy::Continue => {
                    on_event(&BuildEvent::Failed {
                        source,
                        error: &error,
                    });
                    summary.record_failure(source, error.to_string());
                }
            },
        }
    }

    Ok(summary)
}

/// Claim `source`'s destination, then render it.
///
/// `claimed` maps destinations to the source that took them. A destination is
/// claimed before rendering, so a page that failed still blocks later sources
/// from landing on the same path.
fn render_unclaimed(
    source: &SourceFile,
    settings: &RenderSettings,
    claimed: &mut HashMap<PathBuf, PathBuf>,
) -> Result<RenderResult, RenderError> {
    let output = render::destination(&source.path, &settings.root, &settings.layout);
    match claimed.entry(output) {
        Entry::Occupied(entry) => {
            return Err(RenderError::OutputCollision {
                path: entry.key().clone(),
                previous: entry.get().clone(),
            });
        }
        Entry::Vacant(entry) => {
            entry.insert(source.path.clone());
        }
    }
    render::render(source, settings)
}

/// Turn recorded failures into an error once the summary has been shown.
pub fn ensure_complete(summary: &RunSummary) -> Result<(), BuildError> {
    if summary.failures.is_empty() {
        Ok(())
    } else {
        Err(BuildError::Incomplete {
            failed: summary.failures.len(),
            total: summary.pages + summary.failures.len(),
        })
    }
}
