//! Page template loading and execution via [minijinja](https://docs.rs/minijinja).
//!
//! The template is a user file with a single context value, `content`.
//! HTML auto-escaping is forced on regardless of the template's extension, so
//! plain text is escaped on output while [`PageContent::TrustedHtml`] passes
//! through untouched:
//!
//! ```text
//! <html><body><article>{{ content }}</article></body></html>
//! ```
//!
//! Templates are parsed on [`PageTemplate::load`], so syntax errors surface
//! before any output file is created.

use minijinja::{AutoEscape, Environment, Value, context};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse template {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },
    #[error("failed to execute template {path}: {source}")]
    Execute {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },
}

/// The value a page template renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    /// Escaped by the template on output.
    Text(String),
    /// Inserted verbatim; the template does not re-escape it.
    TrustedHtml(String),
}

impl PageContent {
    fn into_value(self) -> Value {
        match self {
            PageContent::Text(text) => Value::from(text),
            PageContent::TrustedHtml(html) => Value::from_safe_string(html),
        }
    }
}

/// A parsed page template.
pub struct PageTemplate {
    path: PathBuf,
    name: String,
    env: Environment<'static>,
}

impl PageTemplate {
    /// Read and parse the template at `path`.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(path, source)
    }

    /// Parse `source`, reporting errors against `path`.
    pub fn from_source(path: &Path, source: String) -> Result<Self, TemplateError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "template".to_string());

        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template_owned(name.clone(), source)
            .map_err(|source| TemplateError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            name,
            env,
        })
    }

    /// Render `content` into `sink`.
    pub fn render_to<W: Write>(&self, content: PageContent, sink: W) -> Result<(), TemplateError> {
        let execute_err = |source: minijinja::Error| TemplateError::Execute {
            path: self.path.clone(),
            source,
        };
        let template = self.env.get_template(&self.name).map_err(execute_err)?;
        template
            .render_captured_to(context! { content => content.into_value() }, sink)
            .map_err(execute_err)?;
        Ok(())
    }

    /// Render `content` to a string.
    pub fn render(&self, content: PageContent) -> Result<String, TemplateError> {
        let mut out = Vec::new();
        self.render_to(content, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
