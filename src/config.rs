//! Site configuration.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. Stock defaults ([`SiteConfig::default`])
//! 2. `textsite.toml` in the working directory, or the file given with `--config`
//! 3. Command-line flags (`--template`, `--output`, `--in-place`, `--keep-going`)
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! template = "template.tmpl"  # Page template, relative to the working directory
//! on_error = "abort"          # "abort" stops at the first failure, "continue" keeps going
//!
//! [output]
//! layout = "directory"        # "directory" writes under `dir`, "in-place" next to each source
//! dir = "output"              # Output root for the directory layout
//!
//! [markdown]
//! tables = true
//! strikethrough = true
//! footnotes = true
//! tasklists = true
//! smart_punctuation = false
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const CONFIG_FILENAME: &str = "textsite.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `textsite.toml`.
///
/// All fields have defaults; unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the page template. Read fresh for every page.
    pub template: String,
    /// What to do when a single page fails to render.
    pub on_error: ErrorPolicy,
    /// Where generated pages go.
    pub output: OutputConfig,
    /// Markdown extensions.
    pub markdown: MarkdownConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            template: "template.tmpl".to_string(),
            on_error: ErrorPolicy::default(),
            output: OutputConfig::default(),
            markdown: MarkdownConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.template.trim().is_empty() {
            return Err(ConfigError::Validation("template must not be empty".into()));
        }
        if self.output.layout == OutputLayoutKind::Directory && self.output.dir.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "output.dir must not be empty with the directory layout".into(),
            ));
        }
        Ok(())
    }
}

/// Failure handling for the render loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Stop at the first failed page. Pages already written stay on disk.
    #[default]
    Abort,
    /// Record the failure, keep rendering, and fail the run at the end.
    Continue,
}

/// Output placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub layout: OutputLayoutKind,
    /// Output root for [`OutputLayoutKind::Directory`]. Ignored in place.
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            layout: OutputLayoutKind::default(),
            dir: "output".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputLayoutKind {
    /// `<dir>/<relative parent>/<stem>.html`
    #[default]
    Directory,
    /// `<source parent>/<stem>.html`
    InPlace,
}

/// Markdown extensions passed to the converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    pub tables: bool,
    pub strikethrough: bool,
    pub footnotes: bool,
    pub tasklists: bool,
    /// Curly quotes, en/em dashes and ellipses.
    pub smart_punctuation: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            footnotes: true,
            tasklists: true,
            smart_punctuation: false,
        }
    }
}

// =============================================================================
// Config loading
// =============================================================================

/// Parse and validate config file content.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from an explicit path. The file must exist.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Load `textsite.toml` from `dir`, falling back to defaults if it is absent.
pub fn load_config_in(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    load_config(&path)
}

/// Returns a fully-commented stock `textsite.toml`.
///
/// Used by the `gen-config` command.
pub fn stock_config_toml() -> &'static str {
    r##"# textsite configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# textsite reads ./textsite.toml when present, or the file passed with
# --config. Command-line flags override anything set here.
# Unknown keys will cause an error.

# Page template, relative to the working directory. The page content is
# available as {{ content }}. Plain text is HTML-escaped; Markdown output
# is inserted as-is.
template = "template.tmpl"

# "abort" stops at the first page that fails to render.
# "continue" renders everything it can, then exits with an error.
on_error = "abort"

[output]
# "directory": write <dir>/<path relative to --dir>/<name>.html
# "in-place":  write <name>.html next to each source file
layout = "directory"
dir = "output"

[markdown]
tables = true
strikethrough = true
footnotes = true
tasklists = true
smart_punctuation = false
"##
}
