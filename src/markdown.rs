//! Markdown to HTML conversion via [pulldown-cmark](https://docs.rs/pulldown-cmark).
//!
//! Source bytes are decoded lossily: invalid UTF-8 becomes U+FFFD rather than
//! failing the page.

use crate::config::MarkdownConfig;
use pulldown_cmark::{Options, Parser, html};

/// Map config switches onto parser options.
pub fn options(config: &MarkdownConfig) -> Options {
    let mut options = Options::empty();
    options.set(Options::ENABLE_TABLES, config.tables);
    options.set(Options::ENABLE_STRIKETHROUGH, config.strikethrough);
    options.set(Options::ENABLE_FOOTNOTES, config.footnotes);
    options.set(Options::ENABLE_TASKLISTS, config.tasklists);
    options.set(Options::ENABLE_SMART_PUNCTUATION, config.smart_punctuation);
    options
}

/// Convert Markdown source to an HTML fragment.
pub fn to_html(source: &[u8], config: &MarkdownConfig) -> String {
    let text = String::from_utf8_lossy(source);
    let parser = Parser::new_ext(&text, options(config));
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
