//! CLI output formatting.
//!
//! # Output Format
//!
//! One block per rendered page, source first, destination second, with size
//! and timing as indented context:
//!
//! ```text
//! notes/b.md → output/notes/b.html
//!     Size: 0.1KB
//!     Time: 0.00s
//! ```
//!
//! Then a two-line summary, green and magenta on a terminal:
//!
//! ```text
//! Done! Built 2 HTML pages (0.1kB total) in 0.01s.
//! You had 1 .txt and 1 .md files.
//! ```
//!
//! # Architecture
//!
//! `format_*` functions return plain `Vec<String>`/`String` and are pure, so
//! tests can compare text without color codes. `print_*` wrappers add color via
//! [`console::style`] (which turns itself off when stdout is not a terminal)
//! and write to stdout, or stderr for errors.

use crate::site::BuildEvent;
use crate::types::{RenderResult, RunSummary};
use console::style;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Shared helpers
// ============================================================================

/// Binary kilobytes with one decimal.
fn format_kb(kb: f64) -> String {
    format!("{kb:.1}KB")
}

/// Seconds with two decimals.
fn format_secs(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

// ============================================================================
// Per-page lines
// ============================================================================

/// Status block for one rendered page.
pub fn format_page(result: &RenderResult) -> Vec<String> {
    vec![
        format!(
            "{} \u{2192} {}",
            display(&result.source),
            display(&result.output)
        ),
        format!("    Size: {}", format_kb(result.size_kb)),
        format!("    Time: {}", format_secs(result.elapsed)),
    ]
}

/// Format a build progress event as display lines.
pub fn format_build_event(event: &BuildEvent<'_>) -> Vec<String> {
    match event {
        BuildEvent::Located { count } => vec![format!("Found {}", plural(*count, "source"))],
        BuildEvent::Rendered(result) => format_page(result),
        BuildEvent::Failed { source, error } => {
            vec![format!("{} failed: {}", display(&source.path), error)]
        }
    }
}

/// Print a build progress event to stdout (failures to stderr).
pub fn print_build_event(event: &BuildEvent<'_>) {
    let lines = format_build_event(event);
    match event {
        BuildEvent::Rendered(_) => {
            let mut lines = lines.into_iter();
            if let Some(header) = lines.next() {
                println!("{}", style(header).blue());
            }
            for line in lines {
                println!("{}", style(line).yellow());
            }
        }
        BuildEvent::Failed { .. } => {
            for line in lines {
                eprintln!("{}", style(line).red());
            }
        }
        BuildEvent::Located { .. } => {
            for line in lines {
                println!("{line}");
            }
        }
    }
}

// ============================================================================
// Run summary
// ============================================================================

/// Final summary: totals, then source counts, then any failures.
pub fn format_summary(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Done! Built {} ({:.1}kB total) in {}.",
            plural(summary.pages, "HTML page"),
            summary.total_kb,
            format_secs(summary.total_time)
        ),
        format!(
            "You had {} .txt and {} .md {}.",
            summary.txt_sources,
            summary.md_sources,
            if summary.txt_sources + summary.md_sources == 1 {
                "file"
            } else {
                "files"
            }
        ),
    ];

    if !summary.failures.is_empty() {
        lines.push(format!(
            "{} failed:",
            plural(summary.failures.len(), "page")
        ));
        for failure in &summary.failures {
            lines.push(format!("    {}", display(&failure.source)));
        }
    }
    lines
}

/// Print the run summary to stdout.
pub fn print_summary(summary: &RunSummary) {
    let lines = format_summary(summary);
    println!();
    for (i, line) in lines.into_iter().enumerate() {
        match i {
            0 => println!("{}", style(line).green()),
            1 => println!("{}", style(line).magenta()),
            _ => println!("{}", style(line).red()),
        }
    }
}

/// Print a fatal error to stderr.
pub fn print_error(error: &dyn std::error::Error) {
    eprintln!("{} {}", style("error:").red().bold(), error);
}
