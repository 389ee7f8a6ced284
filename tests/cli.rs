//! End-to-end tests that run the `textsite` binary in a temp working directory.
//!
//! Each test lays out notes and a `template.tmpl`, runs the binary with the
//! temp dir as its working directory, and inspects `output/`.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const TEMPLATE: &str = "<html><body><main>{{ content }}</main></body></html>";

fn workspace(files: &[(&str, &str)]) -> TempDir {
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

fn textsite(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_textsite"))
        .args(args)
        .current_dir(cwd)
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}

#[test]
fn renders_text_and_markdown_tree() {
    let tmp = workspace(&[
        ("template.tmpl", TEMPLATE),
        ("site/a.txt", "Hello"),
        ("site/notes/b.md", "# Title"),
    ]);

    let out = textsite(tmp.path(), &["--dir", "site"]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let a = read(&tmp.path().join("output/a.html"));
    let b = read(&tmp.path().join("output/notes/b.html"));
    assert!(a.contains("<main>Hello</main>"));
    assert!(b.contains("<h1>Title</h1>"));
    assert!(!b.contains("&lt;h1&gt;"));

    let text = stdout(&out);
    assert!(text.contains("Done! Built 2 HTML pages"));
    assert!(text.contains("You had 1 .txt and 1 .md files."));
}

#[test]
fn defaults_to_current_directory() {
    let tmp = workspace(&[("template.tmpl", TEMPLATE), ("a.txt", "Hello")]);

    let out = textsite(tmp.path(), &[]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(read(&tmp.path().join("output/a.html")).contains("Hello"));
}

#[test]
fn file_flag_renders_every_match() {
    let tmp = workspace(&[
        ("template.tmpl", TEMPLATE),
        ("x/notes.txt", "from x"),
        ("y/notes.txt", "from y"),
        ("y/other.txt", "not me"),
    ]);

    let out = textsite(tmp.path(), &["--file", "notes.txt"]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(read(&tmp.path().join("output/x/notes.html")).contains("from x"));
    assert!(read(&tmp.path().join("output/y/notes.html")).contains("from y"));
    assert!(!tmp.path().join("output/y/other.html").exists());
}

#[test]
fn missing_template_fails_without_output() {
    let tmp = workspace(&[("a.txt", "Hello"), ("b.md", "# B")]);

    let out = textsite(tmp.path(), &[]);

    assert!(!out.status.success());
    assert!(stderr(&out).contains("template.tmpl"));
    assert!(!tmp.path().join("output").exists());
}

#[test]
fn in_place_writes_next_to_sources() {
    let tmp = workspace(&[("template.tmpl", TEMPLATE), ("notes/a.txt", "Hello")]);

    let out = textsite(tmp.path(), &["--in-place"]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(read(&tmp.path().join("notes/a.html")).contains("Hello"));
    assert!(!tmp.path().join("output").exists());
}

#[test]
fn config_file_sets_output_dir_and_template() {
    let tmp = workspace(&[
        ("layouts/page.tmpl", "<article>{{ content }}</article>"),
        ("textsite.toml", "template = \"layouts/page.tmpl\"\n[output]\ndir = \"public\"\n"),
        ("a.txt", "Hello"),
    ]);

    let out = textsite(tmp.path(), &[]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(read(&tmp.path().join("public/a.html")), "<article>Hello</article>");
}

#[test]
fn flags_override_config_file() {
    let tmp = workspace(&[
        ("template.tmpl", TEMPLATE),
        ("textsite.toml", "[output]\ndir = \"public\"\n"),
        ("a.txt", "Hello"),
    ]);

    let out = textsite(tmp.path(), &["--output", "site-out"]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(tmp.path().join("site-out/a.html").is_file());
    assert!(!tmp.path().join("public").exists());
}

#[test]
fn invalid_config_is_fatal() {
    let tmp = workspace(&[
        ("template.tmpl", TEMPLATE),
        ("textsite.toml", "colour = \"blue\"\n"),
        ("a.txt", "Hello"),
    ]);

    let out = textsite(tmp.path(), &[]);

    assert!(!out.status.success());
    assert!(!tmp.path().join("output").exists());
}

#[test]
fn keep_going_renders_the_rest_then_fails() {
    let tmp = workspace(&[
        ("template.tmpl", TEMPLATE),
        ("a.txt", "a"),
        ("b.txt", "b"),
        ("c.txt", "c"),
    ]);
    fs::create_dir_all(tmp.path().join("output/b.html")).unwrap();

    let out = textsite(tmp.path(), &["--keep-going"]);

    assert!(!out.status.success());
    assert!(tmp.path().join("output/a.html").is_file());
    assert!(tmp.path().join("output/c.html").is_file());
    assert!(stdout(&out).contains("Done! Built 2 HTML pages"));
    assert!(stderr(&out).contains("1 of 3 pages failed to render"));
}

#[test]
fn same_stem_sources_do_not_overwrite_each_other() {
    let tmp = workspace(&[
        ("template.tmpl", TEMPLATE),
        ("a.md", "# From markdown"),
        ("a.txt", "from text"),
    ]);

    let out = textsite(tmp.path(), &[]);

    assert!(!out.status.success());
    assert!(stderr(&out).contains("already rendered from"));
    let page = read(&tmp.path().join("output/a.html"));
    assert!(page.contains("<h1>From markdown</h1>"));
    assert!(!page.contains("from text"));
}

#[test]
fn report_is_written_as_json() {
    let tmp = workspace(&[
        ("template.tmpl", TEMPLATE),
        ("a.txt", "Hello"),
        ("b.md", "# B"),
    ]);

    let out = textsite(tmp.path(), &["--report", "reports/run.json"]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let report = read(&tmp.path().join("reports/run.json"));
    assert!(report.contains("\"pages\": 2"));
    assert!(report.contains("\"txt_sources\": 1"));
    assert!(report.contains("\"md_sources\": 1"));
    assert!(report.contains("\"kind\": \"markdown\""));
}

#[test]
fn gen_config_prints_stock_file() {
    let tmp = TempDir::new().unwrap();

    let out = textsite(tmp.path(), &["gen-config"]);

    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("template = \"template.tmpl\""));
    assert!(text.contains("[markdown]"));
}

#[test]
fn rerun_produces_identical_pages() {
    let tmp = workspace(&[
        ("template.tmpl", TEMPLATE),
        ("notes/b.md", "# Title\n\n- one\n- two\n"),
    ]);

    assert!(textsite(tmp.path(), &[]).status.success());
    let first = fs::read(tmp.path().join("output/notes/b.html")).unwrap();
    assert!(textsite(tmp.path(), &[]).status.success());
    let second = fs::read(tmp.path().join("output/notes/b.html")).unwrap();

    assert_eq!(first, second);
}
