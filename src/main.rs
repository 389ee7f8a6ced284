use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use textsite::config::{self, ErrorPolicy, OutputLayoutKind, SiteConfig};
use textsite::output;
use textsite::site::{self, BuildSettings};

#[derive(Parser)]
#[command(name = "textsite")]
#[command(about = "Turn plain-text and Markdown notes into HTML pages")]
#[command(long_about = "\
Turn plain-text and Markdown notes into HTML pages

Every .txt and .md file under --dir is rendered through one template
(template.tmpl by default) into output/, keeping the folder structure:

  notes/                         output/
  ├── a.txt             →        ├── a.html
  └── journal/                   └── journal/
      └── b.md          →            └── b.html

Plain text is HTML-escaped by the template; Markdown is converted to HTML
first and inserted as-is. With --file, only files with exactly that name are
rendered, wherever they are in the tree.

Run 'textsite gen-config' to print a documented textsite.toml.")]
#[command(version)]
struct Cli {
    /// Render only files with exactly this name (any extension)
    #[arg(long, default_value = "")]
    file: String,

    /// Directory to search for source files
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Config file (default: ./textsite.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Page template, overriding the config
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output directory, overriding the config
    #[arg(long, conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Write each page next to its source instead of into the output directory
    #[arg(long)]
    in_place: bool,

    /// Keep rendering after a page fails; exit with an error at the end
    #[arg(long)]
    keep_going: bool,

    /// Write the run summary as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stock textsite.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&*e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(Command::GenConfig) = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = resolve_config(&cli)?;
    let settings = BuildSettings::from_config(&config, Some(cli.file.clone()), &cli.dir);

    let summary = site::build(&settings, output::print_build_event)?;
    output::print_summary(&summary);

    if let Some(report) = &cli.report {
        write_report(report, &summary)?;
    }

    site::ensure_complete(&summary)?;
    Ok(())
}

/// Load the config file, then let flags override it.
fn resolve_config(cli: &Cli) -> Result<SiteConfig, config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_config_in(Path::new("."))?,
    };

    if let Some(template) = &cli.template {
        config.template = template.to_string_lossy().into_owned();
    }
    if let Some(dir) = &cli.output {
        config.output.layout = OutputLayoutKind::Directory;
        config.output.dir = dir.to_string_lossy().into_owned();
    }
    if cli.in_place {
        config.output.layout = OutputLayoutKind::InPlace;
    }
    if cli.keep_going {
        config.on_error = ErrorPolicy::Continue;
    }

    config.validate()?;
    Ok(config)
}

fn write_report(path: &Path, summary: &textsite::types::RunSummary) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)
}
