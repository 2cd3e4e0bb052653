//! clamp CLI
//!
//! Loads a page fixture, clamps its headings, and replays a scripted
//! sequence of viewport resizes in virtual time, printing the headings
//! after every pass.

mod timeline;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clamp_browser::{FontdueFontMetrics, load_page};
use clamp_common::console::{BufferConsole, Console, StdConsole};
use clamp_truncate::{Runtime, TruncateConfig, TruncationKind};
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;

use timeline::{PassSnapshot, ResizeEvent, replay};

/// clamp: line-clamped heading truncation over a page fixture
#[derive(Parser, Debug)]
#[command(name = "clamp")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Clamp .a-heading elements to two lines
    clamp demos/cards.json

    # Three lines of h2.title with a typographic ellipsis
    clamp demos/cards.json --selector h2.title --max-lines 3 --ellipsis '…'

    # Narrow the viewport at 50ms, then widen it again at 400ms
    clamp demos/cards.json --resize 240@50 --resize 800@400

    # Machine-readable report
    clamp demos/cards.json --resize 240@50 --json
"#)]
struct Cli {
    /// Page fixture (JSON)
    #[arg(value_name = "PAGE")]
    page: PathBuf,

    /// Truncation config file (JSON); flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Elements to clamp (default: .a-heading)
    #[arg(long, value_name = "SELECTOR")]
    selector: Option<String>,

    /// Maximum lines per element (default: 2)
    #[arg(long, value_name = "N")]
    max_lines: Option<u32>,

    /// Marker appended to truncated text (default: "...")
    #[arg(long, value_name = "TEXT")]
    ellipsis: Option<String>,

    /// Measure text with this TrueType/OpenType font instead of the
    /// built-in approximation
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Resize the viewport to WIDTH pixels at MS milliseconds (repeatable)
    #[arg(long = "resize", value_name = "WIDTH@MS")]
    resizes: Vec<ResizeEvent>,

    /// Print a JSON report instead of colored text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    config: &'a TruncateConfig,
    console: Vec<String>,
    passes: Vec<PassSnapshot>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let mut document = load_page(&cli.page)
        .with_context(|| format!("failed to load page {}", cli.page.display()))?;
    if let Some(font) = &cli.font {
        let metrics = FontdueFontMetrics::from_path(font)
            .with_context(|| format!("failed to load font {}", font.display()))?;
        document.set_font_metrics(Box::new(metrics));
    }

    let mut runtime = Runtime::new(&config).context("invalid truncation config")?;
    let mut console = BufferConsole::new();
    let passes = replay(&mut runtime, &mut document, &cli.resizes, &mut console);

    if cli.json {
        let report = Report {
            config: &config,
            console: console.take(),
            passes,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let mut stdout = StdConsole;
        for line in console.take() {
            stdout.log(&line);
        }
        print_passes(&passes);
    }

    Ok(())
}

/// Config file (or defaults) with command-line overrides applied.
fn build_config(cli: &Cli) -> Result<TruncateConfig> {
    let mut config = match &cli.config {
        Some(path) => TruncateConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TruncateConfig::default(),
    };
    if let Some(selector) = &cli.selector {
        config.selector.clone_from(selector);
    }
    if let Some(max_lines) = cli.max_lines {
        config.max_lines = max_lines;
    }
    if let Some(ellipsis) = &cli.ellipsis {
        config.ellipsis.clone_from(ellipsis);
    }
    Ok(config)
}

fn print_passes(passes: &[PassSnapshot]) {
    if passes.is_empty() {
        println!("{}", "no passes ran".dimmed());
        return;
    }
    for pass in passes {
        println!(
            "{} {}",
            format!("t={}ms", pass.at_ms).bold().cyan(),
            format!("{} pass, viewport {}px", pass.trigger, pass.viewport_width).dimmed()
        );
        for heading in &pass.headings {
            let kind = heading.kind.to_string();
            let kind = match heading.kind {
                TruncationKind::Unchanged => kind.green().to_string(),
                TruncationKind::WordBoundary => kind.yellow().to_string(),
                TruncationKind::MidWord => kind.red().to_string(),
            };
            println!(
                "  {:<28} {:<24} {}",
                heading.element.bold(),
                kind,
                heading.text
            );
            println!(
                "  {}",
                format!(
                    "budget {}px, {} measurements",
                    heading.budget, heading.measurements
                )
                .dimmed()
            );
        }
        for skipped in &pass.skipped {
            println!("  {:<28} {}", skipped.bold(), "skipped (no box)".dimmed());
        }
    }
}
