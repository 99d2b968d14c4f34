//! Renders a RichString template against a sample inventory.
//!
//! ```text
//! richstring-demo --template "[Slots:b] {maxSlots} | {weapons->1}" --alternate
//! RUST_LOG=richstring=debug richstring-demo --lenient --template "{missing}"
//! ```

mod inventory;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use richstring::{ErrorPolicy, Output, Settings, Template};

use crate::inventory::Inventory;

const DEFAULT_TEMPLATE: &str = "[Inventory:b:u] {count}/{maxSlots} slots\n\
[Main weapon:i] {mainWeapon}\n\
[Backup:i] {weapons->0.name} ({weapons->0})";

#[derive(Parser, Debug)]
#[command(name = "richstring-demo")]
#[command(about = "Render a RichString template against a sample inventory")]
struct Args {
    /// Template to render
    #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
    template: String,

    /// Use the alternate form of values with a custom format
    #[arg(short, long)]
    alternate: bool,

    /// Print the raw template before the rendered text
    #[arg(long)]
    raw: bool,

    /// Emit ANSI escape codes instead of markup tags
    #[arg(long)]
    ansi: bool,

    /// Recover from errors instead of failing
    #[arg(long)]
    lenient: bool,

    /// YAML settings file (policy, delimiters, keys, colors)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let report = run(&args)?;
    println!("{}", report.text);
    Ok(())
}

/// Rendered output plus the number of errors the lenient policy absorbed.
#[derive(Debug)]
struct Report {
    text: String,
    recovered: usize,
}

/// Builds the configuration, binds the template and renders it.
fn run(args: &Args) -> Result<Report> {
    let mut settings = match &args.settings {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if args.lenient {
        settings.policy = ErrorPolicy::Lenient;
    }

    let output = if args.ansi { Output::Ansi } else { Output::Markup };
    let config = settings.into_config(output)?;

    let inventory = Inventory::sample();
    let template =
        Template::bound(args.template.as_str(), &inventory, &config).context("failed to bind template")?;
    let rendered = template
        .render_report(args.alternate)
        .context("failed to render template")?;

    let recovered = template.diagnostics().len() + rendered.diagnostics.len();
    if recovered > 0 {
        tracing::warn!(recovered, "rendered with recovered errors");
    }

    let text = if args.raw {
        format!("{}\n{}", template.raw_text(), rendered.text)
    } else {
        rendered.text
    };
    Ok(Report { text, recovered })
}
