mod script;

use anyhow::{Context, Result};
use behaviors::{BehaviorConfig, Page, PageEffect, initialize};
use clap::Parser;
use script::{Script, node_label, run_step};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Load a server-rendered converter page, attach the page behaviors and replay user actions
/// against it without a browser.
#[derive(Parser)]
#[command(name = "convert-page", version, about, long_about = None)]
#[command(
    after_help = "Examples:\n  convert-page index.html\n  convert-page index.html --script drop.toml --dump\n  RUST_LOG=behaviors=debug convert-page index.html --config page.toml\n"
)]
struct Cli {
    /// Page markup to load
    page: PathBuf,

    /// Behavior config (TOML) overriding element ids, classes and colours
    #[arg(long)]
    config: Option<PathBuf>,

    /// Event script (TOML) replayed after initialization
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print the resulting document
    #[arg(long)]
    dump: bool,
}

fn init_logging() {
    // RUST_LOG wins over the default level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn describe(page: &Page, effect: &PageEffect) -> String {
    let doc = page.document();
    match effect {
        PageEffect::ScrollIntoView { target, smooth } => {
            format!("scroll {} into view (smooth: {smooth})", node_label(doc, *target))
        }
        PageEffect::Navigate { href } => format!("navigate to {href}"),
        PageEffect::NativeContextMenu { target } => {
            format!("open context menu on {}", node_label(doc, *target))
        }
        PageEffect::OpenDroppedFiles { target, count } => {
            format!("open {count} dropped file(s) from {}", node_label(doc, *target))
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BehaviorConfig::load(path)
            .with_context(|| format!("loading behavior config {}", path.display()))?,
        None => BehaviorConfig::default(),
    };
    let markup = std::fs::read_to_string(&cli.page)
        .with_context(|| format!("reading page {}", cli.page.display()))?;

    let mut page = Page::from_html(&markup, config);
    let report = initialize(&mut page);
    println!("initialized: {report}");

    if let Some(path) = &cli.script {
        let script = Script::load(path)
            .with_context(|| format!("loading event script {}", path.display()))?;
        for (n, step) in script.steps.iter().enumerate() {
            let outcome = run_step(&mut page, step)
                .with_context(|| format!("step {} ({})", n + 1, step.action()))?;
            println!(
                "step {}: {} -> listeners={} prevented={} stopped={}",
                n + 1,
                step.action(),
                outcome.delivered,
                outcome.default_prevented,
                outcome.propagation_stopped
            );
        }
    }

    for effect in page.effects() {
        println!("effect: {}", describe(&page, effect));
    }

    if cli.dump {
        println!("{}", html::to_html(page.document()));
    }
    Ok(())
}
