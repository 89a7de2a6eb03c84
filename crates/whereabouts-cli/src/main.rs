//! `user-search`: assemble a user lookup condition document from flags.

mod cli;
mod output;
mod settings;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use whereabouts::{Assembler, LookupConsumer};

use crate::cli::Cli;
use crate::output::RenderConsumer;

const ENV_LOG: &str = "WHEREABOUTS_LOG";

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let rendered = run(&cli)?;
    println!("{rendered}");
    Ok(())
}

fn run(cli: &Cli) -> Result<String> {
    let config = settings::load(cli.config.as_deref(), cli.overrides())?;
    let filters = cli.filters(Utc::now())?;
    tracing::debug!(?filters, "filter record");

    let conditions = filters.conditions(&Assembler::new(config));
    RenderConsumer::new(cli.format)
        .find(conditions)
        .context("failed to render conditions")
}

fn init_logging() {
    let filter = std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_env_filter(filter)
        .init();
}
