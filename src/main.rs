mod cli;
mod report;

use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    match args.cmd {
        cli::Command::Summarize(cmd) => report::run(cmd).context("summarize failed"),
        cli::Command::Catalog(cmd) => report::run_catalog(cmd).context("catalog failed"),
    }
}
