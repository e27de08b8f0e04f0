mod cli;
mod commands;
mod config;
mod output;

use anyhow::Context;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _log = tradepool_log::init_with(
        tradepool_log::Config::from_env().with_verbosity(cli.verbose),
    )
    .context("failed to initialise logging")?;

    let registry = config::load(cli.config.as_deref(), &cli.overrides)?;
    tracing::debug!(?registry, "registry configuration loaded");

    match cli.command {
        Command::Stats { format } => commands::stats::run(&registry, format),
        Command::Bench {
            threads,
            cycles,
            format,
        } => commands::bench::run(&registry, threads, cycles, format),
    }
}
