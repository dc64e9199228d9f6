#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

use anyhow::Context;
use clap::Parser;
use sysrev_config::SysrevConfig;

mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod ui;
mod write_lock;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("sysrev error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = SysrevConfig::load_with_dotenv().context("failed to load configuration")?;
    let ctx = context::AppContext::new(config, flags);

    let command = cli.command;
    let write_lock = if command_requires_write_lock(&command) {
        Some(write_lock::acquire(&ctx.lock_path()).await?)
    } else {
        None
    };

    let result = commands::dispatch::dispatch(command, &ctx).await;
    drop(write_lock);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SYSREV_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Commands that write the store take the single-writer lock.
fn command_requires_write_lock(command: &cli::Commands) -> bool {
    match command {
        cli::Commands::Sync(_) => true,
        cli::Commands::Info(_)
        | cli::Commands::Labels(_)
        | cli::Commands::Articles(_)
        | cli::Commands::Article(_)
        | cli::Commands::SetLabels(_)
        | cli::Commands::Upload(_)
        | cli::Commands::Download(_)
        | cli::Commands::Annotations(_)
        | cli::Commands::Tables(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn only_sync_takes_the_write_lock() {
        let sync = cli::Cli::try_parse_from(["sysrev", "sync", "1"]).unwrap();
        let tables = cli::Cli::try_parse_from(["sysrev", "tables"]).unwrap();
        assert!(command_requires_write_lock(&sync.command));
        assert!(!command_requires_write_lock(&tables.command));
    }
}
