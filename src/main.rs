mod analysis;
mod cache;
mod catalog;
mod cli;
mod commands;
mod condense;
mod config;
mod error;
mod shell;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Init { force } = cli.command {
        let path = match cli.config {
            Some(path) => path,
            None => Config::config_path()?,
        };
        return commands::init::run(&path, force);
    }

    let config = Config::load(cli.config.as_deref())?;
    let cache = cli.cache.as_deref();

    match cli.command {
        Commands::Explore => {
            commands::explore::run(&config, cache)?;
        }
        Commands::Fetch { id } => {
            commands::fetch::run(&config, cache, &id, cli.quiet)?;
        }
        Commands::List => {
            commands::list::run(&config, cache)?;
        }
        Commands::Show { id, full } => {
            commands::show::run(&config, cache, &id, full)?;
        }
        Commands::Analyze { id, kind, model } => {
            commands::analyze::run(&config, cache, &id, kind, model, cli.quiet)?;
        }
        Commands::Condense { file, max_chars } => {
            commands::condense::run(&file, max_chars)?;
        }
        Commands::Init { .. } => unreachable!("handled before loading config"),
    }

    Ok(())
}

/// Log to stderr; RUST_LOG overrides the level picked by --verbose
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
