use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use attlog_cli::commands::{events, report};
use attlog_cli::{Cli, Commands, Config};
use attlog_core::DumpSource;

/// Builds the file-backed punch source from CLI flags, falling back to
/// configured paths.
fn open_source(
    cli_events: Option<PathBuf>,
    cli_users: Option<PathBuf>,
    config_path: Option<&std::path::Path>,
) -> Result<DumpSource> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let events_path = cli_events.unwrap_or(config.events_path);
    let users_path = cli_users.unwrap_or(config.users_path);
    Ok(DumpSource::new(events_path, Some(users_path)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match cli.command {
        Some(Commands::Report {
            events,
            users,
            start,
            end,
            json,
        }) => {
            let source = open_source(events, users, cli.config.as_deref())?;
            report::run(&source, start, end, json)?;
        }
        Some(Commands::Events {
            events,
            users,
            start,
            end,
        }) => {
            let source = open_source(events, users, cli.config.as_deref())?;
            events::run(&source, start, end)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
