//! workdesk CLI
//!
//! Reads pages from a notes service through a 24-hour document cache and
//! prints them as plain text, summaries or JSON.

mod cli;
mod commands;
mod output;
mod utils;

use anyhow::Result;
use clap::Parser;

use crate::cli::{CacheCommand, Cli, Commands, ConfigCommand, NotesCommand};
use crate::commands::{config_file, load_config};
use crate::utils::logging::initialize_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;

    let config_path = config_file(cli.config.as_deref())?;
    // Init must work even when the existing file does not load
    if let Commands::Config {
        command: ConfigCommand::Init { force },
    } = cli.command
    {
        return commands::config::init(std::io::stdout().lock(), &config_path, force);
    }

    let config = load_config(Some(&config_path))?;
    execute_command(cli.command, &config, &config_path).await
}

async fn execute_command(
    command: Commands,
    config: &workdesk_core::Config,
    config_path: &std::path::Path,
) -> Result<()> {
    match command {
        Commands::Notes { command } => match command {
            NotesCommand::Show {
                page_id,
                max_blocks,
                refresh,
                format,
            } => commands::notes::show(config, &page_id, max_blocks, refresh, format.resolve()).await,
            NotesCommand::Summary {
                page_id,
                max_length,
                refresh,
                format,
            } => {
                commands::notes::summary(config, &page_id, max_length, refresh, format.resolve())
                    .await
            },
            NotesCommand::Recent {
                days,
                limit,
                format,
            } => commands::notes::recent(config, days, limit, format.resolve()).await,
            NotesCommand::Index { database, format } => {
                commands::notes::index(config, database.as_deref(), format.resolve()).await
            },
        },
        Commands::Cache { command } => match command {
            CacheCommand::Status { format } => commands::cache::status(config, format.resolve()),
            CacheCommand::Clear { force } => commands::cache::clear(config, force),
        },
        Commands::Config { command } => match command {
            ConfigCommand::Show { format } => {
                commands::config::show(config, config_path, format.resolve())
            },
            ConfigCommand::Init { force } => commands::config::init(std::io::stdout().lock(), config_path, force),
        },
    }
}
