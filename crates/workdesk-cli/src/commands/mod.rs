//! Command implementations, one module per command group.

pub mod cache;
pub mod config;
pub mod notes;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use workdesk_core::{Config, DocumentCache, NotesClient, NotesService};

/// Load configuration from `--config`/`WORKDESK_CONFIG` or the default
/// location, then apply environment overrides.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = config_file(explicit)?;
    let mut config = Config::load_from(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    config
        .apply_env_overrides()
        .context("Invalid environment override")?;

    tracing::debug!("Using cache directory {}", config.paths.cache_dir.display());
    Ok(config)
}

/// Config file in use: `--config`/`WORKDESK_CONFIG` or the default location.
pub fn config_file(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Config::config_path()?),
    }
}

/// Open the document cache configured in `config`.
pub fn open_cache(config: &Config) -> Result<DocumentCache> {
    DocumentCache::open(&config.paths.cache_dir).context("Failed to open document cache")
}

/// Build a notes service talking to the configured endpoint.
///
/// Requires the integration token, so only commands that may reach the
/// network call this.
pub fn open_service(config: &Config) -> Result<NotesService<NotesClient>> {
    let token = config.notes.token()?;
    let client = NotesClient::new(&config.notes, token)?;
    Ok(NotesService::new(client, open_cache(config)?)
        .with_max_blocks(config.notes.max_blocks)
        .with_summary_max_length(config.notes.summary_max_length))
}
