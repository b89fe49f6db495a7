//! Configuration management for workdesk.
//!
//! Settings live in a single TOML file. Every section and field has a default,
//! so a partial file only overrides what it names.
//!
//! ## Resolution Order
//!
//! 1. **Defaults**: [`Config::default`]
//! 2. **Config file**: platform config directory (see [`Config::config_path`]),
//!    or an explicit path passed to [`Config::load_from`]
//! 3. **Environment variables**: `WORKDESK_CACHE_DIR`, `WORKDESK_NOTES_URL`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [notes]
//! base_url = "https://api.notion.com/v1"
//! api_version = "2022-06-28"
//! token_env = "NOTION_TOKEN"
//! max_blocks = 50
//! summary_max_length = 500
//! recent_days = 7
//! recent_summary_limit = 5
//!
//! [paths]
//! cache_dir = "/home/user/.local/share/workdesk/notes-cache"
//! ```
//!
//! ```rust
//! use workdesk_core::Config;
//!
//! let config: Config = toml::from_str("[notes]\nmax_blocks = 20\n")?;
//! assert_eq!(config.notes.max_blocks, 20);
//! assert_eq!(config.notes.summary_max_length, 500);
//! # Ok::<(), toml::de::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::summarize::DEFAULT_MAX_LENGTH;
use crate::{Error, Result};

/// Environment variable overriding `paths.cache_dir`.
pub const CACHE_DIR_ENV: &str = "WORKDESK_CACHE_DIR";
/// Environment variable overriding `notes.base_url`.
pub const NOTES_URL_ENV: &str = "WORKDESK_NOTES_URL";

const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
const DEFAULT_API_VERSION: &str = "2022-06-28";
const DEFAULT_TOKEN_ENV: &str = "NOTION_TOKEN";

/// Top-level workdesk configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Notes service connection and page view settings
    pub notes: NotesConfig,
    /// File system locations
    pub paths: PathsConfig,
}

/// Notes service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Base URL of the notes API, without a trailing endpoint.
    pub base_url: String,
    /// Value sent in the `Notion-Version` header.
    pub api_version: String,
    /// Name of the environment variable holding the integration token.
    ///
    /// The token itself is never written to the config file.
    pub token_env: String,
    /// Blocks kept by the simplified page view.
    pub max_blocks: usize,
    /// Default summary budget in characters.
    pub summary_max_length: usize,
    /// Look-back window for recently edited pages.
    pub recent_days: u32,
    /// How many recent pages get a summary.
    pub recent_summary_limit: usize,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            max_blocks: 50,
            summary_max_length: DEFAULT_MAX_LENGTH,
            recent_days: 7,
            recent_summary_limit: 5,
        }
    }
}

impl NotesConfig {
    /// Read the integration token from the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the variable is unset or empty.
    pub fn token(&self) -> Result<String> {
        self.token_from(|name| std::env::var(name).ok())
    }

    fn token_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        lookup(&self.token_env)
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(format!(
                    "Notes token not found: set the {} environment variable",
                    self.token_env
                ))
            })
    }
}

/// File system paths configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding cached notes documents.
    ///
    /// Default locations:
    /// - Linux: `~/.local/share/workdesk/notes-cache`
    /// - macOS: `~/Library/Application Support/dev.workdesk.workdesk/notes-cache`
    /// - Windows: `%APPDATA%\workdesk\workdesk\data\notes-cache`
    pub cache_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            cache_dir: project_dirs().map_or_else(
                || PathBuf::from(".notes_cache"),
                |dirs| dirs.data_dir().join("notes-cache"),
            ),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("dev", "workdesk", "workdesk")
}

impl Config {
    /// Load configuration from the default location, or defaults if there is
    /// no config file yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or the
    /// file exists but cannot be read, parsed or validated.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read, is not valid
    /// TOML, or holds invalid values.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization or any file operation fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(path, content).map_err(|e| Error::Config(format!("Failed to write config: {e}")))
    }

    /// Apply `WORKDESK_CACHE_DIR` and `WORKDESK_NOTES_URL` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the overridden URL is invalid.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dir) = lookup(CACHE_DIR_ENV).filter(|v| !v.is_empty()) {
            self.paths.cache_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup(NOTES_URL_ENV).filter(|v| !v.is_empty()) {
            self.notes.base_url = url;
        }
        self.validate()
    }

    /// Check values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `notes.base_url` is not an http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.notes.base_url).map_err(|e| {
            Error::Config(format!("Invalid notes base_url '{}': {e}", self.notes.base_url))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::Config(format!(
                "Notes base_url must use http or https, got '{other}'"
            ))),
        }
    }

    /// Default config file location.
    ///
    /// - Linux: `~/.config/workdesk/config.toml`
    /// - macOS: `~/Library/Application Support/dev.workdesk.workdesk/config.toml`
    /// - Windows: `%APPDATA%\workdesk\workdesk\config\config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf> {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.notes.base_url, "https://api.notion.com/v1");
        assert_eq!(config.notes.api_version, "2022-06-28");
        assert_eq!(config.notes.token_env, "NOTION_TOKEN");
        assert_eq!(config.notes.max_blocks, 50);
        assert_eq!(config.notes.summary_max_length, 500);
        assert_eq!(config.notes.recent_days, 7);
        assert_eq!(config.notes.recent_summary_limit, 5);
        let cache_dir = &config.paths.cache_dir;
        assert!(cache_dir.ends_with("notes-cache") || cache_dir.ends_with(".notes_cache"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[notes]\nmax_blocks = 10\nrecent_days = 3\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.notes.max_blocks, 10);
        assert_eq!(config.notes.recent_days, 3);
        assert_eq!(config.notes.summary_max_length, 500);
        assert_eq!(config.notes.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.paths, PathsConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.notes.base_url = "http://localhost:8080/v1".to_string();
        config.notes.summary_max_length = 280;
        config.paths.cache_dir = temp.path().join("cache");

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        match Config::load_from(&path) {
            Err(Error::Config(msg)) => assert!(msg.contains("Failed to parse config")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        fs::write(&path, "[notes]\nbase_url = \"not a url\"\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        fs::write(&path, "[notes]\nbase_url = \"ftp://example.com\"\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_env_overrides_replace_file_values() {
        let mut config = Config::default();
        config
            .apply_overrides_from(env(&[
                (CACHE_DIR_ENV, "/tmp/workdesk-cache"),
                (NOTES_URL_ENV, "http://127.0.0.1:9000"),
            ]))
            .unwrap();

        assert_eq!(config.paths.cache_dir, PathBuf::from("/tmp/workdesk-cache"));
        assert_eq!(config.notes.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_empty_env_overrides_are_ignored() {
        let mut config = Config::default();
        config
            .apply_overrides_from(env(&[(CACHE_DIR_ENV, ""), (NOTES_URL_ENV, "")]))
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_env_url_is_rejected() {
        let mut config = Config::default();
        let result = config.apply_overrides_from(env(&[(NOTES_URL_ENV, "::nope::")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_token_lookup() {
        let notes = NotesConfig::default();

        assert_eq!(
            notes.token_from(env(&[("NOTION_TOKEN", "secret_abc")])).unwrap(),
            "secret_abc"
        );
        assert!(matches!(notes.token_from(env(&[])), Err(Error::Config(_))));
        assert!(matches!(
            notes.token_from(env(&[("NOTION_TOKEN", "  ")])),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_token_env_name_is_configurable() {
        let notes = NotesConfig {
            token_env: "TEAM_NOTES_TOKEN".to_string(),
            ..NotesConfig::default()
        };
        let err = notes.token_from(env(&[("NOTION_TOKEN", "wrong")])).unwrap_err();
        assert!(err.to_string().contains("TEAM_NOTES_TOKEN"));
    }
}
