//! `workdesk config ...` commands

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde_json::json;
use workdesk_core::Config;

use crate::output::{OutputFormat, print_json};

/// Write a config file holding the defaults.
///
/// An existing file is only replaced with `force`.
pub fn init<W: Write>(mut out: W, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::default()
        .save_to(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writeln!(out, "{} Wrote default config to {}", "✓".green(), path.display())?;
    Ok(())
}

/// Print the effective configuration, after file and environment overrides.
pub fn show(config: &Config, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "path": path,
            "exists": path.exists(),
            "config": config,
        })),
        OutputFormat::Text => render_config(io::stdout().lock(), config, path),
    }
}

fn render_config<W: Write>(mut out: W, config: &Config, path: &Path) -> Result<()> {
    let origin = if path.exists() { "" } else { " (not found, using defaults)" };
    writeln!(out, "{} {}{}", "# Config:".dimmed(), path.display(), origin.dimmed())?;
    write!(out, "{}", toml::to_string_pretty(config)?)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut out = Vec::new();
        init(&mut out, &path, false).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
        assert!(String::from_utf8(out).unwrap().contains("Wrote default config"));
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[notes]\nmax_blocks = 3\n").unwrap();

        let err = init(Vec::new(), &path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(Config::load_from(&path).unwrap().notes.max_blocks, 3);

        init(Vec::new(), &path, true).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_render_config_marks_missing_file() {
        colored::control::set_override(false);
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let mut out = Vec::new();
        render_config(&mut out, &Config::default(), &path).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("(not found, using defaults)"));
        assert!(text.contains("[notes]"));
        assert!(text.contains("max_blocks = 50"));
    }
}
