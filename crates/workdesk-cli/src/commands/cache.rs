//! `workdesk cache ...` commands

use std::io::{self, Write};

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use colored::Colorize;
use serde_json::json;
use workdesk_core::{CacheEntryInfo, Config, DocumentCache};

use super::open_cache;
use crate::output::{OutputFormat, print_json};

/// Print every cached entry with its age and freshness.
pub fn status(config: &Config, format: OutputFormat) -> Result<()> {
    let cache = open_cache(config)?;
    let entries = cache.entries()?;

    match format {
        OutputFormat::Json => print_json(&json!({
            "cacheDir": cache.dir(),
            "entries": entries,
        })),
        OutputFormat::Text => render_status(io::stdout().lock(), &cache, &entries),
    }
}

fn render_status<W: Write>(
    mut out: W,
    cache: &DocumentCache,
    entries: &[CacheEntryInfo],
) -> Result<()> {
    writeln!(out, "{} {}", "Cache:".bold(), cache.dir().display())?;
    if entries.is_empty() {
        writeln!(out, "{} No cached entries", "ℹ".blue())?;
        return Ok(());
    }

    let now = cache.now();
    for entry in entries {
        let state = if entry.fresh {
            "fresh".green()
        } else {
            "expired".yellow()
        };
        writeln!(
            out,
            "  {:<40} {:>10}  {state}",
            entry.key.as_str(),
            format_age(entry.cached_at, now)
        )?;
    }
    writeln!(out, "{} entries", entries.len())?;
    Ok(())
}

/// Human-readable age of an entry written at `cached_at`.
fn format_age(cached_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = (now - cached_at).max(Duration::zero());
    let minutes = age.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }

    let hours = age.num_hours();
    let days = age.num_days();
    if hours < 1 {
        format!("{minutes}m")
    } else if days < 1 {
        format!("{hours}h {}m", minutes % 60)
    } else {
        format!("{days}d {}h", hours % 24)
    }
}

/// Cache operations needed by the clear command.
pub trait ClearCache {
    /// Keys of every entry currently stored.
    fn list_keys(&self) -> Result<Vec<String>>;
    /// Delete every entry, returning how many were removed.
    fn clear_all(&self) -> Result<usize>;
}

impl ClearCache for DocumentCache {
    fn list_keys(&self) -> Result<Vec<String>> {
        Ok(self.keys()?)
    }

    fn clear_all(&self) -> Result<usize> {
        Ok(self.clear()?)
    }
}

/// Result of [`execute_clear`].
#[derive(Debug, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Nothing was cached.
    AlreadyEmpty,
    /// The user declined the prompt.
    Cancelled,
    /// Entries were deleted.
    Cleared { removed: usize },
}

/// Clear the cache, asking `confirm` first unless `force` is set.
///
/// # Errors
///
/// Returns an error if listing, confirmation or deletion fails.
pub fn execute_clear<S, W, C>(cache: &S, mut writer: W, force: bool, mut confirm: C) -> Result<ClearOutcome>
where
    S: ClearCache,
    W: Write,
    C: FnMut(&[String]) -> Result<bool>,
{
    let keys = cache.list_keys()?;
    if keys.is_empty() {
        writeln!(writer, "{} Cache is already empty", "ℹ".blue())?;
        return Ok(ClearOutcome::AlreadyEmpty);
    }

    writeln!(
        writer,
        "{} This will delete {} cached document(s):",
        "⚠".yellow(),
        keys.len()
    )?;
    for key in &keys {
        writeln!(writer, "  • {key}")?;
    }
    writeln!(writer)?;

    if !force && !confirm(&keys)? {
        writeln!(writer, "{} Cancelled", "✗".red())?;
        return Ok(ClearOutcome::Cancelled);
    }

    let removed = cache.clear_all()?;
    writeln!(writer, "{} Removed {removed} cached document(s)", "✓".green())?;
    Ok(ClearOutcome::Cleared { removed })
}

/// Clear the configured cache using stdin for confirmation.
pub fn clear(config: &Config, force: bool) -> Result<()> {
    let cache = open_cache(config)?;
    let mut stdout = io::stdout().lock();
    let mut input = String::new();

    execute_clear(&cache, &mut stdout, force, |_keys| {
        let mut prompt = io::stdout().lock();
        write!(prompt, "Are you sure you want to continue? [y/N] ")?;
        prompt.flush()?;

        input.clear();
        io::stdin().read_line(&mut input)?;
        Ok(matches!(
            input.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    })?;
    Ok(())
}
