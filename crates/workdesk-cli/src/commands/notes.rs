//! `workdesk notes ...` commands

use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use workdesk_core::{Config, FlatBlock, PageRef, RecentUpdates, SimplifiedPage};

use super::open_service;
use crate::output::{OutputFormat, print_json};

/// Print a simplified page.
pub async fn show(
    config: &Config,
    page_id: &str,
    max_blocks: Option<usize>,
    refresh: bool,
    format: OutputFormat,
) -> Result<()> {
    let service = open_service(config)?;
    let max_blocks = max_blocks.unwrap_or(config.notes.max_blocks);
    let page = service
        .simplified_page(page_id, max_blocks, refresh)
        .await
        .with_context(|| format!("Failed to load page {page_id}"))?;

    match format {
        OutputFormat::Json => print_json(&page),
        OutputFormat::Text => render_page(io::stdout().lock(), &page),
    }
}

/// Print a page summary.
pub async fn summary(
    config: &Config,
    page_id: &str,
    max_length: Option<usize>,
    refresh: bool,
    format: OutputFormat,
) -> Result<()> {
    let service = open_service(config)?;
    let max_length = max_length.unwrap_or(config.notes.summary_max_length);
    let summary = service
        .page_summary(page_id, max_length, refresh)
        .await
        .with_context(|| format!("Failed to summarize page {page_id}"))?;

    match format {
        OutputFormat::Json => print_json(&json!({
            "id": page_id,
            "maxLength": max_length,
            "length": summary.chars().count(),
            "summary": summary,
        })),
        OutputFormat::Text => {
            let mut out = io::stdout().lock();
            writeln!(out, "{summary}")?;
            Ok(())
        },
    }
}

/// Print recently edited pages and their summaries.
pub async fn recent(
    config: &Config,
    days: Option<u32>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let service = open_service(config)?;
    let days = days.unwrap_or(config.notes.recent_days);
    let limit = limit.unwrap_or(config.notes.recent_summary_limit);
    let updates = service
        .recent_updates(days, limit)
        .await
        .context("Failed to list recent pages")?;

    match format {
        OutputFormat::Json => print_json(&updates),
        OutputFormat::Text => render_recent(io::stdout().lock(), &updates),
    }
}

/// Print the page index.
pub async fn index(config: &Config, database: Option<&str>, format: OutputFormat) -> Result<()> {
    let service = open_service(config)?;
    let index = service
        .page_index(database)
        .await
        .context("Failed to build page index")?;

    match format {
        OutputFormat::Json => print_json(&index),
        OutputFormat::Text => render_index(io::stdout().lock(), &index),
    }
}

fn title_or_untitled(title: &str) -> &str {
    if title.is_empty() { "Untitled" } else { title }
}

/// Render a simplified page as plain text, one line per block.
pub fn render_page<W: Write>(mut out: W, page: &SimplifiedPage) -> Result<()> {
    writeln!(out, "{}", title_or_untitled(&page.title).bold())?;
    if !page.url.is_empty() {
        writeln!(out, "{}", page.url.dimmed())?;
    }
    if !page.last_edited.is_empty() {
        writeln!(out, "{} {}", "Last edited:".dimmed(), page.last_edited)?;
    }
    writeln!(out)?;

    let mut number = 0;
    for block in &page.blocks {
        number = if block.block_type == "numbered_list_item" {
            number + 1
        } else {
            0
        };
        render_block(&mut out, block, number)?;
    }
    Ok(())
}

fn render_block<W: Write>(out: &mut W, block: &FlatBlock, number: usize) -> Result<()> {
    let text = block.content.as_str();
    match block.block_type.as_str() {
        "heading_1" => writeln!(out, "{}", format!("# {text}").bold())?,
        "heading_2" => writeln!(out, "{}", format!("## {text}").bold())?,
        "heading_3" => writeln!(out, "{}", format!("### {text}").bold())?,
        "bulleted_list_item" => writeln!(out, "• {text}")?,
        "numbered_list_item" => writeln!(out, "{number}. {text}")?,
        "to_do" => {
            let mark = if block.extras.checked.unwrap_or(false) {
                "[x]".green()
            } else {
                "[ ]".normal()
            };
            writeln!(out, "{mark} {text}")?;
        },
        "toggle" => writeln!(out, "▸ {text}")?,
        "code" => {
            let language = block.extras.language.as_deref().unwrap_or_default();
            writeln!(out, "```{language}")?;
            writeln!(out, "{text}")?;
            writeln!(out, "```")?;
        },
        "paragraph" => writeln!(out, "{text}")?,
        "" => {},
        other => writeln!(out, "{}", format!("[{other}]").dimmed())?,
    }
    Ok(())
}

/// Render recent pages followed by their summaries.
pub fn render_recent<W: Write>(mut out: W, updates: &RecentUpdates) -> Result<()> {
    writeln!(
        out,
        "Found {} page(s) edited in the last {} day(s)",
        updates.recent_pages.len(),
        updates.days
    )?;
    for (i, page) in updates.recent_pages.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {} {}",
            i + 1,
            title_or_untitled(&page.title).bold(),
            format!("({})", page.last_edited).dimmed()
        )?;
    }

    for summary in &updates.summaries {
        writeln!(out)?;
        writeln!(out, "{}", title_or_untitled(&summary.title).cyan().bold())?;
        if !summary.url.is_empty() {
            writeln!(out, "{}", summary.url.dimmed())?;
        }
        writeln!(out, "{}", summary.summary)?;
    }
    Ok(())
}

/// Render the page index, one page per line.
pub fn render_index<W: Write>(mut out: W, index: &BTreeMap<String, PageRef>) -> Result<()> {
    for (id, page) in index {
        write!(out, "{}  {}", id.dimmed(), title_or_untitled(&page.title))?;
        if !page.tags.is_empty() {
            write!(out, "  {}", format!("[{}]", page.tags.join(", ")).yellow())?;
        }
        writeln!(out)?;
    }
    writeln!(out, "{} page(s)", index.len())?;
    Ok(())
}
