use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info};

use super::DocumentSource;
use super::page::PageRef;
use crate::blocks::ContentBlock;
use crate::doc_cache::{CacheKey, DocumentCache};
use crate::flatten::{FlatBlock, flatten};
use crate::summarize::{DEFAULT_MAX_LENGTH, summarize};
use crate::Result;

/// Blocks kept by the simplified page view unless configured otherwise.
pub const DEFAULT_MAX_BLOCKS: usize = 50;

/// A page reduced to its metadata and flattened blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedPage {
    /// Page id as requested.
    pub id: String,
    /// Plain-text title.
    pub title: String,
    /// Link to the page.
    pub url: String,
    /// `last_edited_time` as sent by the service.
    pub last_edited: String,
    /// `created_time` as sent by the service.
    pub created: String,
    /// Leading blocks, flattened.
    pub blocks: Vec<FlatBlock>,
}

/// Summary of one recently edited page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    /// Page id.
    pub id: String,
    /// Plain-text title.
    pub title: String,
    /// Link to the page.
    pub url: String,
    /// Length-bounded summary text.
    pub summary: String,
}

/// Recently edited pages, with summaries for the most recent few.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentUpdates {
    /// Look-back window in days.
    pub days: u32,
    /// Every page edited inside the window, most recent first.
    pub recent_pages: Vec<PageRef>,
    /// Summaries for the leading pages.
    pub summaries: Vec<PageSummary>,
}

/// Page views over a [`DocumentSource`], with page documents and block lists
/// going through the [`DocumentCache`].
///
/// Searches are never cached.
#[derive(Debug)]
pub struct NotesService<S> {
    source: S,
    cache: DocumentCache,
    max_blocks: usize,
    summary_max_length: usize,
}

impl<S: DocumentSource> NotesService<S> {
    /// Create a service reading through `cache`.
    pub const fn new(source: S, cache: DocumentCache) -> Self {
        Self {
            source,
            cache,
            max_blocks: DEFAULT_MAX_BLOCKS,
            summary_max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Blocks kept when building summaries.
    #[must_use]
    pub const fn with_max_blocks(mut self, max_blocks: usize) -> Self {
        self.max_blocks = max_blocks;
        self
    }

    /// Summary budget used by [`recent_updates`](Self::recent_updates).
    #[must_use]
    pub const fn with_summary_max_length(mut self, max_length: usize) -> Self {
        self.summary_max_length = max_length;
        self
    }

    /// The underlying cache.
    pub const fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// Page object for `id`, cached under the page id.
    pub async fn page(&self, id: &str, force_refresh: bool) -> Result<Value> {
        let key = CacheKey::page(id)?;
        self.cache
            .get_or_fetch_async(&key, force_refresh, || self.source.fetch_document(id))
            .await
    }

    /// Child blocks of `id`, cached under `<id>_children`.
    pub async fn child_blocks(&self, id: &str, force_refresh: bool) -> Result<Vec<Value>> {
        let key = CacheKey::children(id)?;
        self.cache
            .get_or_fetch_async(&key, force_refresh, || self.source.fetch_child_blocks(id))
            .await
    }

    /// Page metadata plus its first `max_blocks` blocks, flattened.
    pub async fn simplified_page(
        &self,
        id: &str,
        max_blocks: usize,
        force_refresh: bool,
    ) -> Result<SimplifiedPage> {
        let page = self.page(id, force_refresh).await?;
        let raw_blocks = self.child_blocks(id, force_refresh).await?;

        let blocks: Vec<ContentBlock> = raw_blocks
            .iter()
            .take(max_blocks)
            .map(ContentBlock::from_json)
            .collect();
        debug!(
            "Simplified {} with {} of {} blocks",
            id,
            blocks.len(),
            raw_blocks.len()
        );

        let meta = PageRef::from_page(&page);
        Ok(SimplifiedPage {
            id: id.to_string(),
            title: meta.title,
            url: meta.url,
            last_edited: meta.last_edited,
            created: meta.created,
            blocks: flatten(&blocks),
        })
    }

    /// Summary of at most `max_length` characters over the simplified page.
    pub async fn page_summary(
        &self,
        id: &str,
        max_length: usize,
        force_refresh: bool,
    ) -> Result<String> {
        let page = self.simplified_page(id, self.max_blocks, force_refresh).await?;
        Ok(summarize(&page.blocks, max_length))
    }

    /// Index of pages visible to the integration, keyed by page id.
    ///
    /// With a database id the search is narrowed to page objects. Pages
    /// without an id are skipped.
    pub async fn page_index(&self, database_id: Option<&str>) -> Result<BTreeMap<String, PageRef>> {
        let filter = database_id.map(|db| {
            debug!("Indexing pages for database {}", db);
            json!({"property": "object", "value": "page"})
        });

        let pages = self.source.search_pages("", filter.as_ref()).await?;
        let index: BTreeMap<String, PageRef> = pages
            .iter()
            .map(PageRef::from_page)
            .filter(|page| !page.id.is_empty())
            .map(|page| (page.id.clone(), page))
            .collect();

        info!("Indexed {} pages", index.len());
        Ok(index)
    }

    /// Pages edited within the last `days` days, most recent first.
    ///
    /// Pages whose `last_edited_time` does not parse are left out. A window
    /// reaching past the earliest representable time includes every page.
    pub async fn recently_updated(&self, days: u32) -> Result<Vec<PageRef>> {
        let cutoff = self
            .cache
            .now()
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let pages = self.source.search_pages("", None).await?;

        let mut recent: Vec<_> = pages
            .iter()
            .map(PageRef::from_page)
            .filter_map(|page| {
                let edited = page.last_edited_at()?;
                (edited >= cutoff).then_some((edited, page))
            })
            .collect();
        recent.sort_by(|a, b| b.0.cmp(&a.0));

        debug!("{} of {} pages edited since {}", recent.len(), pages.len(), cutoff);
        Ok(recent.into_iter().map(|(_, page)| page).collect())
    }

    /// Recently edited pages plus summaries for the first `summary_limit`.
    pub async fn recent_updates(&self, days: u32, summary_limit: usize) -> Result<RecentUpdates> {
        let recent_pages = self.recently_updated(days).await?;

        let mut summaries = Vec::new();
        for page in recent_pages.iter().take(summary_limit) {
            let summary = self
                .page_summary(&page.id, self.summary_max_length, false)
                .await?;
            summaries.push(PageSummary {
                id: page.id.clone(),
                title: page.title.clone(),
                url: page.url.clone(),
                summary,
            });
        }

        Ok(RecentUpdates {
            days,
            recent_pages,
            summaries,
        })
    }
}
