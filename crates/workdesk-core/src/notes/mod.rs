//! Notes service integration.
//!
//! - [`DocumentSource`] is the seam to the remote service; [`NotesClient`]
//!   implements it over HTTP.
//! - [`page`] extracts titles, tags and index records from page JSON.
//! - [`NotesService`] combines a source with the [`DocumentCache`](crate::doc_cache::DocumentCache)
//!   and builds the simplified page, summary, index and recent-updates views.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// HTTP client for the notes API
pub mod client;
/// Helpers for reading page objects
pub mod page;
/// Cached page views
pub mod service;

pub use client::NotesClient;
pub use page::{PageRef, page_tags, page_title};
pub use service::{NotesService, PageSummary, RecentUpdates, SimplifiedPage};

/// Remote source of page documents and their blocks (allows mocking in tests).
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch a page object by id.
    async fn fetch_document(&self, id: &str) -> Result<Value>;

    /// Fetch the direct child blocks of a page or block, in page order.
    async fn fetch_child_blocks(&self, id: &str) -> Result<Vec<Value>>;

    /// Search pages; `filter` is passed through to the service unchanged.
    async fn search_pages(&self, query: &str, filter: Option<&Value>) -> Result<Vec<Value>>;
}
