//! # workdesk-core
//!
//! Core functionality for workdesk: a local cache in front of a notes service,
//! plus the text reductions that make notes pages cheap to read.
//!
//! ## Architecture
//!
//! - **Document cache**: one JSON file per key with a fixed 24 hour TTL
//!   ([`doc_cache`])
//! - **Blocks**: typed view of the service's content blocks ([`blocks`])
//! - **Flattening**: blocks reduced to `{type, content}` records ([`flatten`])
//! - **Summaries**: length-bounded, keyword-aware summaries ([`summarize`])
//! - **Notes service**: HTTP client and cached page views ([`notes`])
//! - **Configuration** and **error handling** shared by the CLI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use workdesk_core::{Config, DocumentCache, NotesClient, NotesService};
//!
//! # async fn run() -> workdesk_core::Result<()> {
//! let config = Config::load()?;
//! let client = NotesClient::new(&config.notes, config.notes.token()?)?;
//! let cache = DocumentCache::open(&config.paths.cache_dir)?;
//! let service = NotesService::new(client, cache);
//!
//! let summary = service.page_summary("a1b2c3", 500, false).await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T, Error>`]. Cache reads are the
//! exception: a missing, malformed or expired entry is simply a miss.
//!
//! ```rust
//! use workdesk_core::Error;
//!
//! fn describe(err: &Error) -> &'static str {
//!     match err {
//!         Error::NotFound(_) => "no such page",
//!         e if e.is_recoverable() => "try again later",
//!         _ => "failed",
//!     }
//! }
//!
//! assert_eq!(describe(&Error::NotFound("p1".into())), "no such page");
//! ```

/// Typed content blocks
pub mod blocks;
/// Configuration loading and environment overrides
pub mod config;
/// File-backed document cache
pub mod doc_cache;
/// Error types and result aliases
pub mod error;
/// Block flattening
pub mod flatten;
/// Notes service client and page views
pub mod notes;
/// Length-bounded summaries
pub mod summarize;

// Re-export commonly used types
pub use blocks::{ContentBlock, RichText};
pub use config::{Config, NotesConfig, PathsConfig};
pub use doc_cache::{CACHE_TTL, CacheEntryInfo, CacheKey, DocumentCache};
pub use error::{Error, Result};
pub use flatten::{FlatBlock, flatten};
pub use notes::{
    DocumentSource, NotesClient, NotesService, PageRef, PageSummary, RecentUpdates, SimplifiedPage,
};
pub use summarize::{DEFAULT_MAX_LENGTH, summarize};
