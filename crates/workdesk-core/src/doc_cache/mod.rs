//! Local cache for documents fetched from the notes service.
//!
//! Each document is stored as one JSON file per key and served for
//! [`CACHE_TTL`] after it was written. Expired entries are ignored on read
//! (lazy expiry) and replaced on the next fetch.
//!
//! ## Key Types
//!
//! - [`DocumentCache`]: File-backed cache with `get`, `put` and `get_or_fetch`
//! - [`CacheKey`]: Validated key mapping to `<key>.json`
//! - [`CacheEntry`]: On-disk entry shape (`content` + `cached_at`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use serde_json::json;
//! use workdesk_core::doc_cache::{CacheKey, DocumentCache};
//!
//! let cache = DocumentCache::open("/tmp/workdesk-cache")?;
//! let key = CacheKey::children("a1b2c3")?;
//!
//! cache.put(&key, &json!([{"type": "paragraph"}]))?;
//! let blocks: Option<Vec<serde_json::Value>> = cache.get(&key);
//! assert_eq!(blocks.map(|b| b.len()), Some(1));
//! # Ok::<(), workdesk_core::Error>(())
//! ```

mod storage;
mod types;

pub use storage::{Clock, DocumentCache};
pub use types::{CACHE_TTL, CacheEntry, CacheEntryInfo, CacheKey};
