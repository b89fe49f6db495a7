//! Type definitions for the document cache.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How long a cached document stays fresh.
///
/// Fixed at 24 hours. Notes pages change rarely and the cache exists to save
/// quota on the notes service, so a day of staleness is acceptable.
pub const CACHE_TTL: Duration = Duration::hours(24);

/// Suffix appended to a block id to key its cached child blocks.
const CHILDREN_SUFFIX: &str = "_children";

/// Opaque cache key, validated so it maps to exactly one file: `<key>.json`.
///
/// Keys are caller-chosen strings (page ids, `<id>_children`). Anything that
/// could escape the cache directory or collide with hidden/temp files is
/// rejected.
///
/// ```rust
/// use workdesk_core::doc_cache::CacheKey;
///
/// let key = CacheKey::children("a1b2c3").unwrap();
/// assert_eq!(key.as_str(), "a1b2c3_children");
/// assert_eq!(key.file_name(), "a1b2c3_children.json");
///
/// assert!(CacheKey::new("../escape").is_err());
/// assert!(CacheKey::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CacheKey(String);

impl CacheKey {
    /// Validate and wrap a raw key.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::InvalidKey("key must not be empty".to_string()));
        }
        if key.starts_with('.') {
            return Err(Error::InvalidKey(format!("'{key}' must not start with '.'")));
        }
        if key.contains(['/', '\\', '\0']) || key.contains("..") {
            return Err(Error::InvalidKey(format!(
                "'{key}' must not contain path separators"
            )));
        }
        Ok(Self(key))
    }

    /// Key under which a page's metadata document is cached.
    pub fn page(page_id: &str) -> Result<Self> {
        Self::new(page_id)
    }

    /// Key under which a block's child block list is cached.
    pub fn children(block_id: &str) -> Result<Self> {
        Self::new(format!("{block_id}{CHILDREN_SUFFIX}"))
    }

    /// Get the raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name holding this key's entry.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CacheKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.0
    }
}

/// On-disk shape of one cached document.
///
/// Serialized as `{"content": ..., "cached_at": "<RFC 3339>"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached document.
    pub content: T,
    /// When the document was written to the cache.
    pub cached_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Wrap `content` stamped with `cached_at`.
    pub const fn new(content: T, cached_at: DateTime<Utc>) -> Self {
        Self { content, cached_at }
    }

    /// Whether the entry is still inside the TTL window at `now`.
    ///
    /// An entry is stale once `now - cached_at >= CACHE_TTL`.
    ///
    /// ```rust
    /// use chrono::{Duration, Utc};
    /// use workdesk_core::doc_cache::CacheEntry;
    ///
    /// let now = Utc::now();
    /// assert!(CacheEntry::new((), now - Duration::hours(23)).is_fresh_at(now));
    /// assert!(!CacheEntry::new((), now - Duration::hours(24)).is_fresh_at(now));
    /// ```
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now - self.cached_at < CACHE_TTL
    }
}

/// Summary of one cached entry, for status listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntryInfo {
    /// Key of the entry.
    pub key: CacheKey,
    /// When the entry was written.
    pub cached_at: DateTime<Utc>,
    /// Whether the entry would still be served.
    pub fresh: bool,
}
