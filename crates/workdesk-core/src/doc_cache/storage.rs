//! File-backed document cache with lazy expiry.
//!
//! ## Storage Layout
//!
//! ```text
//! <cache_dir>/
//!   a1b2c3.json            # {"content": <page>, "cached_at": "..."}
//!   a1b2c3_children.json   # {"content": [<block>, ...], "cached_at": "..."}
//! ```
//!
//! Entries older than [`CACHE_TTL`] are ignored on read but left on disk until
//! they are overwritten or the cache is cleared.
//!
//! ## Example
//!
//! ```rust,no_run
//! use serde_json::{Value, json};
//! use workdesk_core::doc_cache::{CacheKey, DocumentCache};
//!
//! let cache = DocumentCache::open(".notes_cache")?;
//! let key = CacheKey::page("a1b2c3")?;
//!
//! let page: Value = cache.get_or_fetch(&key, false, || {
//!     Ok::<_, workdesk_core::Error>(json!({"id": "a1b2c3"}))
//! })?;
//! assert_eq!(page["id"], "a1b2c3");
//! # Ok::<(), workdesk_core::Error>(())
//! ```

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::{CACHE_TTL, CacheEntry, CacheEntryInfo, CacheKey};
use crate::{Error, Result};

/// Source of "now" for TTL decisions.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Cache of remote documents, one JSON file per key.
///
/// Construct with [`DocumentCache::open`], which creates the directory up
/// front; an unwritable location fails there rather than on the first write.
///
/// ## Thread Safety
///
/// Operations are not coordinated across processes. Each key is expected to be
/// read or written by one logical operation at a time.
#[derive(Clone)]
pub struct DocumentCache {
    dir: PathBuf,
    clock: Clock,
}

impl std::fmt::Debug for DocumentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCache")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

impl DocumentCache {
    /// Open (and create if needed) a cache rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            Error::Storage(format!(
                "Failed to create cache directory {}: {e}",
                dir.display()
            ))
        })?;
        Ok(Self {
            dir,
            clock: Arc::new(Utc::now),
        })
    }

    /// Replace the clock used for TTL checks and timestamps.
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use chrono::{Duration, Utc};
    /// use workdesk_core::doc_cache::DocumentCache;
    ///
    /// let tomorrow = Utc::now() + Duration::days(1);
    /// let cache = DocumentCache::open(".notes_cache")?.with_clock(Arc::new(move || tomorrow));
    /// # Ok::<(), workdesk_core::Error>(())
    /// ```
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Directory holding the entry files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Current time according to the cache clock.
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Look up a fresh entry for `key`.
    ///
    /// Returns `None` when the file is missing, unreadable, not valid JSON,
    /// does not decode as `T`, or is older than [`CACHE_TTL`]. None of these
    /// are errors.
    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let path = self.entry_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Unreadable cache entry {}: {}", path.display(), e);
                }
                debug!("Cache miss for {}", key);
                return None;
            },
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Ignoring malformed cache entry {}: {}", path.display(), e);
                return None;
            },
        };

        if !entry.is_fresh_at(self.now()) {
            debug!("Cache entry for {} expired (cached at {})", key, entry.cached_at);
            return None;
        }

        debug!("Cache hit for {}", key);
        Some(entry.content)
    }

    /// Store `value` under `key`, stamped with the current time.
    ///
    /// Overwrites any previous entry. The write goes to a temp file that is
    /// renamed into place, so readers never observe a partial entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the entry cannot be serialized or written.
    pub fn put<T: Serialize + ?Sized>(&self, key: &CacheKey, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| Error::Storage(format!("Failed to create cache directory: {e}")))?;

        let entry = CacheEntry::new(value, self.now());
        let json = serde_json::to_string(&entry)
            .map_err(|e| Error::Storage(format!("Failed to serialize cache entry {key}: {e}")))?;

        let path = self.entry_path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .map_err(|e| Error::Storage(format!("Failed to write temp cache file: {e}")))?;

        // Windows rename does not replace an existing target
        #[cfg(target_os = "windows")]
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| Error::Storage(format!("Failed to replace cache entry: {e}")))?;
        }

        fs::rename(&tmp_path, &path)
            .map_err(|e| Error::Storage(format!("Failed to commit cache entry {key}: {e}")))?;

        debug!("Cached {}", key);
        Ok(())
    }

    /// Return the cached value for `key`, or fetch, store and return a new one.
    ///
    /// With `force_refresh` the cached entry is never consulted. A failing
    /// `fetch` propagates its error unchanged and leaves the cache untouched.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, or the storage error converted into `E` if the
    /// fetched value cannot be written.
    pub fn get_or_fetch<T, E, F>(
        &self,
        key: &CacheKey,
        force_refresh: bool,
        fetch: F,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<Error>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        if !force_refresh {
            if let Some(value) = self.get(key) {
                return Ok(value);
            }
        }

        let value = fetch()?;
        self.put(key, &value)?;
        Ok(value)
    }

    /// Async form of [`get_or_fetch`](Self::get_or_fetch) for fetches that
    /// perform network I/O.
    ///
    /// # Errors
    ///
    /// Same as [`get_or_fetch`](Self::get_or_fetch).
    pub async fn get_or_fetch_async<T, E, F, Fut>(
        &self,
        key: &CacheKey,
        force_refresh: bool,
        fetch: F,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<Error>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if !force_refresh {
            if let Some(value) = self.get(key) {
                return Ok(value);
            }
        }

        let value = fetch().await?;
        self.put(key, &value)?;
        Ok(value)
    }

    /// Delete the entry for `key`. Missing entries are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry exists but cannot be deleted.
    pub fn remove(&self, key: &CacheKey) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| Error::Storage(format!("Failed to delete cache entry {key}: {e}")))?;
            debug!("Removed cache entry {}", key);
        }
        Ok(())
    }

    /// List entries currently on disk, sorted by key.
    ///
    /// Temp files, non-JSON files and entries that fail to parse are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be read.
    pub fn entries(&self) -> Result<Vec<CacheEntryInfo>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let now = self.now();
        let mut infos = Vec::new();
        for path in self.entry_files()? {
            let Some(key) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| CacheKey::new(s).ok())
            else {
                continue;
            };

            let Ok(raw) = fs::read_to_string(&path) else {
                continue;
            };
            let Ok(entry) = serde_json::from_str::<CacheEntry<serde_json::Value>>(&raw) else {
                warn!("Skipping malformed cache entry {}", path.display());
                continue;
            };

            infos.push(CacheEntryInfo {
                key,
                cached_at: entry.cached_at,
                fresh: entry.is_fresh_at(now),
            });
        }

        infos.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(infos)
    }

    /// Names of every entry file on disk, sorted, without the `.json`
    /// extension.
    ///
    /// Unlike [`entries`](Self::entries) this includes malformed entries, so
    /// it lists exactly the files [`clear`](Self::clear) deletes.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be read.
    pub fn keys(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut keys: Vec<String> = self
            .entry_files()?
            .iter()
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()))
            .map(str::to_string)
            .collect();
        keys.sort();
        Ok(keys)
    }

    /// Delete every entry file, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or a file cannot be deleted.
    pub fn clear(&self) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let files = self.entry_files()?;
        for path in &files {
            fs::remove_file(path).map_err(|e| {
                Error::Storage(format!("Failed to delete {}: {e}", path.display()))
            })?;
        }

        debug!("Cleared {} cache entries from {}", files.len(), self.dir.display());
        Ok(files.len())
    }

    fn entry_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir)
            .map_err(|e| Error::Storage(format!("Failed to read cache directory: {e}")))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| Error::Storage(format!("Failed to read directory entry: {e}")))?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
                files.push(path);
            }
        }
        Ok(files)
    }
}
