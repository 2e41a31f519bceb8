//! On-disk cache for fetched pages.
//!
//! Each URL maps to one JSON file named by the SHA-256 of the URL. Entries
//! carry the time they were written and are considered stale after a TTL
//! (24 hours by default). Stale files are left on disk and simply ignored;
//! the next successful fetch overwrites them.
//!
//! The cache assumes a single process. Concurrent writers race on the same
//! file and the last one wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::fetch::{ContentFetcher, FetchError};

/// Default cache TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default cache directory.
const DEFAULT_ROOT: &str = "./cache";

/// Errors from writing the cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Cache directory could not be created
    #[error("failed to create cache directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Entry could not be serialised
    #[error("failed to serialize cache entry for {url}: {source}")]
    Serialize {
        url: String,
        source: serde_json::Error,
    },

    /// Entry file could not be written
    #[error("failed to write cache file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A cached page as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The URL the content was fetched from.
    pub url: String,
    /// The page body.
    pub content: String,
    /// When the entry was written.
    pub timestamp: DateTime<Utc>,
}

impl CacheEntry {
    /// Whether the entry is still usable at `now`.
    ///
    /// An entry exactly `ttl` old is still fresh. Entries stamped in the
    /// future are treated as fresh.
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match now.signed_duration_since(self.timestamp).to_std() {
            Ok(age) => age <= ttl,
            Err(_) => true,
        }
    }
}

/// Configuration for the page cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Directory holding the entry files.
    pub root: PathBuf,
    /// How long an entry remains valid.
    pub ttl: Duration,
}

impl CacheConfig {
    /// Create a new cache config with the given directory and default TTL (24 hours).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

/// File-backed page cache.
#[derive(Debug, Clone)]
pub struct ContentCache {
    config: CacheConfig,
}

impl ContentCache {
    /// Create a cache without touching the filesystem.
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Create a cache, making sure its directory exists.
    pub fn open(config: CacheConfig) -> Result<Self, CacheError> {
        let cache = Self::new(config);
        cache.ensure_root()?;
        Ok(cache)
    }

    fn ensure_root(&self) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.config.root).map_err(|source| CacheError::CreateDir {
            path: self.config.root.clone(),
            source,
        })
    }

    /// Path of the entry file for `url`.
    pub fn path_for(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.config.root.join(format!("{digest:x}.json"))
    }

    /// Look up a fresh entry for `url`.
    ///
    /// A missing, unreadable, corrupt or expired entry is a miss. The reason
    /// is logged but not returned; callers treat every miss the same way.
    pub fn get(&self, url: &str) -> Option<String> {
        let path = self.path_for(url);

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(url, "cache miss: no file");
                return None;
            }
            Err(e) => {
                warn!(url, path = %path.display(), error = %e, "cache miss: unreadable file");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&contents) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(url, path = %path.display(), error = %e, "cache miss: corrupt entry");
                return None;
            }
        };

        let now = Utc::now();
        if !entry.is_fresh(self.config.ttl, now) {
            info!(url, cached_at = %entry.timestamp, "cache miss: expired");
            return None;
        }

        let age_mins = now.signed_duration_since(entry.timestamp).num_minutes();
        info!(url, age_mins, "cache hit");
        Some(entry.content)
    }

    /// Store `content` for `url`, replacing any existing entry.
    ///
    /// Creates the cache directory if it doesn't exist.
    pub fn put(&self, url: &str, content: &str) -> Result<(), CacheError> {
        let entry = CacheEntry {
            url: url.to_string(),
            content: content.to_string(),
            timestamp: Utc::now(),
        };
        self.write_entry(&entry)?;
        debug!(url, "cached response");
        Ok(())
    }

    /// Write an entry as-is, timestamp included.
    pub fn write_entry(&self, entry: &CacheEntry) -> Result<(), CacheError> {
        self.ensure_root()?;

        let json = serde_json::to_string_pretty(entry).map_err(|source| CacheError::Serialize {
            url: entry.url.clone(),
            source,
        })?;

        let path = self.path_for(&entry.url);
        std::fs::write(&path, json).map_err(|source| CacheError::Write { path, source })
    }

    /// Get the cache directory.
    pub fn root(&self) -> &Path {
        &self.config.root
    }
}

/// Fetcher that consults a [`ContentCache`] before going to the network.
///
/// Caching is on exactly when a cache was supplied. A failure to store a
/// freshly fetched page is logged and otherwise ignored.
pub struct CachedFetcher<F> {
    inner: F,
    cache: Option<ContentCache>,
}

impl<F: ContentFetcher> CachedFetcher<F> {
    /// Wrap `inner`, caching through `cache` if given.
    pub fn new(inner: F, cache: Option<ContentCache>) -> Self {
        Self { inner, cache }
    }

    /// Wrap `inner` with caching switched off.
    pub fn uncached(inner: F) -> Self {
        Self::new(inner, None)
    }

    /// Whether responses are read from and written to the cache.
    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Access the underlying fetcher for operations that bypass cache.
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: ContentFetcher> ContentFetcher for CachedFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let Some(cache) = &self.cache else {
            debug!(url, "cache disabled");
            return self.inner.fetch(url).await;
        };

        if let Some(content) = cache.get(url) {
            return Ok(content);
        }

        let content = self.inner.fetch(url).await?;

        if let Err(e) = cache.put(url, &content) {
            warn!(url, error = %e, "failed to save to cache");
        }

        Ok(content)
    }
}
