use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::PathBuf;

/// Expiry policy recorded with an entry at write time. The cache itself
/// never expires anything; callers read the policy back and decide whether
/// a refresh request may bypass the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CachePolicy {
    /// Never refetched. Past seasons and team profiles cannot change.
    Permanent,
    /// May be refetched when the caller asks for a hard refresh.
    Refreshable,
}

/// On-disk envelope around a cached payload.
#[derive(Debug, Deserialize)]
pub struct Entry<T> {
    pub created: DateTime<Utc>,
    pub policy: CachePolicy,
    pub data: T,
}

// Write-side envelope; borrows the payload so `set` never clones it.
#[derive(Serialize)]
struct EntryRef<'a, T> {
    created: DateTime<Utc>,
    policy: CachePolicy,
    data: &'a T,
}

#[derive(Debug)]
pub enum CacheError {
    Io(std::io::Error, PathBuf),
    Corrupt(serde_json::Error, PathBuf),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Io(e, path) => write!(f, "cache read/write failed for {}: {e}", path.display()),
            CacheError::Corrupt(e, path) => write!(f, "corrupt cache entry at {}: {e}", path.display()),
        }
    }
}

/// Content-addressed flat-file store. Keys are SHA-256 hashes of the source
/// URL, so identical URLs always map to the same file and concurrent writers
/// never disagree on content (writes for a key are idempotent). No locking,
/// no TTL, no eviction, no size bound.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Deterministic storage location for a source URL.
    pub fn file_path(&self, url: &str) -> PathBuf {
        let hash = Sha256::digest(url.as_bytes());
        self.dir.join(format!("{hash:x}.json"))
    }

    pub async fn exists(&self, url: &str) -> bool {
        tokio::fs::try_exists(self.file_path(url)).await.unwrap_or(false)
    }

    /// Read and decode an entry. Missing or malformed files are errors;
    /// callers fall back to the network.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<Entry<T>, CacheError> {
        let path = self.file_path(url);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| CacheError::Io(e, path.clone()))?;
        serde_json::from_slice(&bytes).map_err(|e| CacheError::Corrupt(e, path))
    }

    /// Write an entry, overwriting unconditionally. Returns the creation
    /// timestamp recorded in the envelope so callers report the same time a
    /// later cached read would.
    pub async fn set<T: Serialize>(
        &self,
        url: &str,
        data: &T,
        policy: CachePolicy,
    ) -> Result<DateTime<Utc>, CacheError> {
        let path = self.file_path(url);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CacheError::Io(e, path.clone()))?;
        }
        let created = Utc::now();
        let entry = EntryRef { created, policy, data };
        let bytes = serde_json::to_vec(&entry).map_err(|e| CacheError::Corrupt(e, path.clone()))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| CacheError::Io(e, path))?;
        Ok(created)
    }
}
