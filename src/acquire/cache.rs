//! Write-through storage for the last good export payload per configuration.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context as _;
use chrono::{DateTime, Utc};

use crate::foundation::error::{GardenError, GardenResult};
use crate::foundation::math::Fnv1a64;

/// Last successful raw payload for one acquisition configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExportCacheEntry {
    /// Cache key the entry was written under (see `AcquireConfig::cache_key`).
    pub key: String,
    /// When the entry was written.
    #[serde(rename = "savedAt")]
    pub saved_at: DateTime<Utc>,
    /// Raw payload exactly as received.
    pub rows: serde_json::Value,
}

/// Write-through store for export payloads. Entries are only ever written or overwritten.
pub trait CacheStore: Send + Sync + std::fmt::Debug {
    /// Entry stored under `key`, or `None` on a miss.
    fn load(&self, key: &str) -> GardenResult<Option<ExportCacheEntry>>;

    /// Store `entry` under its own key, replacing any previous entry.
    fn save(&self, entry: &ExportCacheEntry) -> GardenResult<()>;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, ExportCacheEntry>>,
}

impl MemoryCache {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// `true` when nothing has been saved yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryCache {
    fn load(&self, key: &str) -> GardenResult<Option<ExportCacheEntry>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| GardenError::cache("memory cache lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, entry: &ExportCacheEntry) -> GardenResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| GardenError::cache("memory cache lock poisoned"))?;
        entries.insert(entry.key.clone(), entry.clone());
        Ok(())
    }
}

/// One JSON file per key inside a directory.
///
/// File names are the FNV-1a hash of the key; the key is stored inside the entry and checked on
/// load so a hash collision reads as a miss rather than another configuration's data.
#[derive(Clone, Debug)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the entry files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File an entry for `key` is read from and written to.
    pub fn path_for_key(&self, key: &str) -> PathBuf {
        let mut h = Fnv1a64::new_default();
        h.write_bytes(key.as_bytes());
        self.dir.join(format!("export-{:016x}.json", h.finish()))
    }
}

impl CacheStore for FileCache {
    fn load(&self, key: &str) -> GardenResult<Option<ExportCacheEntry>> {
        let path = self.path_for_key(key);
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GardenError::cache(format!(
                    "read '{}': {e}",
                    path.display()
                )));
            }
        };
        let entry: ExportCacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable cache entry");
                return Ok(None);
            }
        };
        if entry.key != key {
            tracing::warn!(path = %path.display(), "cache entry key mismatch");
            return Ok(None);
        }
        Ok(Some(entry))
    }

    fn save(&self, entry: &ExportCacheEntry) -> GardenResult<()> {
        let path = self.path_for_key(&entry.key);
        let write = || -> anyhow::Result<()> {
            std::fs::create_dir_all(&self.dir)
                .with_context(|| format!("create cache dir '{}'", self.dir.display()))?;
            let bytes = serde_json::to_vec(entry).context("serialize cache entry")?;
            let tmp = path.with_extension("json.tmp");
            std::fs::write(&tmp, bytes)
                .with_context(|| format!("write '{}'", tmp.display()))?;
            std::fs::rename(&tmp, &path)
                .with_context(|| format!("rename into '{}'", path.display()))?;
            Ok(())
        };
        write().map_err(|e| GardenError::cache(format!("{e:#}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/acquire/cache.rs"]
mod tests;
