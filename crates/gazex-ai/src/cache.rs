//! Content-hash summary cache.
//!
//! Summaries are keyed by a SHA-256 of the trimmed input text, so repeated
//! bulletin runs over the same gazettes never re-pay the API call. The cache
//! loads on open and persists on every insert with a whole-file atomic
//! replace; entries are idempotent, so concurrent writers degrade to
//! last-writer-wins.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use gazex_core::{Summarize, SummarizeError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    entries: HashMap<String, String>,
}

/// On-disk text-hash → summary map.
pub struct SummaryCache {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl SummaryCache {
    /// Open the cache at `path`, starting empty if the file is missing or
    /// unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<CacheFile>(&bytes) {
                Ok(file) => file.entries,
                Err(err) => {
                    warn!(path = %path.display(), %err, "unreadable summary cache, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn get(&self, text: &str) -> Option<String> {
        self.lock().get(&text_hash(text)).cloned()
    }

    pub fn insert(&self, text: &str, summary: String) -> anyhow::Result<()> {
        let snapshot = {
            let mut entries = self.lock();
            entries.insert(text_hash(text), summary);
            CacheFile {
                entries: entries.clone(),
            }
        };
        self.persist(&snapshot)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, file: &CacheFile) -> anyhow::Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, file)?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

fn text_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Caches any summarizer's results by content hash.
pub struct Cached<S> {
    inner: S,
    cache: SummaryCache,
}

impl<S: Summarize> Cached<S> {
    pub fn new(inner: S, cache: SummaryCache) -> Self {
        Self { inner, cache }
    }
}

impl<S: Summarize> Summarize for Cached<S> {
    fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(String::new());
        }

        if let Some(hit) = self.cache.get(text) {
            debug!("summary cache hit");
            return Ok(hit);
        }

        let summary = self.inner.summarize(text)?;
        if let Err(err) = self.cache.insert(text, summary.clone()) {
            // A failed cache write only costs the next run a recomputation.
            warn!(%err, "failed to persist summary cache");
        }
        Ok(summary)
    }
}
