//! Content-hash cache for extracted page text.
//!
//! Re-running OCR or pdftotext over an unchanged gazette is by far the most
//! expensive step of bulletin generation, so page texts are cached keyed by
//! a SHA-256 of the PDF bytes. The cache loads on open and persists on every
//! write with a whole-file atomic replace; entries are idempotent, so
//! concurrent writers degrade to last-writer-wins.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::StoreError;
use crate::scan::{ScanPdf, ScannedDocument};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    entries: HashMap<String, Vec<String>>,
}

/// On-disk page-text cache keyed by content hash.
pub struct PageCache {
    path: PathBuf,
    entries: Mutex<HashMap<String, Vec<String>>>,
}

impl PageCache {
    /// Open the cache at `path`, starting empty if the file is missing or
    /// unreadable. Cache contents are never authoritative over a fresh scan.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<CacheFile>(&bytes) {
                Ok(file) => file.entries,
                Err(err) => {
                    warn!(path = %path.display(), %err, "unreadable page cache, starting empty");
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

    pub fn get(&self, key: &str) -> Option<Vec<String>> {
        self.lock().get(key).cloned()
    }

    pub fn insert(&self, key: String, pages: Vec<String>) -> Result<(), StoreError> {
        let snapshot = {
            let mut entries = self.lock();
            entries.insert(key, pages);
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

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<String>>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Write the whole file to a temp sibling, then rename over.
    fn persist(&self, file: &CacheFile) -> Result<(), StoreError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, file)?;
        tmp.persist(&self.path).map_err(|err| StoreError::Io(err.error))?;
        Ok(())
    }
}

/// Hex SHA-256 of `bytes`.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// A scanner with the page cache in front of it.
pub struct CachedScan<S> {
    inner: S,
    cache: PageCache,
}

impl<S: ScanPdf> CachedScan<S> {
    pub fn new(inner: S, cache: PageCache) -> Self {
        Self { inner, cache }
    }
}

impl<S: ScanPdf> ScanPdf for CachedScan<S> {
    fn scan(&self, path: &Path) -> Result<ScannedDocument, StoreError> {
        let bytes = fs::read(path)?;
        let key = content_hash(&bytes);
        if let Some(pages) = self.cache.get(&key) {
            debug!(path = %path.display(), "page cache hit");
            return Ok(ScannedDocument::from_pages(pages));
        }

        let doc = self.inner.scan(path)?;
        if let Err(err) = self.cache.insert(key, doc.pages.clone()) {
            // A failed cache write only costs the next run a re-scan.
            warn!(path = %path.display(), %err, "failed to persist page cache");
        }
        Ok(doc)
    }
}
