//! PDF text extraction boundary.
//!
//! The engine treats PDF-to-text conversion as a black box: given a file,
//! return per-page text. [`PdftotextScanner`] is the default implementation;
//! tests and alternative OCR engines plug in through [`ScanPdf`].

use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::StoreError;

/// Extracted text of one gazette document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedDocument {
    /// Working string for the whole document.
    pub full_text: String,
    pub pages: Vec<String>,
}

impl ScannedDocument {
    /// The working string is the newline join of the page texts.
    pub fn from_pages(pages: Vec<String>) -> Self {
        let full_text = pages.join("\n");
        Self { full_text, pages }
    }
}

/// Best-effort text extraction; implementations must tolerate missing or
/// garbled pages without crashing.
pub trait ScanPdf {
    fn scan(&self, path: &Path) -> Result<ScannedDocument, StoreError>;
}

/// Shells out to `pdftotext -layout`.
///
/// The masthead, contents table and notice body all sit in the first few
/// pages, so scanning is capped rather than reading hundred-page gazettes.
pub struct PdftotextScanner {
    pub page_limit: u32,
}

impl Default for PdftotextScanner {
    fn default() -> Self {
        Self { page_limit: 5 }
    }
}

impl ScanPdf for PdftotextScanner {
    fn scan(&self, path: &Path) -> Result<ScannedDocument, StoreError> {
        debug!(path = %path.display(), limit = self.page_limit, "running pdftotext");
        let output = Command::new("pdftotext")
            .arg("-layout")
            .args(["-f", "1"])
            .args(["-l", &self.page_limit.to_string()])
            .arg(path)
            .arg("-")
            .output()?;

        if !output.status.success() {
            return Err(StoreError::Pdftotext {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        let pages = split_pages(&text);
        if pages.is_empty() {
            return Err(StoreError::EmptyDocument(path.to_path_buf()));
        }
        Ok(ScannedDocument::from_pages(pages))
    }
}

/// Split pdftotext output on form feeds, dropping trailing empty pages.
pub fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split('\u{c}').map(str::to_string).collect();
    while pages.last().is_some_and(|page| page.trim().is_empty()) {
        pages.pop();
    }
    pages
}
