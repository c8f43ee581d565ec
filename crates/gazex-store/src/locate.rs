//! Locating gazette PDFs and decoding their filenames.

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::StoreError;

/// Resolves a gazette number to the file that holds it.
///
/// Injected wherever a gazette must be read, so callers never hard-code a
/// directory layout.
pub trait LocateGazette {
    fn locate(&self, gazette_number: u32) -> Result<PathBuf, StoreError>;
}

/// Finds gazettes by scanning one directory for filenames containing the
/// gazette number. Zero or multiple candidates is an error, not a guess.
pub struct DirLocator {
    dir: PathBuf,
}

impl DirLocator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl LocateGazette for DirLocator {
    fn locate(&self, gazette_number: u32) -> Result<PathBuf, StoreError> {
        let needle = gazette_number.to_string();
        let mut found: Option<PathBuf> = None;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.contains(&needle) {
                continue;
            }
            if let Some(first) = found.take() {
                return Err(StoreError::AmbiguousGazette {
                    number: gazette_number,
                    first,
                    second: path,
                });
            }
            found = Some(path);
        }
        found.ok_or(StoreError::GazetteNotFound(gazette_number))
    }
}

/// Publication details encoded in a filename like `gg52724_23May2025.pdf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GazetteFilename {
    pub gazette_number: u32,
    pub publish_date: NaiveDate,
}

static FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^gg(\d{5})_(\d{1,2}[A-Za-z]{3}\d{4})\.pdf$").unwrap());

/// Parse a gazette filename; None for malformed names or impossible dates.
pub fn parse_gazette_filename(name: &str) -> Option<GazetteFilename> {
    let caps = FILENAME.captures(name)?;
    let gazette_number = caps[1].parse().ok()?;
    let publish_date = NaiveDate::parse_from_str(&caps[2], "%d%b%Y").ok()?;
    Some(GazetteFilename {
        gazette_number,
        publish_date,
    })
}
