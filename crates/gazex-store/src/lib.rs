//! Filesystem collaborators for the extraction engine: the PDF text
//! extraction boundary, the content-hash page cache, and gazette lookup.

mod error;
pub mod locate;
pub mod page_cache;
pub mod scan;

pub use error::StoreError;
pub use locate::{DirLocator, GazetteFilename, LocateGazette, parse_gazette_filename};
pub use page_cache::{CachedScan, PageCache, content_hash};
pub use scan::{PdftotextScanner, ScanPdf, ScannedDocument};
