use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no gazette file matching {0} found")]
    GazetteNotFound(u32),

    #[error("gazette {number} matches multiple files: {first} and {second}")]
    AmbiguousGazette {
        number: u32,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("text extraction produced no pages for {0}")]
    EmptyDocument(PathBuf),

    #[error("pdftotext exited with {status}: {stderr}")]
    Pdftotext {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache parse error: {0}")]
    Json(#[from] serde_json::Error),
}
