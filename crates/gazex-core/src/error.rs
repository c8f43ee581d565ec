use thiserror::Error;

use crate::summarize::SummarizeError;

/// Failure taxonomy for notice extraction.
///
/// All variants propagate to the caller of [`crate::get_notice`]; the engine
/// performs no retries and no silent recovery. Guessing a wrong law name or
/// date in a legal bulletin is worse than failing loudly.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A named field detector found no match or an out-of-range value.
    #[error("{detector} not found in text starting {snippet:?}")]
    Detection {
        detector: &'static str,
        snippet: String,
    },

    #[error("no major type for notice number {0}")]
    UnknownMajorType(u32),

    /// The act pattern cascade was exhausted and no special case applied.
    #[error("no act information found in text starting {snippet:?}")]
    ActNotFound { snippet: String },

    /// No row in the joined logical lines matches the requested notice.
    #[error("notice {notice_number} not listed in this gazette")]
    EntryNotFound { notice_number: u32 },

    /// A parsed row cites a different gazette than the caller asked for.
    #[error("entry cites gazette {found}, expected {expected}")]
    GazetteMismatch { expected: u32, found: u32 },

    #[error(transparent)]
    Summarize(#[from] SummarizeError),
}

impl ExtractError {
    pub(crate) fn detection(detector: &'static str, text: &str) -> Self {
        Self::Detection {
            detector,
            snippet: snippet(text),
        }
    }
}

/// Leading excerpt of the offending text, for error context.
pub(crate) fn snippet(text: &str) -> String {
    text.chars().take(80).collect()
}
