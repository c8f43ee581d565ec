//! Seam for the external summarization collaborator.

use thiserror::Error;

/// The summarization collaborator failed to produce a summary.
#[derive(Debug, Error)]
#[error("summarization failed: {0}")]
pub struct SummarizeError(String);

impl SummarizeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Shortens notice text for bulletin display.
///
/// Implementations must be deterministic enough that repeated calls on
/// identical input are cacheable; no other contract is assumed.
pub trait Summarize {
    fn summarize(&self, text: &str) -> Result<String, SummarizeError>;
}

impl<F> Summarize for F
where
    F: Fn(&str) -> Result<String, SummarizeError>,
{
    fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_implement_summarize() {
        let echo = |text: &str| Ok::<_, SummarizeError>(text.to_uppercase());
        assert_eq!(echo.summarize("abc").unwrap(), "ABC");
    }

    #[test]
    fn error_message_carries_cause() {
        let err = SummarizeError::new("connection refused");
        assert_eq!(err.to_string(), "summarization failed: connection refused");
    }
}
