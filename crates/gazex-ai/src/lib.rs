//! Summarization collaborator: Anthropic messages-API client and a
//! content-hash cache composable over any summarizer.

mod cache;
mod client;

pub use cache::{Cached, SummaryCache};
pub use client::{AiError, ClaudeSummarizer, LlmConfig};
