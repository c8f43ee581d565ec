//! Anthropic messages-API summarizer.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use gazex_core::{Summarize, SummarizeError};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("ANTHROPIC_API_KEY is not set")]
    MissingApiKey,

    #[error("API response contained no text block")]
    EmptyResponse,
}

/// Model and sampling settings, read from the environment.
///
/// Defaults are tuned for cheap, low-variance summaries of short notice
/// passages.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl LlmConfig {
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| AiError::MissingApiKey)?;
        let model = std::env::var("ANTHROPIC_MODEL")
            .unwrap_or_else(|_| "claude-3-haiku-20240307".to_string());
        let max_tokens = std::env::var("MAX_TOKENS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(250);
        let temperature = std::env::var("TEMPERATURE")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(0.1);
        Ok(Self {
            api_key,
            model,
            max_tokens,
            temperature,
        })
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Summarizes notice text through the Anthropic messages API.
///
/// Blocking by design: the extraction engine is synchronous and each notice
/// needs at most one summary.
pub struct ClaudeSummarizer {
    client: reqwest::blocking::Client,
    config: LlmConfig,
}

impl ClaudeSummarizer {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            config,
        }
    }

    pub fn from_env() -> Result<Self, AiError> {
        Ok(Self::new(LlmConfig::from_env()?))
    }

    fn request(&self, prompt: &str, max_tokens: u32) -> Result<(String, bool), AiError> {
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens,
            temperature: self.config.temperature,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = response.json()?;
        let summary = parsed
            .content
            .iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text.trim().to_string())
            .ok_or(AiError::EmptyResponse)?;
        let truncated = parsed.stop_reason.as_deref() == Some("max_tokens");
        Ok((summary, truncated))
    }

    /// Summarize `text`, retrying once with a 1.4x token budget when the
    /// first response hit the limit mid-sentence.
    pub fn summarize_text(&self, text: &str) -> Result<String, AiError> {
        let prompt = build_prompt(text);
        let (summary, truncated) = self.request(&prompt, self.config.max_tokens)?;
        if truncated && !ends_in_sentence(&summary) {
            let larger = (self.config.max_tokens as f32 * 1.4) as u32;
            info!(max_tokens = larger, "summary truncated, retrying");
            let (retry, still_truncated) = self.request(&prompt, larger)?;
            if still_truncated {
                warn!(max_tokens = larger, "summary still truncated");
            }
            return Ok(retry);
        }
        if truncated {
            warn!(max_tokens = self.config.max_tokens, "summary reached token limit");
        }
        Ok(summary)
    }
}

impl Summarize for ClaudeSummarizer {
    fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        self.summarize_text(text)
            .map_err(|err| SummarizeError::new(err.to_string()))
    }
}

fn ends_in_sentence(summary: &str) -> bool {
    summary.ends_with(['.', '!', '?'])
}

/// Few-shot prompt. The examples pin the register: no introductory phrases,
/// complete sentences, end on punctuation.
fn build_prompt(text: &str) -> String {
    format!(
        "I need you to summarize the following text. Start immediately with the summary \
content. Never use introductory phrases. IMPORTANT: Always end with complete sentences \
and proper punctuation. If you're running out of space, prioritize finishing your \
current sentence rather than starting a new one.

Here are some examples:

Text: Solar and wind power have become increasingly cost-competitive with fossil fuels \
over the past decade. Many countries are investing heavily in renewable infrastructure \
development. However, energy storage challenges remain a significant barrier to \
widespread adoption of these technologies.

Summary: Solar and wind power have become cost-competitive with fossil fuels, prompting \
heavy investment in renewable infrastructure by many countries. Energy storage \
challenges remain a significant barrier to widespread adoption.

Text: The European Union has announced new regulations for artificial intelligence \
systems that will take effect in 2025. These regulations will classify AI systems into \
different risk categories based on their potential impact on safety and fundamental \
rights. High-risk AI applications, such as those used in healthcare, transportation, \
and law enforcement, will face stricter oversight and compliance requirements.

Summary: The European Union has announced new AI regulations taking effect in 2025 that \
classify systems into risk categories based on safety and rights impact. High-risk \
applications in healthcare, transportation, and law enforcement will face stricter \
oversight and compliance requirements.

Now please summarize this text:

Text: {text}

Summary:"
    )
}
