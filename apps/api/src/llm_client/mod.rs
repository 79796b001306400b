/// LLM Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the generation API directly.
/// All letter generation MUST go through a `LetterGenerator`.
///
/// One request per call: no retries, no backoff, and no timeout beyond the
/// transport's own defaults.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::resignation::Credential;

#[cfg(test)]
pub mod testing;

/// Fixed generation endpoint. The credential is appended as the `key` query parameter.
pub const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

#[derive(Debug, Error)]
pub enum LlmError {
    /// The request never completed. The inner error carries no URL, so the key cannot leak.
    #[error("Network request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API request failed: {status}")]
    RequestRejected { status: u16 },

    #[error("No content generated")]
    EmptyResponse,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire envelope
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if it is non-empty.
    pub fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Anything that can turn a prompt into letter text.
#[async_trait]
pub trait LetterGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, credential: &Credential) -> Result<String, LlmError>;
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LetterGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, credential: &Credential) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", credential.expose())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Gemini API returned {}", status);
            return Err(LlmError::RequestRejected {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.without_url()))?;

        let parsed: GenerateContentResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Gemini response body was not a valid envelope: {e}");
                return Err(LlmError::EmptyResponse);
            }
        };

        let text = parsed.into_text().ok_or(LlmError::EmptyResponse)?;
        debug!("Gemini call succeeded: {} chars generated", text.len());
        Ok(text)
    }
}
