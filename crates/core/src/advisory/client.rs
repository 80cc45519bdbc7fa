//! Advisory text generator backed by the Gemini `generateContent` API.
//!
//! Fails soft: `generate` always yields text. When the generator is
//! offline, unconfigured, unreachable or answers with nothing, the text is
//! a fixed fallback note.

use aqsat_shared::config::AdvisorConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::error::AdvisoryError;
use super::prompt::PlanSummary;

/// Produces a human-readable advisory note for a plan.
#[async_trait]
pub trait AdvisoryGenerator: Send + Sync {
    /// Generate the note. Never fails; failures yield a fallback note.
    async fn generate(&self, summary: &PlanSummary) -> String;
}

/// Gemini API client.
pub struct GeminiAdvisor {
    client: Client,
    config: AdvisorConfig,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Result<String, AdvisoryError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            Err(AdvisoryError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}

impl GeminiAdvisor {
    /// Create a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the HTTP client cannot be initialized.
    pub fn new(config: AdvisorConfig) -> Result<Self, AdvisoryError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    /// Request a note, reporting why none was produced.
    ///
    /// # Errors
    ///
    /// Returns the failure classification. See [`AdvisoryError`].
    pub async fn request(&self, summary: &PlanSummary) -> Result<String, AdvisoryError> {
        if self.config.offline {
            return Err(AdvisoryError::Offline);
        }
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(AdvisoryError::MissingApiKey)?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        );
        let prompt = summary.prompt();
        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: &prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AdvisoryError::Http {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        response.json::<GenerateResponse>().await?.into_text()
    }
}

#[async_trait]
impl AdvisoryGenerator for GeminiAdvisor {
    async fn generate(&self, summary: &PlanSummary) -> String {
        match self.request(summary).await {
            Ok(text) => text,
            Err(e) => {
                if e.is_call_failure() {
                    error!(error = %e, model = %self.config.model, "Advisory request failed");
                } else {
                    debug!(reason = %e, "Advisory skipped");
                }
                e.fallback_note().to_string()
            }
        }
    }
}
