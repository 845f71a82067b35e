//! Google Gemini `generateContent` adapter.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{Provider, ProviderFuture, http_client, non_empty};
use crate::error::ProviderError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const NAME: &str = "gemini";

// ── Request types ──────────────────────────────────────────────────

#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize, Debug)]
struct Part<'a> {
    text: &'a str,
}

// ── Response types ─────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct RawGenerateResponse {
    candidates: Option<Vec<RawCandidate>>,
    error: Option<ApiErrorResponse>,
}

#[derive(Deserialize, Debug)]
struct RawCandidate {
    content: Option<RawContent>,
}

#[derive(Deserialize, Debug)]
struct RawContent {
    parts: Option<Vec<RawPart>>,
}

#[derive(Deserialize, Debug)]
struct RawPart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
}

impl RawGenerateResponse {
    fn into_text(self) -> Option<String> {
        self.candidates?
            .into_iter()
            .next()?
            .content?
            .parts?
            .into_iter()
            .next()?
            .text
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// Async client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, String> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Create a client that talks to `base_url` instead of Google's host.
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, String> {
        Ok(Self {
            client: http_client()?,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(
            "Gemini request: model={}, prompt={} bytes",
            self.model,
            prompt.len()
        );
        let start = Instant::now();

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ProviderError::Network(format!("failed to read response: {e}")))?;

        debug!(
            "Gemini response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );
        trace!("Gemini response body: {text}");

        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: NAME,
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: RawGenerateResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Malformed(e.to_string()))?;

        if let Some(err) = parsed.error {
            return Err(ProviderError::Api {
                provider: NAME,
                message: err.message,
            });
        }

        non_empty(parsed.into_text())
    }
}

impl Provider for GeminiClient {
    fn generate(&self, prompt: &str) -> ProviderFuture<'_> {
        let prompt = prompt.to_string();
        Box::pin(async move { self.generate_content(&prompt).await })
    }

    fn name(&self) -> &str {
        NAME
    }
}
