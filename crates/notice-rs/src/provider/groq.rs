//! Groq adapter (OpenAI-compatible chat completions).

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{Provider, ProviderFuture, http_client, non_empty};
use crate::error::ProviderError;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

const NAME: &str = "groq";
const TEMPERATURE: f32 = 0.3;

// ── Request types ──────────────────────────────────────────────────

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Serialize, Debug)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

// ── Response types ─────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorResponse>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: Option<RawResponseMessage>,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
}

// ── Client ─────────────────────────────────────────────────────────

/// Async client for Groq's chat completions endpoint.
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, String> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Create a client that talks to `base_url` instead of Groq's host.
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
        format!("{}/openai/v1/chat/completions", self.base_url)
    }

    async fn chat(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
        };

        debug!(
            "Groq request: model={}, prompt={} bytes",
            self.model,
            prompt.len()
        );
        let start = Instant::now();

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
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
            "Groq response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );
        trace!("Groq response body: {text}");

        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: NAME,
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: RawChatResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Malformed(e.to_string()))?;

        if let Some(err) = parsed.error {
            return Err(ProviderError::Api {
                provider: NAME,
                message: err.message,
            });
        }

        let content = parsed
            .choices
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.message)
            .and_then(|m| m.content);
        non_empty(content)
    }
}

impl Provider for GroqClient {
    fn generate(&self, prompt: &str) -> ProviderFuture<'_> {
        let prompt = prompt.to_string();
        Box::pin(async move { self.chat(&prompt).await })
    }

    fn name(&self) -> &str {
        NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::test_support::spawn_stub;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use serde_json::{Value, json};

    const PATH: &str = "/openai/v1/chat/completions";

    async fn client_for(router: Router) -> GroqClient {
        let base = spawn_stub(router).await;
        GroqClient::with_base_url("gsk-test", "llama-test", base).unwrap()
    }

    #[test]
    fn request_shape_matches_api() {
        let body = ChatRequest {
            model: "m",
            messages: vec![Message {
                role: "user",
                content: "hi",
            }],
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[tokio::test]
    async fn extracts_first_choice_content() {
        let router = Router::new().route(
            PATH,
            post(|headers: HeaderMap, axum::Json(body): axum::Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer gsk-test");
                assert_eq!(body["model"], "llama-test");
                assert_eq!(body["messages"][0]["content"], "draft it");
                axum::Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "Body text"}}]
                }))
            }),
        );
        let client = client_for(router).await;
        assert_eq!(client.generate("draft it").await.unwrap(), "Body text");
    }

    #[tokio::test]
    async fn rate_limit_status_is_error() {
        let router = Router::new().route(
            PATH,
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let client = client_for(router).await;
        let err = client.generate("x").await.unwrap_err();
        assert!(matches!(err, ProviderError::Status { status: 429, .. }));
        assert_eq!(err.summary(), "provider returned HTTP 429");
    }

    #[tokio::test]
    async fn null_content_is_empty_text() {
        let router = Router::new().route(
            PATH,
            post(|| async { axum::Json(json!({"choices": [{"message": {"content": null}}]})) }),
        );
        let client = client_for(router).await;
        assert!(matches!(
            client.generate("x").await,
            Err(ProviderError::EmptyText)
        ));
    }

    #[tokio::test]
    async fn in_body_error_is_api_error() {
        let router = Router::new().route(
            PATH,
            post(|| async { axum::Json(json!({"error": {"message": "model decommissioned"}})) }),
        );
        let client = client_for(router).await;
        match client.generate("x").await {
            Err(ProviderError::Api { message, .. }) => assert_eq!(message, "model decommissioned"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
