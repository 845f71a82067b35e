//! Provider adapters: the single boundary between the handler and a remote
//! text-generation API.
//!
//! Every provider implements [`Provider`]: take a prompt, return generated
//! text or a [`ProviderError`]. Request and response shapes differ per
//! provider and never leave their module:
//!
//! - [`gemini`]: Google `generateContent`, text at
//!   `candidates[0].content.parts[0].text`.
//! - [`groq`]: OpenAI-compatible chat completions, text at
//!   `choices[0].message.content`.
//!
//! Which provider and model to use is a deployment-time choice made through
//! [`build_provider`].

pub mod gemini;
pub mod groq;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub use gemini::GeminiClient;
pub use groq::GroqClient;

use tracing::warn;

use crate::config::ErrorPolicy;
use crate::error::ProviderError;

/// Boxed future returned by [`Provider::generate`].
pub type ProviderFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ProviderError>> + Send + 'a>>;

/// A remote text-generation service.
///
/// Implementations send the prompt as-is, make no retries, and return only
/// non-empty text. An absent, null, or blank text field is
/// [`ProviderError::EmptyText`].
///
/// Uses a boxed future so that the trait is dyn-compatible (object-safe).
pub trait Provider: Send + Sync {
    /// Generate text for `prompt`.
    fn generate(&self, prompt: &str) -> ProviderFuture<'_>;

    /// Short provider name for logs.
    fn name(&self) -> &str;
}

/// Supported provider back ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    Groq,
}

impl ProviderKind {
    /// Model used when none is configured.
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Gemini => gemini::DEFAULT_MODEL,
            ProviderKind::Groq => groq::DEFAULT_MODEL,
        }
    }

    /// Base URL used when none is configured.
    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::Gemini => gemini::DEFAULT_BASE_URL,
            ProviderKind::Groq => groq::DEFAULT_BASE_URL,
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_var(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::Groq => "GROQ_API_KEY",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "groq" | "llama" => Ok(ProviderKind::Groq),
            other => Err(format!(
                "unknown provider '{other}' (expected 'gemini' or 'groq')"
            )),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::Groq => write!(f, "groq"),
        }
    }
}

/// Build the HTTP client shared by the provider adapters.
///
/// Only the connect phase is bounded here; the whole call is bounded by the
/// handler's timeout.
pub(crate) fn http_client() -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .user_agent(concat!("notice-rs/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| format!("failed to build HTTP client: {e}"))
}

/// Construct the configured provider.
///
/// `model` and `base_url` fall back to the kind's defaults when `None`.
pub fn build_provider(
    kind: ProviderKind,
    api_key: impl Into<String>,
    model: Option<String>,
    base_url: Option<String>,
) -> Result<Arc<dyn Provider>, String> {
    let model = model.unwrap_or_else(|| kind.default_model().to_string());
    let base_url = base_url.unwrap_or_else(|| kind.default_base_url().to_string());
    let provider: Arc<dyn Provider> = match kind {
        ProviderKind::Gemini => Arc::new(GeminiClient::with_base_url(api_key, model, base_url)?),
        ProviderKind::Groq => Arc::new(GroqClient::with_base_url(api_key, model, base_url)?),
    };
    Ok(provider)
}

/// Decide at startup whether the service runs with a provider.
///
/// A blank `api_key` counts as missing. Without a key the strict policy
/// refuses to start, while the fallback policy runs with no provider and
/// every request takes the template path.
pub fn resolve_provider(
    kind: ProviderKind,
    policy: ErrorPolicy,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
) -> Result<Option<Arc<dyn Provider>>, String> {
    let key_var = kind.api_key_var();
    match api_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => build_provider(kind, key, model, base_url).map(Some),
        None if policy == ErrorPolicy::Strict => Err(format!(
            "{key_var} is not set; the strict policy requires a provider credential"
        )),
        None => {
            warn!("{key_var} is not set; every notice will use the template fallback");
            Ok(None)
        }
    }
}

/// Return the text if it holds anything besides whitespace.
pub(crate) fn non_empty(text: Option<String>) -> Result<String, ProviderError> {
    match text {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(ProviderError::EmptyText),
    }
}
