//! Error taxonomy for notice generation.
//!
//! [`NoticeError`] is what crosses the handler boundary. [`ProviderError`]
//! stays inside the provider path: under the fallback policy it is always
//! compensated locally and never reaches the caller.

use std::time::Duration;

use thiserror::Error;

/// Failure of the remote provider path.
///
/// [`ProviderError::Unavailable`] means no provider is configured (no
/// credential). Every other variant is a failed call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider unavailable: no API credential configured")]
    Unavailable,

    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Network(String),

    #[error("{provider} API HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} API error: {message}")]
    Api {
        provider: &'static str,
        message: String,
    },

    #[error("failed to parse response: {0}")]
    Malformed(String),

    #[error("response contained no generated text")]
    EmptyText,
}

impl ProviderError {
    /// Short description safe to show a caller: never includes the
    /// provider's response body or error payload.
    pub fn summary(&self) -> String {
        match self {
            ProviderError::Unavailable => "provider unavailable".into(),
            ProviderError::Timeout(d) => format!("provider timed out after {}s", d.as_secs()),
            ProviderError::Network(_) => "provider unreachable".into(),
            ProviderError::Status { status, .. } => format!("provider returned HTTP {status}"),
            ProviderError::Api { .. } => "provider reported an error".into(),
            ProviderError::Malformed(_) => "provider response malformed".into(),
            ProviderError::EmptyText => "provider returned no text".into(),
        }
    }
}

/// Errors surfaced by [`NoticeGenerator::generate`](crate::handler::NoticeGenerator::generate).
#[derive(Debug, Error)]
pub enum NoticeError {
    /// A required field is absent or blank. Client error.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Provider failure under the strict policy.
    #[error("generation failed: {0}")]
    Provider(#[from] ProviderError),

    /// Anything else. Details belong in the server log only.
    #[error("internal error: {0}")]
    Internal(String),
}

impl NoticeError {
    /// Whether the caller caused this error.
    pub fn is_client_error(&self) -> bool {
        matches!(self, NoticeError::MissingField(_))
    }
}
