//! Formal notice drafting over hosted LLM providers.
//!
//! `notice-rs` turns a small form payload (title, summary, signatory,
//! document type) into the body text of a formal institutional notice. The
//! text is drafted by one configured text-generation provider (Google
//! Gemini or Groq). When the provider is unavailable, slow, or returns
//! nothing usable, a deterministic template document is produced instead.
//!
//! # Getting started
//!
//! ```ignore
//! use std::sync::Arc;
//! use notice_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), String> {
//!     let api_key = std::env::var("GEMINI_API_KEY").unwrap();
//!     let provider = build_provider(ProviderKind::Gemini, api_key, None, None)?;
//!
//!     let generator = NoticeGenerator::new(HandlerConfig::default(), Some(provider));
//!
//!     let request = NoticeRequest::new("Exam Schedule", "Mid-terms start Monday", "Notice")
//!         .with_sign("Dean of Academics");
//!     let result = generator.generate(&request).await.map_err(|e| e.to_string())?;
//!     println!("[{}] {}", result.source, result.text);
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`request`] | Validation of incoming [`NoticeRequest`]s into borrowed [`Notice`] views |
//! | [`prompt`] | Deterministic prompt rendering |
//! | [`fallback`] | Deterministic template document used when the provider path fails |
//! | [`provider`] | [`Provider`](provider::Provider) adapter trait, Gemini and Groq clients |
//! | [`handler`] | [`NoticeGenerator`](handler::NoticeGenerator), the request handler |
//! | [`config`] | [`HandlerConfig`](config::HandlerConfig), error policy and validation mode |
//! | [`error`] | Error taxonomy |

pub mod config;
pub mod error;
pub mod fallback;
pub mod handler;
pub mod prelude;
pub mod prompt;
pub mod provider;
pub mod request;

use serde::{Deserialize, Serialize};

pub use request::{Notice, NoticeRequest};

// ── Response types ─────────────────────────────────────────────────

/// Which path produced a [`GenerationResult`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Drafted by the remote provider.
    Provider,
    /// Composed locally from the fixed template.
    Fallback,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Provider => write!(f, "provider"),
            Source::Fallback => write!(f, "fallback"),
        }
    }
}

/// The body text of a generated notice and where it came from.
///
/// Serialized as-is for the HTTP response: `{"text": "...", "source": "..."}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GenerationResult {
    pub text: String,
    pub source: Source,
}

impl GenerationResult {
    pub fn provider(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: Source::Provider,
        }
    }

    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: Source::Fallback,
        }
    }
}
