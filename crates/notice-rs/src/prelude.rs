//! Convenience re-exports for common notice-rs types.
//!
//! ```ignore
//! use notice_rs::prelude::*;
//! ```

// Data model
pub use crate::{GenerationResult, Notice, NoticeRequest, Source};

// Handler
pub use crate::config::{ErrorPolicy, HandlerConfig, ValidationMode};
pub use crate::handler::NoticeGenerator;

// Providers
pub use crate::provider::{
    GeminiClient, GroqClient, Provider, ProviderFuture, ProviderKind, build_provider,
    resolve_provider,
};

// Errors
pub use crate::error::{NoticeError, ProviderError};

// Pure building blocks
pub use crate::fallback::fallback_notice;
pub use crate::prompt::build_prompt;
