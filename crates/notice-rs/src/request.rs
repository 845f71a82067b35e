//! Incoming notice requests and their validation.

use serde::{Deserialize, Serialize};

use crate::config::ValidationMode;
use crate::error::NoticeError;

/// Document category used when a lenient request leaves `type` blank.
pub const DEFAULT_KIND: &str = "Notice";

/// Raw request payload as it arrives over the wire.
///
/// Every field is optional at the JSON level so that [`validate`](Self::validate)
/// decides what counts as missing, not the decoder.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    /// Signatory or issuing authority.
    #[serde(default)]
    pub sign: Option<String>,
    /// Document category, e.g. "Notice" or "Circular".
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl NoticeRequest {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            summary: Some(summary.into()),
            sign: None,
            kind: Some(kind.into()),
        }
    }

    pub fn with_sign(mut self, sign: impl Into<String>) -> Self {
        self.sign = Some(sign.into());
        self
    }

    /// Check required fields and produce a borrowed [`Notice`].
    ///
    /// Strict mode rejects a missing or blank `title`, `summary`, or `type`
    /// (checked in that order). Lenient mode substitutes empty text, and
    /// [`DEFAULT_KIND`] for the type. `sign` is never required.
    pub fn validate(&self, mode: ValidationMode) -> Result<Notice<'_>, NoticeError> {
        let title = required(self.title.as_deref(), "title", mode)?.unwrap_or("");
        let summary = required(self.summary.as_deref(), "summary", mode)?.unwrap_or("");
        let kind = required(self.kind.as_deref(), "type", mode)?.unwrap_or(DEFAULT_KIND);

        Ok(Notice {
            title,
            summary,
            sign: self.sign.as_deref().unwrap_or(""),
            kind,
        })
    }
}

fn required<'a>(
    value: Option<&'a str>,
    field: &'static str,
    mode: ValidationMode,
) -> Result<Option<&'a str>, NoticeError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(Some(v)),
        _ => match mode {
            ValidationMode::Strict => Err(NoticeError::MissingField(field)),
            ValidationMode::Lenient => Ok(None),
        },
    }
}

/// A validated notice request, borrowing from the [`NoticeRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Notice<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    /// Empty when the caller gave no signatory.
    pub sign: &'a str,
    pub kind: &'a str,
}
