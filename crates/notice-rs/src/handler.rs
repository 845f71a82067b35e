//! The notice request handler.
//!
//! [`NoticeGenerator`] turns a [`NoticeRequest`] into a [`GenerationResult`]:
//!
//! ```text
//! validate ─▶ build_prompt ─▶ provider.generate (bounded by timeout)
//!                                   │ ok            │ any ProviderError
//!                                   ▼               ▼
//!                          source = provider   ErrorPolicy::Fallback ─▶ fallback_notice
//!                                              ErrorPolicy::Strict   ─▶ NoticeError::Provider
//! ```
//!
//! The generator holds no per-request state, so one instance is shared
//! across all concurrent requests.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::{ErrorPolicy, HandlerConfig};
use crate::error::{NoticeError, ProviderError};
use crate::fallback::fallback_notice;
use crate::prompt::build_prompt;
use crate::provider::Provider;
use crate::{GenerationResult, Notice, NoticeRequest};

/// Drafts notices through an injected [`Provider`].
#[derive(Clone)]
pub struct NoticeGenerator {
    config: HandlerConfig,
    /// `None` when no credential was configured.
    provider: Option<Arc<dyn Provider>>,
}

impl NoticeGenerator {
    pub fn new(config: HandlerConfig, provider: Option<Arc<dyn Provider>>) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Name of the configured provider, or `"none"`.
    pub fn provider_name(&self) -> &str {
        self.provider.as_deref().map_or("none", |p| p.name())
    }

    /// Produce the notice body for `request`.
    ///
    /// Fails only with [`NoticeError::MissingField`] (strict validation) or,
    /// under [`ErrorPolicy::Strict`], [`NoticeError::Provider`]. Under the
    /// fallback policy every valid request gets non-empty text.
    pub async fn generate(&self, request: &NoticeRequest) -> Result<GenerationResult, NoticeError> {
        let notice = match request.validate(self.config.validation) {
            Ok(n) => n,
            Err(e) => {
                info!(path = "rejected", "Notice request rejected: {e}");
                return Err(e);
            }
        };

        match self.call_provider(&notice).await {
            Ok(text) => {
                info!(
                    path = "provider",
                    provider = self.provider_name(),
                    "Notice generated: {}",
                    notice.title
                );
                Ok(GenerationResult::provider(text))
            }
            Err(err) => self.recover(&notice, err),
        }
    }

    async fn call_provider(&self, notice: &Notice<'_>) -> Result<String, ProviderError> {
        let provider = self.provider.as_ref().ok_or(ProviderError::Unavailable)?;
        let prompt = build_prompt(notice);
        let timeout = self.config.timeout;

        tokio::time::timeout(timeout, provider.generate(&prompt))
            .await
            .map_err(|_| ProviderError::Timeout(timeout))?
    }

    fn recover(
        &self,
        notice: &Notice<'_>,
        err: ProviderError,
    ) -> Result<GenerationResult, NoticeError> {
        match self.config.policy {
            ErrorPolicy::Fallback => {
                warn!(
                    path = "fallback",
                    provider = self.provider_name(),
                    "Using template notice for {}: {err}",
                    notice.title
                );
                Ok(GenerationResult::fallback(fallback_notice(notice)))
            }
            ErrorPolicy::Strict => {
                error!(
                    path = "failed",
                    provider = self.provider_name(),
                    "Notice generation failed for {}: {err}",
                    notice.title
                );
                Err(NoticeError::Provider(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Source;
    use crate::config::ValidationMode;
    use crate::provider::ProviderFuture;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Test double: returns a canned outcome and counts calls.
    struct StubProvider {
        outcome: fn() -> Result<String, ProviderError>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(outcome: fn() -> Result<String, ProviderError>) -> Self {
            Self {
                outcome,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        fn hanging(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::new(|| Ok("too late".into()))
            }
        }
    }

    impl Provider for StubProvider {
        fn generate(&self, _prompt: &str) -> ProviderFuture<'_> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
                (self.outcome)()
            })
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn exam() -> NoticeRequest {
        NoticeRequest::new("Exam Schedule", "Mid-terms start Monday", "Notice")
            .with_sign("Dean of Academics")
    }

    fn expected_fallback(req: &NoticeRequest) -> String {
        fallback_notice(&req.validate(ValidationMode::Strict).unwrap())
    }

    fn generator(config: HandlerConfig, provider: Arc<StubProvider>) -> NoticeGenerator {
        let provider: Arc<dyn Provider> = provider;
        NoticeGenerator::new(config, Some(provider))
    }

    #[tokio::test]
    async fn provider_text_is_relayed() {
        let stub = Arc::new(StubProvider::new(|| Ok("Drafted body".into())));
        let result = generator(HandlerConfig::default(), stub.clone())
            .generate(&exam())
            .await
            .unwrap();
        assert_eq!(result, GenerationResult::provider("Drafted body"));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn every_provider_failure_falls_back() {
        let failures: [fn() -> Result<String, ProviderError>; 5] = [
            || Err(ProviderError::Network("connection refused".into())),
            || {
                Err(ProviderError::Status {
                    provider: "stub",
                    status: 500,
                    body: "boom".into(),
                })
            },
            || Err(ProviderError::Malformed("eof".into())),
            || Err(ProviderError::EmptyText),
            || {
                Err(ProviderError::Api {
                    provider: "stub",
                    message: "quota".into(),
                })
            },
        ];
        for outcome in failures {
            let stub = Arc::new(StubProvider::new(outcome));
            let result = generator(HandlerConfig::default(), stub)
                .generate(&exam())
                .await
                .unwrap();
            assert_eq!(result.source, Source::Fallback);
            assert_eq!(result.text, expected_fallback(&exam()));
        }
    }

    #[tokio::test]
    async fn fallback_example_contains_summary_and_signatory() {
        let stub = Arc::new(StubProvider::new(|| {
            Err(ProviderError::Network("down".into()))
        }));
        let result = generator(HandlerConfig::default(), stub)
            .generate(&exam())
            .await
            .unwrap();
        assert!(result.text.contains("Mid-terms start Monday"));
        assert!(result.text.contains("Dean of Academics"));
    }

    #[tokio::test]
    async fn missing_provider_falls_back() {
        let generator = NoticeGenerator::new(HandlerConfig::default(), None);
        assert_eq!(generator.provider_name(), "none");
        let result = generator.generate(&exam()).await.unwrap();
        assert_eq!(result.source, Source::Fallback);
        assert_eq!(result.text, expected_fallback(&exam()));
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_provider_times_out_into_fallback() {
        let stub = Arc::new(StubProvider::hanging(Duration::from_secs(3)));
        let config = HandlerConfig::default().with_timeout(Duration::from_secs(2));
        let result = generator(config, stub).generate(&exam()).await.unwrap();
        assert_eq!(result.source, Source::Fallback);
        assert_eq!(result.text, expected_fallback(&exam()));
    }

    #[tokio::test(start_paused = true)]
    async fn strict_policy_surfaces_timeout() {
        let stub = Arc::new(StubProvider::hanging(Duration::from_secs(3)));
        let config = HandlerConfig::default()
            .with_policy(ErrorPolicy::Strict)
            .with_timeout(Duration::from_secs(2));
        let err = generator(config, stub).generate(&exam()).await.unwrap_err();
        assert!(matches!(
            err,
            NoticeError::Provider(ProviderError::Timeout(d)) if d == Duration::from_secs(2)
        ));
    }

    #[tokio::test]
    async fn strict_policy_surfaces_provider_error() {
        let stub = Arc::new(StubProvider::new(|| Err(ProviderError::EmptyText)));
        let config = HandlerConfig::default().with_policy(ErrorPolicy::Strict);
        let err = generator(config, stub).generate(&exam()).await.unwrap_err();
        assert!(matches!(err, NoticeError::Provider(ProviderError::EmptyText)));
    }

    #[tokio::test]
    async fn strict_policy_without_provider_is_unavailable() {
        let config = HandlerConfig::default().with_policy(ErrorPolicy::Strict);
        let err = NoticeGenerator::new(config, None)
            .generate(&exam())
            .await
            .unwrap_err();
        assert!(matches!(err, NoticeError::Provider(ProviderError::Unavailable)));
    }

    #[tokio::test]
    async fn missing_field_never_reaches_provider() {
        let stub = Arc::new(StubProvider::new(|| Ok("unused".into())));
        let generator = generator(HandlerConfig::default(), stub.clone());
        for field in ["title", "summary", "type"] {
            let mut req = exam();
            match field {
                "title" => req.title = None,
                "summary" => req.summary = None,
                _ => req.kind = None,
            }
            let err = generator.generate(&req).await.unwrap_err();
            assert!(matches!(err, NoticeError::MissingField(f) if f == field));
        }
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lenient_validation_generates_for_empty_request() {
        let stub = Arc::new(StubProvider::new(|| Err(ProviderError::EmptyText)));
        let config = HandlerConfig::default().with_validation(ValidationMode::Lenient);
        let result = generator(config, stub.clone())
            .generate(&NoticeRequest::default())
            .await
            .unwrap();
        assert!(!result.text.is_empty());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fallback_is_stable_across_calls() {
        let generator = NoticeGenerator::new(HandlerConfig::default(), None);
        let a = generator.generate(&exam()).await.unwrap();
        let b = generator.generate(&exam()).await.unwrap();
        assert_eq!(a, b);
    }
}
