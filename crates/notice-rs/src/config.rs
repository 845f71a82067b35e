//! Handler configuration with sensible defaults.
//!
//! [`HandlerConfig`] captures the deployment-time choices the
//! [`NoticeGenerator`](crate::handler::NoticeGenerator) needs: what to do when
//! the provider fails, how strictly to validate input, and how long to wait
//! for the provider.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default upper bound on a single provider call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// What the handler does when the provider path fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Never fail on provider errors; answer with the template document.
    #[default]
    Fallback,
    /// Surface provider errors to the caller as internal errors.
    Strict,
}

/// How missing request fields are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Missing `title`, `summary`, or `type` is a client error.
    #[default]
    Strict,
    /// Missing fields are replaced with empty or default text.
    Lenient,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fallback" => Ok(ErrorPolicy::Fallback),
            "strict" => Ok(ErrorPolicy::Strict),
            other => Err(format!(
                "unknown error policy '{other}' (expected 'fallback' or 'strict')"
            )),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Fallback => write!(f, "fallback"),
            ErrorPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(ValidationMode::Strict),
            "lenient" => Ok(ValidationMode::Lenient),
            other => Err(format!(
                "unknown validation mode '{other}' (expected 'strict' or 'lenient')"
            )),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Strict => write!(f, "strict"),
            ValidationMode::Lenient => write!(f, "lenient"),
        }
    }
}

/// Configuration for a [`NoticeGenerator`](crate::handler::NoticeGenerator).
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Provider failure policy. Default: [`ErrorPolicy::Fallback`].
    pub policy: ErrorPolicy,
    /// Input validation mode. Default: [`ValidationMode::Strict`].
    pub validation: ValidationMode,
    /// Upper bound on the provider call. Default: 30 seconds.
    pub timeout: Duration,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            policy: ErrorPolicy::default(),
            validation: ValidationMode::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HandlerConfig {
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_degrade_gracefully() {
        let config = HandlerConfig::default();
        assert_eq!(config.policy, ErrorPolicy::Fallback);
        assert_eq!(config.validation, ValidationMode::Strict);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn builders_override_fields() {
        let config = HandlerConfig::default()
            .with_policy(ErrorPolicy::Strict)
            .with_validation(ValidationMode::Lenient)
            .with_timeout(Duration::from_secs(2));
        assert_eq!(config.policy, ErrorPolicy::Strict);
        assert_eq!(config.validation, ValidationMode::Lenient);
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Strict".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Strict));
        assert_eq!("FALLBACK".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Fallback));
        assert_eq!(
            "lenient".parse::<ValidationMode>(),
            Ok(ValidationMode::Lenient)
        );
        assert!("loud".parse::<ErrorPolicy>().is_err());
        assert!("sloppy".parse::<ValidationMode>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for policy in [ErrorPolicy::Fallback, ErrorPolicy::Strict] {
            assert_eq!(policy.to_string().parse::<ErrorPolicy>(), Ok(policy));
        }
    }
}
