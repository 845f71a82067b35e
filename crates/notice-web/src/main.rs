//! Notice generation server.
//!
//! Reads configuration once at startup from flags, the environment, and an
//! optional `.env` file. The provider credential comes from
//! `GEMINI_API_KEY` or `GROQ_API_KEY` depending on `--provider`.
//!
//! # Usage
//!
//! ```bash
//! GEMINI_API_KEY=... cargo run -p notice-web
//! GROQ_API_KEY=... cargo run -p notice-web -- --provider groq --port 8080
//! cargo run -p notice-web -- --policy strict --timeout-secs 10
//! ```
//!
//! Then:
//!
//! ```bash
//! curl -X POST http://localhost:3000/generate-notice \
//!   -H 'Content-Type: application/json' \
//!   -d '{"title":"Exam Schedule","summary":"Mid-terms start Monday","sign":"Dean of Academics","type":"Notice"}'
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use notice_rs::prelude::*;
use notice_web::{WebConfig, spawn_server};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Formal notice generation server.
#[derive(Parser)]
#[command(name = "notice-web", about = "Drafts formal notices through a hosted LLM")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Text-generation provider: gemini or groq.
    #[arg(long, env = "NOTICE_PROVIDER", default_value = "gemini")]
    provider: ProviderKind,

    /// Model name. Defaults to the provider's standard model.
    #[arg(long, env = "NOTICE_MODEL")]
    model: Option<String>,

    /// Override the provider's base URL (proxies, local stubs).
    #[arg(long, env = "NOTICE_PROVIDER_URL")]
    base_url: Option<String>,

    /// What to do when the provider fails: fallback or strict.
    #[arg(long, env = "NOTICE_POLICY", default_value = "fallback")]
    policy: ErrorPolicy,

    /// How to treat missing request fields: strict or lenient.
    #[arg(long, env = "NOTICE_VALIDATION", default_value = "strict")]
    validation: ValidationMode,

    /// Upper bound on each provider call, in seconds.
    #[arg(
        long,
        env = "NOTICE_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Directory of static files to serve (e.g. the notice form page).
    #[arg(long, env = "NOTICE_STATIC_DIR")]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    // A missing .env file is fine; real environment variables still apply.
    dotenv::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Provider, if a credential is configured.
    let api_key = std::env::var(args.provider.api_key_var()).ok();
    let provider = resolve_provider(
        args.provider,
        args.policy,
        api_key,
        args.model,
        args.base_url,
    )?;

    // 2. Handler.
    let config = HandlerConfig::default()
        .with_policy(args.policy)
        .with_validation(args.validation)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    info!(
        "Provider={} policy={} validation={} timeout={}s",
        args.provider, config.policy, config.validation, args.timeout_secs
    );
    let generator = Arc::new(NoticeGenerator::new(config, provider));

    // 3. Server.
    let web_config = WebConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        static_dir: args.static_dir,
    };
    let addr = spawn_server(generator, web_config)
        .await
        .map_err(|e| format!("failed to bind: {e}"))?;
    info!("Server running on http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for shutdown signal: {e}"))?;
    info!("Shutting down");
    Ok(())
}
