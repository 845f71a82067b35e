//! HTTP front end for notice-rs.
//!
//! `notice-web` exposes a [`NoticeGenerator`] over a small axum server:
//!
//! - `GET /`: liveness check, fixed text.
//! - `POST /generate-notice`: JSON `{title, summary, sign, type}` in,
//!   `{text, source}` out; `{error, details?}` with 400/500 on failure.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use notice_rs::prelude::*;
//! use notice_web::{WebConfig, spawn_server};
//!
//! let generator = Arc::new(NoticeGenerator::new(HandlerConfig::default(), None));
//! let addr = spawn_server(generator, WebConfig::default()).await?;
//! println!("Listening on http://{addr}");
//! ```

mod api;
mod server;

pub use api::ErrorBody;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use notice_rs::handler::NoticeGenerator;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `0.0.0.0:3000`.
    pub bind_addr: SocketAddr,
    /// Directory of static files (the notice form page) served for any
    /// path without a route. Default: `None`.
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            static_dir: None,
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// Binding to port 0 picks a free port. The server runs until the Tokio
/// runtime shuts down.
pub async fn spawn_server(
    generator: Arc<NoticeGenerator>,
    config: WebConfig,
) -> std::io::Result<SocketAddr> {
    let router = server::build_router(generator, config.static_dir);
    server::start_server(router, config.bind_addr).await
}
