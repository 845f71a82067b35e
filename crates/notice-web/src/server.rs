//! Axum server setup and router construction.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use notice_rs::handler::NoticeGenerator;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::error;

use crate::api::{self, AppState};

/// Build the full axum router.
///
/// The router serves:
/// - liveness text at `/`
/// - the generation endpoint at `/generate-notice`
/// - optional static files for every other path
pub fn build_router(generator: Arc<NoticeGenerator>, static_dir: Option<PathBuf>) -> Router {
    let app_state = AppState { generator };

    // Browsers post the form from whatever host serves the page.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(api::health))
        .route("/generate-notice", post(api::generate_notice))
        .with_state(app_state);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    // Last, so static files get CORS headers too.
    router.layer(cors)
}

/// Bind the listener, spawn the server, and return the bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("Server stopped: {e}");
        }
    });

    Ok(addr)
}
