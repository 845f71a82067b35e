//! REST endpoint handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use notice_rs::NoticeRequest;
use notice_rs::error::NoticeError;
use notice_rs::handler::NoticeGenerator;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<NoticeGenerator>,
}

/// JSON body of every non-2xx response.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A failure on its way to becoming an HTTP response.
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                details,
            },
        }
    }
}

impl From<NoticeError> for ApiError {
    fn from(err: NoticeError) -> Self {
        match err {
            NoticeError::MissingField(field) => Self::new(
                StatusCode::BAD_REQUEST,
                "missing required field",
                Some(field.to_string()),
            ),
            NoticeError::Provider(e) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to generate notice",
                Some(e.summary()),
            ),
            NoticeError::Internal(detail) => {
                error!("Internal error: {detail}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error", None)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {rejection}");
        let details = match rejection {
            JsonRejection::MissingJsonContentType(_) => "expected Content-Type: application/json",
            JsonRejection::JsonSyntaxError(_) => "body is not valid JSON",
            JsonRejection::JsonDataError(_) => "body fields have the wrong type",
            _ => "failed to read request body",
        };
        Self::new(
            StatusCode::BAD_REQUEST,
            "invalid request body",
            Some(details.to_string()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// GET /: liveness check.
pub async fn health(State(app): State<AppState>) -> String {
    format!(
        "Notice server live ({} mode)",
        app.generator.provider_name()
    )
}

/// POST /generate-notice: draft a notice.
///
/// Returns 200 with `{text, source}` from either the provider or the
/// template fallback, 400 for a missing field or an unreadable body, and 500
/// for provider failures under the strict policy.
pub async fn generate_notice(
    State(app): State<AppState>,
    body: Result<Json<NoticeRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(request) = body?;
    let result = app.generator.generate(&request).await?;
    let value =
        serde_json::to_value(&result).map_err(|e| NoticeError::Internal(e.to_string()))?;
    Ok(Json(value))
}
