//! JSON error envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use postwall_shared::AppError;
use serde_json::json;
use tracing::{debug, error};

/// A failed request: a client-facing message plus the underlying error.
///
/// Renders as `{"status": "error", "message", "error", "code"}` with the
/// status code taken from the [`AppError`].
#[derive(Debug)]
pub struct ApiError {
    message: String,
    source: AppError,
}

impl ApiError {
    /// Wraps an error with the message shown to clients.
    pub fn new(message: impl Into<String>, source: impl Into<AppError>) -> Self {
        Self {
            message: message.into(),
            source: source.into(),
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.source.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.source.is_server_error() {
            error!(error = %self.source, message = %self.message, "request failed");
        } else {
            debug!(error = %self.source, message = %self.message, "request rejected");
        }

        (
            status,
            Json(json!({
                "status": "error",
                "message": self.message,
                "error": self.source.to_string(),
                "code": self.source.error_code(),
            })),
        )
            .into_response()
    }
}
