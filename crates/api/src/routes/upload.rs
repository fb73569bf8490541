//! Image upload route.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;
use tracing::info;

use crate::{AppState, error::ApiError};
use postwall_core::storage::{StorageError, UploadRequest};
use postwall_shared::AppError;

/// Multipart field carrying the image.
const IMAGE_FIELD: &str = "image";

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

const UPLOAD_FAILED: &str = "Error uploading image";

/// Creates the upload route with a body limit sized for `max_file_size`.
pub fn routes(max_file_size: u64) -> Router<AppState> {
    let limit = usize::try_from(max_file_size.saturating_add(MULTIPART_OVERHEAD))
        .unwrap_or(usize::MAX);

    Router::new()
        .route("/upload", post(upload_image))
        .layer(DefaultBodyLimit::max(limit))
}

/// Reads fields until `image` turns up; other fields are skipped.
async fn read_image(mut multipart: Multipart) -> Result<UploadRequest, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(UPLOAD_FAILED, AppError::Upload(e.body_text())))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(ToString::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::new(UPLOAD_FAILED, AppError::Upload(e.body_text())))?;

        return Ok(UploadRequest {
            filename,
            content_type,
            data,
        });
    }

    Err(ApiError::new(UPLOAD_FAILED, StorageError::MissingFile))
}

/// POST `/upload`
async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            return ApiError::new(UPLOAD_FAILED, AppError::Upload(rejection.body_text()))
                .into_response();
        }
    };

    let request = match read_image(multipart).await {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };

    match state.storage.store(request).await {
        Ok(stored) => {
            info!(key = %stored.key, size = stored.size, "image uploaded");
            (
                StatusCode::OK,
                Json(json!({
                    "status": "success",
                    "message": "Image uploaded successfully",
                    "url": stored.url,
                })),
            )
                .into_response()
        }
        Err(e) => ApiError::new(UPLOAD_FAILED, e).into_response(),
    }
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
