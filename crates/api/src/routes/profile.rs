//! Current principal.

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;

use crate::{AppState, middleware::AuthUser};
use postwall_shared::auth::PrincipalInfo;

/// GET `/me`
async fn me(user: AuthUser) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": "Authenticated",
            "data": PrincipalInfo::from(user.claims()),
        })),
    )
}

/// Creates the profile routes. Callers must gate them with the auth layers.
pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
