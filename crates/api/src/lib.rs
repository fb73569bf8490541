//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for posts and image uploads
//! - Authentication middleware
//! - The JSON error envelope

pub mod error;
pub mod middleware;
pub mod routes;

use axum::{Router, http::header::AUTHORIZATION};
use postwall_core::post::PostService;
use postwall_core::storage::StorageService;
use postwall_shared::JwtService;
use postwall_shared::config::AuthSettings;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Post operations over the configured store.
    pub posts: PostService,
    /// JWT service for token validation.
    pub jwt_service: Arc<JwtService>,
    /// Storage service for uploaded images.
    pub storage: Arc<StorageService>,
    /// Route protection settings.
    pub auth: Arc<AuthSettings>,
}

/// Creates the main application router.
///
/// Every route is registered here, before the listener starts serving.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes_with_state(&state))
        .layer(TraceLayer::new_for_http())
        // Must wrap TraceLayer
        .layer(SetSensitiveRequestHeadersLayer::new(std::iter::once(
            AUTHORIZATION,
        )))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod test_support;
