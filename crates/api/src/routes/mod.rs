//! API route definitions.

use axum::{Router, middleware};

use crate::{
    AppState,
    middleware::auth::{is_user, verify_token},
};

pub mod health;
pub mod posts;
pub mod profile;
pub mod upload;

/// Creates the API router with all routes.
///
/// Write routes sit behind the auth gates only when `auth.protect_writes` is
/// set; `/me` is always gated.
pub fn api_routes_with_state(state: &AppState) -> Router<AppState> {
    let max_file_size = state.storage.config().max_file_size;
    let writes = posts::write_routes().merge(upload::routes(max_file_size));
    let writes = if state.auth.protect_writes {
        protect(writes, state)
    } else {
        writes
    };

    Router::new()
        .merge(health::routes())
        .merge(posts::read_routes())
        .merge(writes)
        .merge(protect(profile::routes(), state))
}

/// Puts `verify_token` then `is_user` in front of every route in `router`.
fn protect(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router
        .route_layer(middleware::from_fn_with_state(state.clone(), is_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), verify_token))
}
