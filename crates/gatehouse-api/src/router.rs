//! Route definitions for the Gatehouse HTTP API.
//!
//! All routes are mounted under `/api/v1`. The authentication gate wraps
//! every route and decides per path whether an identity is required.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and the authentication gate.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().merge(health_routes()).merge(user_routes());

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ))
        .with_state(state)
}

/// Status probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/status", get(handlers::health::status))
}

/// Registration and self lookup
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::user::register))
        .route("/users/me", get(handlers::user::me))
}
