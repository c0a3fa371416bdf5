//! Route definitions for the Postbox HTTP API.
//!
//! All routes are versioned under `/v1`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .merge(auth_routes())
        .merge(account_routes())
        .merge(meta_routes());

    Router::new()
        .nest("/v1", v1_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Login and token exchange.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/refresh_token", post(handlers::auth::login))
        .route("/auth/access_token", get(handlers::auth::access_token))
}

/// Account management plus per-account refresh token metadata.
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(handlers::account::list))
        .route("/accounts", post(handlers::account::create))
        .route("/accounts/{identifier}", get(handlers::account::get))
        .route("/accounts/{identifier}", patch(handlers::account::update))
        .route("/accounts/{identifier}", delete(handlers::account::delete))
        .route(
            "/accounts/{identifier}/refresh_tokens",
            get(handlers::refresh_token::list),
        )
        .route(
            "/accounts/{identifier}/refresh_tokens",
            delete(handlers::refresh_token::revoke_all),
        )
        .route(
            "/accounts/{identifier}/refresh_tokens/{token_id}",
            get(handlers::refresh_token::get),
        )
        .route(
            "/accounts/{identifier}/refresh_tokens/{token_id}",
            patch(handlers::refresh_token::update),
        )
        .route(
            "/accounts/{identifier}/refresh_tokens/{token_id}",
            delete(handlers::refresh_token::revoke),
        )
}

/// Health and service info (no auth required).
fn meta_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/info", get(handlers::info::info))
}
