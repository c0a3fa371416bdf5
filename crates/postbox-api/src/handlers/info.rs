//! Service info handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, InfoResponse};
use crate::state::AppState;

/// GET /v1/info
pub async fn info(State(state): State<AppState>) -> Json<ApiResponse<InfoResponse>> {
    Json(ApiResponse::ok(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        production: state.config.server.production,
    }))
}
