//! Refresh token metadata and revocation handlers.
//!
//! Token hashes never leave the server; the `RefreshToken` model skips the
//! hash field during serialization.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use postbox_core::error::AppError;
use postbox_core::types::pagination::PageResponse;
use postbox_entity::refresh_token::RefreshToken;

use crate::dto::request::UpdateRefreshTokenRequest;
use crate::dto::response::{ApiResponse, RevokedCountResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthAccount, PaginationParams};
use crate::handlers::account::authorize_identifier;
use crate::state::AppState;

/// GET /v1/accounts/{identifier}/refresh_tokens
pub async fn list(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(identifier): Path<String>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<RefreshToken>>>> {
    let account_id = authorize_identifier(&auth, &identifier)?;

    let page = state
        .sessions
        .list_tokens(account_id, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /v1/accounts/{identifier}/refresh_tokens/{token_id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path((identifier, token_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<ApiResponse<RefreshToken>>> {
    let account_id = authorize_identifier(&auth, &identifier)?;

    let token = state.sessions.get_token(account_id, token_id).await?;
    Ok(Json(ApiResponse::ok(token)))
}

/// PATCH /v1/accounts/{identifier}/refresh_tokens/{token_id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path((identifier, token_id)): Path<(String, Uuid)>,
    Json(req): Json<UpdateRefreshTokenRequest>,
) -> ApiResult<Json<ApiResponse<RefreshToken>>> {
    let account_id = authorize_identifier(&auth, &identifier)?;

    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .sessions
        .update_description(account_id, token_id, &req.description)
        .await?;

    let token = state.sessions.get_token(account_id, token_id).await?;
    Ok(Json(ApiResponse::ok(token)))
}

/// DELETE /v1/accounts/{identifier}/refresh_tokens/{token_id}
pub async fn revoke(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path((identifier, token_id)): Path<(String, Uuid)>,
) -> ApiResult<StatusCode> {
    let account_id = authorize_identifier(&auth, &identifier)?;

    state.sessions.revoke(account_id, token_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /v1/accounts/{identifier}/refresh_tokens
pub async fn revoke_all(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(identifier): Path<String>,
) -> ApiResult<Json<ApiResponse<RevokedCountResponse>>> {
    let account_id = authorize_identifier(&auth, &identifier)?;

    let revoked = state.sessions.revoke_all(account_id).await?;
    Ok(Json(ApiResponse::ok(RevokedCountResponse { revoked })))
}
