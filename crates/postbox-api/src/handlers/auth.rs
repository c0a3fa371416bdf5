//! Auth handlers — login (refresh token issuance) and access token exchange.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::OffsetDateTime;
use validator::Validate;

use postbox_auth::session::cookie::{REFRESH_COOKIE_NAME, REFRESH_COOKIE_PATH};
use postbox_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{AccessTokenResponse, ApiResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /v1/auth/refresh_token
///
/// Verifies the credentials and sets the refresh token cookie. The raw
/// secret only ever leaves the server inside this cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(CookieJar, StatusCode)> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let issued = state.sessions.login(&req.username, &req.password).await?;

    let expires = OffsetDateTime::from_unix_timestamp(issued.expires_at.timestamp())
        .map_err(|e| AppError::internal(format!("Invalid cookie expiry: {e}")))?;

    let cookie = Cookie::build((REFRESH_COOKIE_NAME, issued.cookie_value()))
        .path(REFRESH_COOKIE_PATH)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .expires(expires)
        .build();

    Ok((jar.add(cookie), StatusCode::OK))
}

/// GET /v1/auth/access_token
///
/// Exchanges the refresh token cookie for a short-lived access token.
pub async fn access_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<ApiResponse<AccessTokenResponse>>> {
    let cookie = jar
        .get(REFRESH_COOKIE_NAME)
        .ok_or_else(|| AppError::unauthorized("invalid credentials"))?;

    let grant = state.sessions.exchange_access_token(cookie.value()).await?;

    Ok(Json(ApiResponse::ok(AccessTokenResponse {
        access_token: grant.access_token,
        expires: grant.expires_at,
    })))
}
