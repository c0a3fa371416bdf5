//! Account management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use postbox_core::error::AppError;
use postbox_core::types::pagination::PageResponse;
use postbox_entity::account::Account;

use crate::dto::request::{CreateAccountRequest, UpdateAccountRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthAccount, PaginationParams};
use crate::state::AppState;

/// Characters allowed in usernames.
const USERNAME_CHARSET: &str = "üäöÜÄÖabcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";

/// Validate a username: 3-32 characters from the allowed set.
fn validate_username(username: &str) -> Result<(), AppError> {
    let length = username.chars().count();
    if !(3..=32).contains(&length) {
        return Err(AppError::validation("Username must be 3-32 characters"));
    }
    if !username.chars().all(|c| USERNAME_CHARSET.contains(c)) {
        return Err(AppError::validation(
            "Username contains disallowed characters",
        ));
    }
    Ok(())
}

/// Resolve a path identifier to an account ID: `me` or a UUID.
pub(crate) fn resolve_identifier(auth: &AuthAccount, identifier: &str) -> Result<Uuid, AppError> {
    if identifier == "me" {
        return Ok(auth.id);
    }
    Uuid::parse_str(identifier)
        .map_err(|_| AppError::validation("Identifier must be 'me' or a UUID"))
}

/// Resolve the identifier and reject callers who are neither the owner nor
/// an admin.
pub(crate) fn authorize_identifier(
    auth: &AuthAccount,
    identifier: &str,
) -> Result<Uuid, AppError> {
    let account_id = resolve_identifier(auth, identifier)?;
    if !auth.can_access(account_id) {
        return Err(AppError::forbidden("insufficient permissions"));
    }
    Ok(account_id)
}

/// GET /v1/accounts
pub async fn list(
    State(state): State<AppState>,
    auth: AuthAccount,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<Account>>>> {
    if !auth.admin {
        return Err(AppError::forbidden("insufficient permissions").into());
    }

    let page = state.accounts.list(&params.into_page_request()).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /v1/accounts
pub async fn create(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(req): Json<CreateAccountRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Account>>)> {
    if !auth.admin {
        return Err(AppError::forbidden("insufficient permissions").into());
    }

    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    validate_username(&req.username)?;

    if state
        .accounts
        .find_by_username(&req.username)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("Username is already taken").into());
    }

    let account = Account {
        id: state.ids.next_id(),
        username: req.username,
        password_hash: state.hasher.hash(&req.password)?,
        admin: req.admin,
        created_at: Utc::now(),
    };
    state.accounts.upsert(&account).await?;

    tracing::info!(account_id = %account.id, username = %account.username, "Created account");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(account))))
}

/// GET /v1/accounts/{identifier}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(identifier): Path<String>,
) -> ApiResult<Json<ApiResponse<Account>>> {
    let account_id = authorize_identifier(&auth, &identifier)?;

    let account = state
        .accounts
        .find_by_id(account_id)
        .await?
        .ok_or_else(|| AppError::not_found("account not found"))?;

    Ok(Json(ApiResponse::ok(account)))
}

/// PATCH /v1/accounts/{identifier}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(identifier): Path<String>,
    Json(req): Json<UpdateAccountRequest>,
) -> ApiResult<Json<ApiResponse<Account>>> {
    let account_id = authorize_identifier(&auth, &identifier)?;

    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let mut account = state
        .accounts
        .find_by_id(account_id)
        .await?
        .ok_or_else(|| AppError::not_found("account not found"))?;

    if let Some(password) = &req.password {
        account.password_hash = state.hasher.hash(password)?;
    }
    if let Some(admin) = req.admin {
        // Only admins may grant or revoke admin rights, including their own.
        if !auth.admin {
            return Err(AppError::forbidden("insufficient permissions").into());
        }
        account.admin = admin;
    }

    state.accounts.upsert(&account).await?;
    Ok(Json(ApiResponse::ok(account)))
}

/// DELETE /v1/accounts/{identifier}
///
/// Revokes every refresh token of the account before deleting it, so no
/// orphaned session can outlive the account row.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(identifier): Path<String>,
) -> ApiResult<StatusCode> {
    let account_id = authorize_identifier(&auth, &identifier)?;

    state.sessions.revoke_all(account_id).await?;
    let deleted = state.accounts.delete(account_id).await?;
    if !deleted {
        return Err(AppError::not_found("account not found").into());
    }

    tracing::info!(account_id = %account_id, "Deleted account");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_caller() -> AuthAccount {
        AuthAccount {
            id: Uuid::new_v4(),
            admin: true,
        }
    }

    fn plain_caller() -> AuthAccount {
        AuthAccount {
            id: Uuid::new_v4(),
            admin: false,
        }
    }

    #[test]
    fn username_rules() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("al_1ce").is_ok());
        assert!(validate_username("grüße").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(33)).is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("dash-ed").is_err());
        assert!(validate_username("semi;colon").is_err());
    }

    #[test]
    fn me_resolves_to_caller() {
        let auth = plain_caller();
        assert_eq!(resolve_identifier(&auth, "me").unwrap(), auth.id);
    }

    #[test]
    fn uuid_identifier_is_parsed() {
        let auth = plain_caller();
        let other = Uuid::new_v4();
        assert_eq!(
            resolve_identifier(&auth, &other.to_string()).unwrap(),
            other
        );
        assert!(resolve_identifier(&auth, "not-a-uuid").is_err());
    }

    #[test]
    fn non_admin_cannot_touch_other_accounts() {
        let auth = plain_caller();
        let other = Uuid::new_v4();
        assert!(authorize_identifier(&auth, &other.to_string()).is_err());
        assert!(authorize_identifier(&auth, "me").is_ok());
    }

    #[test]
    fn admin_can_touch_any_account() {
        let auth = admin_caller();
        let other = Uuid::new_v4();
        assert!(authorize_identifier(&auth, &other.to_string()).is_ok());
    }
}
