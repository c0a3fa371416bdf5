//! `AuthAccount` extractor — pulls the access token from the Authorization
//! header and verifies it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use postbox_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated caller available in handlers.
///
/// Built from the access token claims alone. Verification checks signature
/// and expiry only, no store lookup, so a deleted account's access token
/// stays usable until it expires.
#[derive(Debug, Clone, Copy)]
pub struct AuthAccount {
    /// The authenticated account's ID.
    pub id: Uuid,
    /// Whether the caller has admin rights.
    pub admin: bool,
}

impl AuthAccount {
    /// Whether the caller may act on the given account's resources.
    pub fn can_access(&self, account_id: Uuid) -> bool {
        self.admin || self.id == account_id
    }
}

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("invalid credentials"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("invalid credentials"))?;

        let claims = state.codec.verify(token)?;

        Ok(AuthAccount {
            id: claims.sub,
            admin: claims.admin,
        })
    }
}
