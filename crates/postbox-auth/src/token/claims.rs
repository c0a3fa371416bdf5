//! Access token claims.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims payload embedded in every access token.
///
/// Never persisted; reconstructed fresh from the signed token bytes on
/// every validation. Claims reference an account by ID only, with no link
/// back to the refresh token that produced them, so verification never
/// touches a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject — the account ID.
    pub sub: Uuid,
    /// Admin flag at the time of token issuance.
    pub admin: bool,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}
