//! Refresh token entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A long-lived, revocable credential held by one account.
///
/// The raw secret exists only in the login response and inside the
/// client-held cookie; the row stores nothing but its one-way hash.
/// Rows are created on login, read (never mutated) on every access-token
/// exchange, and deleted by revocation, account deletion, or the sweeper.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Unique token identifier, generated at creation.
    pub id: Uuid,
    /// The account this token belongs to.
    pub account_id: Uuid,
    /// Argon2 hash of the client-held random secret.
    #[serde(skip_serializing)]
    pub secret_hash: String,
    /// Free-form, user-editable description.
    pub description: String,
    /// When the token was issued. Immutable; expiry derives from it.
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Whether this token has outlived the given lifetime.
    pub fn is_expired(&self, lifetime: Duration, now: DateTime<Utc>) -> bool {
        now - self.created_at >= lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(created_at: DateTime<Utc>) -> RefreshToken {
        RefreshToken {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            secret_hash: "$argon2id$v=19$hash".to_string(),
            description: String::new(),
            created_at,
        }
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let now = Utc::now();
        let lifetime = Duration::days(7);

        assert!(token(now - lifetime).is_expired(lifetime, now));
        assert!(token(now - lifetime - Duration::seconds(1)).is_expired(lifetime, now));
        assert!(!token(now - lifetime + Duration::seconds(1)).is_expired(lifetime, now));
    }

    #[test]
    fn secret_hash_is_never_serialized() {
        let json = serde_json::to_string(&token(Utc::now())).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("secret_hash"));
    }
}
