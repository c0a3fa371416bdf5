//! Session lifecycle service — login, token exchange, and revocation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use postbox_core::error::AppError;
use postbox_core::result::AppResult;
use postbox_core::types::id::IdGenerator;
use postbox_core::types::pagination::{PageRequest, PageResponse};
use postbox_entity::account::AccountStore;
use postbox_entity::refresh_token::{RefreshToken, RefreshTokenStore};

use crate::password::PasswordHasher;
use crate::token::{AccessTokenCodec, AccessTokenGrant};

use super::cookie;
use super::secret;

/// Result of a successful login: the one and only time the raw secret
/// exists outside the client-held cookie.
#[derive(Debug, Clone)]
pub struct IssuedRefreshToken {
    /// The authenticated account.
    pub account_id: Uuid,
    /// ID of the persisted refresh token row.
    pub token_id: Uuid,
    /// The raw secret, for cookie encoding.
    pub secret: String,
    /// When the refresh token expires.
    pub expires_at: DateTime<Utc>,
}

impl IssuedRefreshToken {
    /// Encode this token into the refresh cookie value.
    pub fn cookie_value(&self) -> String {
        cookie::encode_cookie_value(self.account_id, &self.secret)
    }
}

/// Orchestrates login, refresh token issuance, refresh-to-access exchange,
/// and revocation.
///
/// Holds no mutable state of its own; all state lives in the injected
/// stores, so the service is freely shared across concurrent request tasks.
#[derive(Clone)]
pub struct SessionService {
    accounts: Arc<dyn AccountStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    hasher: Arc<PasswordHasher>,
    codec: Arc<AccessTokenCodec>,
    ids: IdGenerator,
    refresh_lifetime: Duration,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("refresh_lifetime", &self.refresh_lifetime)
            .finish()
    }
}

impl SessionService {
    /// Create a new session service with all required dependencies.
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        hasher: Arc<PasswordHasher>,
        codec: Arc<AccessTokenCodec>,
        ids: IdGenerator,
        refresh_lifetime_seconds: u64,
    ) -> Self {
        Self {
            accounts,
            refresh_tokens,
            hasher,
            codec,
            ids,
            refresh_lifetime: Duration::seconds(refresh_lifetime_seconds as i64),
        }
    }

    /// The single error every authentication failure collapses into.
    ///
    /// Bad password, unknown username, malformed cookie, wrong secret, and
    /// expired token are all indistinguishable to the caller.
    fn unauthorized() -> AppError {
        AppError::unauthorized("invalid credentials")
    }

    /// Verify credentials and issue a fresh refresh token.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<IssuedRefreshToken> {
        let account = self
            .accounts
            .find_by_username(username)
            .await?
            .ok_or_else(Self::unauthorized)?;

        if !self.hasher.verify(password, &account.password_hash)? {
            return Err(Self::unauthorized());
        }

        let raw_secret = secret::generate_secret(secret::REFRESH_SECRET_LENGTH);
        let now = Utc::now();

        let token = RefreshToken {
            id: self.ids.next_id(),
            account_id: account.id,
            secret_hash: self.hasher.hash(&raw_secret)?,
            description: String::new(),
            created_at: now,
        };
        self.refresh_tokens.upsert(&token).await?;

        info!(account_id = %account.id, token_id = %token.id, "Issued refresh token");

        Ok(IssuedRefreshToken {
            account_id: account.id,
            token_id: token.id,
            secret: raw_secret,
            expires_at: now + self.refresh_lifetime,
        })
    }

    /// Exchange a refresh token cookie for a short-lived access token.
    ///
    /// Walks all refresh tokens of the account named in the cookie,
    /// skipping expired rows before the expensive hash verification. A row
    /// vanishing between list and verify is a benign race, treated the same
    /// as a row that never existed.
    pub async fn exchange_access_token(&self, cookie_value: &str) -> AppResult<AccessTokenGrant> {
        let (account_id, raw_secret) =
            cookie::decode_cookie_value(cookie_value).ok_or_else(Self::unauthorized)?;

        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(Self::unauthorized)?;

        let tokens = self.refresh_tokens.list_by_account(account_id).await?;
        let now = Utc::now();

        let mut matched = false;
        for token in &tokens {
            if token.is_expired(self.refresh_lifetime, now) {
                continue;
            }
            if self.hasher.verify(&raw_secret, &token.secret_hash)? {
                matched = true;
                break;
            }
        }
        if !matched {
            return Err(Self::unauthorized());
        }

        self.codec.issue(&account)
    }

    /// List an account's refresh tokens with pagination.
    pub async fn list_tokens(
        &self,
        account_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<RefreshToken>> {
        self.refresh_tokens.list_page(account_id, page).await
    }

    /// Look up one refresh token of an account.
    pub async fn get_token(&self, account_id: Uuid, token_id: Uuid) -> AppResult<RefreshToken> {
        self.refresh_tokens
            .find(account_id, token_id)
            .await?
            .ok_or_else(|| AppError::not_found("refresh token not found"))
    }

    /// Update the free-form description of a refresh token.
    pub async fn update_description(
        &self,
        account_id: Uuid,
        token_id: Uuid,
        description: &str,
    ) -> AppResult<()> {
        let updated = self
            .refresh_tokens
            .update_description(account_id, token_id, description)
            .await?;

        if !updated {
            return Err(AppError::not_found("refresh token not found"));
        }
        Ok(())
    }

    /// Revoke one refresh token. Revoking an already-absent token is not an
    /// error.
    pub async fn revoke(&self, account_id: Uuid, token_id: Uuid) -> AppResult<()> {
        let deleted = self.refresh_tokens.delete(account_id, token_id).await?;
        if deleted {
            info!(account_id = %account_id, token_id = %token_id, "Revoked refresh token");
        }
        Ok(())
    }

    /// Revoke every refresh token of an account. Returns the count removed.
    pub async fn revoke_all(&self, account_id: Uuid) -> AppResult<u64> {
        let revoked = self.refresh_tokens.delete_all_for_account(account_id).await?;
        info!(account_id = %account_id, revoked, "Revoked all refresh tokens");
        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postbox_core::error::ErrorKind;
    use postbox_entity::account::Account;

    use crate::session::testing::{MemoryAccountStore, MemoryRefreshTokenStore};

    const REFRESH_LIFETIME_SECONDS: u64 = 7 * 24 * 60 * 60;
    const ACCESS_LIFETIME_SECONDS: u64 = 900;

    struct Fixture {
        service: SessionService,
        accounts: Arc<MemoryAccountStore>,
        refresh_tokens: Arc<MemoryRefreshTokenStore>,
        hasher: Arc<PasswordHasher>,
        codec: Arc<AccessTokenCodec>,
    }

    impl Fixture {
        fn new() -> Self {
            let accounts = Arc::new(MemoryAccountStore::default());
            let refresh_tokens = Arc::new(MemoryRefreshTokenStore::default());
            let hasher = Arc::new(PasswordHasher::new());
            let codec = Arc::new(AccessTokenCodec::new(
                b"test-signing-secret",
                ACCESS_LIFETIME_SECONDS,
            ));

            let service = SessionService::new(
                accounts.clone(),
                refresh_tokens.clone(),
                hasher.clone(),
                codec.clone(),
                IdGenerator::new(),
                REFRESH_LIFETIME_SECONDS,
            );

            Self {
                service,
                accounts,
                refresh_tokens,
                hasher,
                codec,
            }
        }

        async fn create_account(&self, username: &str, password: &str, admin: bool) -> Account {
            let account = Account {
                id: Uuid::new_v4(),
                username: username.to_string(),
                password_hash: self.hasher.hash(password).unwrap(),
                admin,
                created_at: Utc::now(),
            };
            self.accounts.upsert(&account).await.unwrap();
            account
        }
    }

    #[tokio::test]
    async fn login_persists_hash_of_issued_secret() {
        let fx = Fixture::new();
        let account = fx.create_account("alice", "correct horse", false).await;

        let issued = fx.service.login("alice", "correct horse").await.unwrap();
        assert_eq!(issued.account_id, account.id);

        let rows = fx.refresh_tokens.list_by_account(account.id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, issued.token_id);
        assert!(fx.hasher.verify(&issued.secret, &rows[0].secret_hash).unwrap());
        // The raw secret itself is never stored.
        assert_ne!(rows[0].secret_hash, issued.secret);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let fx = Fixture::new();
        fx.create_account("alice", "correct horse", false).await;

        let bad_password = fx.service.login("alice", "wrong").await.unwrap_err();
        let bad_username = fx.service.login("bob", "correct horse").await.unwrap_err();

        assert_eq!(bad_password.kind, ErrorKind::Unauthorized);
        assert_eq!(bad_username.kind, ErrorKind::Unauthorized);
        assert_eq!(bad_password.message, bad_username.message);
    }

    #[tokio::test]
    async fn exchange_returns_valid_access_token() {
        let fx = Fixture::new();
        let account = fx.create_account("alice", "correct horse", true).await;

        let issued = fx.service.login("alice", "correct horse").await.unwrap();
        let grant = fx
            .service
            .exchange_access_token(&issued.cookie_value())
            .await
            .unwrap();

        let claims = fx.codec.verify(&grant.access_token).unwrap();
        assert_eq!(claims.sub, account.id);
        assert!(claims.admin);

        let now = Utc::now().timestamp();
        assert!(grant.expires_at > now);
        assert!(grant.expires_at <= now + ACCESS_LIFETIME_SECONDS as i64);
    }

    #[tokio::test]
    async fn wrong_secret_and_unknown_account_fail_identically() {
        let fx = Fixture::new();
        let account = fx.create_account("alice", "correct horse", false).await;
        fx.service.login("alice", "correct horse").await.unwrap();

        let wrong_secret = cookie::encode_cookie_value(account.id, "not the secret");
        let unknown_account = cookie::encode_cookie_value(Uuid::new_v4(), "not the secret");

        let a = fx
            .service
            .exchange_access_token(&wrong_secret)
            .await
            .unwrap_err();
        let b = fx
            .service
            .exchange_access_token(&unknown_account)
            .await
            .unwrap_err();

        assert_eq!(a.kind, ErrorKind::Unauthorized);
        assert_eq!(b.kind, ErrorKind::Unauthorized);
        assert_eq!(a.message, b.message);
    }

    #[tokio::test]
    async fn malformed_cookies_are_rejected() {
        let fx = Fixture::new();

        for value in ["", "!!!not-base64!!!", "bm8tc2VwYXJhdG9y"] {
            let err = fx.service.exchange_access_token(value).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Unauthorized);
        }
    }

    #[tokio::test]
    async fn expired_token_is_rejected_before_any_sweep() {
        let fx = Fixture::new();
        let account = fx.create_account("alice", "correct horse", false).await;

        // A row one second past its lifetime, still present in the store.
        let raw_secret = "stale-but-well-known-secret";
        let stale = RefreshToken {
            id: Uuid::new_v4(),
            account_id: account.id,
            secret_hash: fx.hasher.hash(raw_secret).unwrap(),
            description: String::new(),
            created_at: Utc::now()
                - Duration::seconds(REFRESH_LIFETIME_SECONDS as i64)
                - Duration::seconds(1),
        };
        fx.refresh_tokens.upsert(&stale).await.unwrap();

        let value = cookie::encode_cookie_value(account.id, raw_secret);
        let err = fx.service.exchange_access_token(&value).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn revoke_all_invalidates_every_outstanding_cookie() {
        let fx = Fixture::new();
        let account = fx.create_account("alice", "correct horse", false).await;

        let first = fx.service.login("alice", "correct horse").await.unwrap();
        let second = fx.service.login("alice", "correct horse").await.unwrap();

        let revoked = fx.service.revoke_all(account.id).await.unwrap();
        assert_eq!(revoked, 2);

        let rows = fx.refresh_tokens.list_by_account(account.id).await.unwrap();
        assert!(rows.is_empty());

        for issued in [first, second] {
            let err = fx
                .service
                .exchange_access_token(&issued.cookie_value())
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Unauthorized);
        }
    }

    #[tokio::test]
    async fn revoke_is_idempotent() {
        let fx = Fixture::new();
        let account = fx.create_account("alice", "correct horse", false).await;
        let issued = fx.service.login("alice", "correct horse").await.unwrap();

        fx.service.revoke(account.id, issued.token_id).await.unwrap();
        // Second revocation of the same token is not an error.
        fx.service.revoke(account.id, issued.token_id).await.unwrap();
    }

    #[tokio::test]
    async fn update_description_requires_existing_token() {
        let fx = Fixture::new();
        let account = fx.create_account("alice", "correct horse", false).await;
        let issued = fx.service.login("alice", "correct horse").await.unwrap();

        fx.service
            .update_description(account.id, issued.token_id, "laptop browser")
            .await
            .unwrap();

        let token = fx.service.get_token(account.id, issued.token_id).await.unwrap();
        assert_eq!(token.description, "laptop browser");

        let err = fx
            .service
            .update_description(account.id, Uuid::new_v4(), "nope")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
