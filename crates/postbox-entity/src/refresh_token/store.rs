//! Refresh token storage capability interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use postbox_core::result::AppResult;
use postbox_core::types::pagination::{PageRequest, PageResponse};

use super::model::RefreshToken;

/// Keeps track of account refresh tokens.
///
/// Concurrent reads for one account must tolerate the sweeper deleting rows
/// for the same or other accounts; a row vanishing between list and verify
/// is treated the same as a row that never existed.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + 'static {
    /// Persist a new refresh token, replacing any row with the same ID.
    async fn upsert(&self, token: &RefreshToken) -> AppResult<()>;

    /// Look up one token of one account.
    async fn find(&self, account_id: Uuid, id: Uuid) -> AppResult<Option<RefreshToken>>;

    /// List every token belonging to an account, oldest first.
    async fn list_by_account(&self, account_id: Uuid) -> AppResult<Vec<RefreshToken>>;

    /// List an account's tokens with pagination, oldest first.
    async fn list_page(
        &self,
        account_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<RefreshToken>>;

    /// Update a token's description. Returns `false` if no such token exists.
    async fn update_description(
        &self,
        account_id: Uuid,
        id: Uuid,
        description: &str,
    ) -> AppResult<bool>;

    /// Delete one token. Returns `true` if a row was removed.
    async fn delete(&self, account_id: Uuid, id: Uuid) -> AppResult<bool>;

    /// Delete every token belonging to an account. Returns the count removed.
    async fn delete_all_for_account(&self, account_id: Uuid) -> AppResult<u64>;

    /// Delete, atomically and across all accounts, every token created
    /// before the cutoff. Returns the count removed.
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}
