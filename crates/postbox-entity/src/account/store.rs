//! Account storage capability interface.

use async_trait::async_trait;
use uuid::Uuid;

use postbox_core::result::AppResult;
use postbox_core::types::pagination::{PageRequest, PageResponse};

use super::model::Account;

/// Keeps track of user accounts.
///
/// Implemented by the PostgreSQL backend; tests substitute in-memory fakes.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Find an account by its ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Find an account by its (case-sensitive) username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// List accounts ordered by creation time.
    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<Account>>;

    /// Create or replace an account.
    async fn upsert(&self, account: &Account) -> AppResult<()>;

    /// Delete an account. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
