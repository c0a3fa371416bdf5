//! In-memory store fakes for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use postbox_core::result::AppResult;
use postbox_core::types::pagination::{PageRequest, PageResponse};
use postbox_entity::account::{Account, AccountStore};
use postbox_entity::refresh_token::{RefreshToken, RefreshTokenStore};

#[derive(Default)]
pub(crate) struct MemoryAccountStore {
    accounts: Mutex<HashMap<Uuid, Account>>,
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.accounts.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<Account>> {
        let mut all: Vec<Account> = self.accounts.lock().unwrap().values().cloned().collect();
        all.sort_by_key(|a| a.created_at);
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn upsert(&self, account: &Account) -> AppResult<()> {
        self.accounts
            .lock()
            .unwrap()
            .insert(account.id, account.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.accounts.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Default)]
pub(crate) struct MemoryRefreshTokenStore {
    tokens: Mutex<HashMap<(Uuid, Uuid), RefreshToken>>,
}

impl MemoryRefreshTokenStore {
    fn sorted_for_account(&self, account_id: Uuid) -> Vec<RefreshToken> {
        let mut tokens: Vec<RefreshToken> = self
            .tokens
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect();
        tokens.sort_by_key(|t| t.created_at);
        tokens
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn upsert(&self, token: &RefreshToken) -> AppResult<()> {
        self.tokens
            .lock()
            .unwrap()
            .insert((token.account_id, token.id), token.clone());
        Ok(())
    }

    async fn find(&self, account_id: Uuid, id: Uuid) -> AppResult<Option<RefreshToken>> {
        Ok(self.tokens.lock().unwrap().get(&(account_id, id)).cloned())
    }

    async fn list_by_account(&self, account_id: Uuid) -> AppResult<Vec<RefreshToken>> {
        Ok(self.sorted_for_account(account_id))
    }

    async fn list_page(
        &self,
        account_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<RefreshToken>> {
        let all = self.sorted_for_account(account_id);
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn update_description(
        &self,
        account_id: Uuid,
        id: Uuid,
        description: &str,
    ) -> AppResult<bool> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.get_mut(&(account_id, id)) {
            Some(token) => {
                token.description = description.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> AppResult<bool> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .remove(&(account_id, id))
            .is_some())
    }

    async fn delete_all_for_account(&self, account_id: Uuid) -> AppResult<u64> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|_, t| t.account_id != account_id);
        Ok((before - tokens.len()) as u64)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|_, t| t.created_at >= cutoff);
        Ok((before - tokens.len()) as u64)
    }
}
