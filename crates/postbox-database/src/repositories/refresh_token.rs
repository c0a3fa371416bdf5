//! Refresh token repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use postbox_core::error::{AppError, ErrorKind};
use postbox_core::result::AppResult;
use postbox_core::types::pagination::{PageRequest, PageResponse};
use postbox_entity::refresh_token::{RefreshToken, RefreshTokenStore};

/// PostgreSQL-backed [`RefreshTokenStore`].
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for RefreshTokenRepository {
    async fn upsert(&self, token: &RefreshToken) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO refresh_tokens (id, account_id, secret_hash, description, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id, account_id) DO UPDATE \
                 SET secret_hash = excluded.secret_hash, \
                     description = excluded.description, \
                     created_at = excluded.created_at",
        )
        .bind(token.id)
        .bind(token.account_id)
        .bind(&token.secret_hash)
        .bind(&token.description)
        .bind(token.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert refresh token", e)
        })?;

        Ok(())
    }

    async fn find(&self, account_id: Uuid, id: Uuid) -> AppResult<Option<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>(
            "SELECT id, account_id, secret_hash, description, created_at FROM refresh_tokens \
             WHERE id = $1 AND account_id = $2",
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find refresh token", e))
    }

    async fn list_by_account(&self, account_id: Uuid) -> AppResult<Vec<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>(
            "SELECT id, account_id, secret_hash, description, created_at FROM refresh_tokens \
             WHERE account_id = $1 ORDER BY created_at",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list refresh tokens", e))
    }

    async fn list_page(
        &self,
        account_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<RefreshToken>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM refresh_tokens WHERE account_id = $1")
                .bind(account_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count refresh tokens", e)
                })?;

        let tokens = sqlx::query_as::<_, RefreshToken>(
            "SELECT id, account_id, secret_hash, description, created_at FROM refresh_tokens \
             WHERE account_id = $1 ORDER BY created_at LIMIT $2 OFFSET $3",
        )
        .bind(account_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list refresh tokens", e)
        })?;

        Ok(PageResponse::new(
            tokens,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn update_description(
        &self,
        account_id: Uuid,
        id: Uuid,
        description: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET description = $3 WHERE id = $1 AND account_id = $2",
        )
        .bind(id)
        .bind(account_id)
        .bind(description)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update refresh token", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete refresh token", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_for_account(&self, account_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE account_id = $1")
            .bind(account_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete refresh tokens", e)
            })?;

        Ok(result.rows_affected())
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to delete expired refresh tokens",
                    e,
                )
            })?;

        Ok(result.rows_affected())
    }
}
