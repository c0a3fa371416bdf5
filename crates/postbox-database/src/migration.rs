//! Database schema migrations.

use sqlx::PgPool;
use tracing::info;

use postbox_core::error::{AppError, ErrorKind};

/// Apply any pending schema migrations, embedded at compile time from the
/// workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let migrator = sqlx::migrate!("../../migrations");

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
    })?;

    info!(
        known_migrations = migrator.iter().count(),
        "Database schema is up to date"
    );
    Ok(())
}
