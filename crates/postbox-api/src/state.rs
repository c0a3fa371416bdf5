//! Application state shared across all handlers.

use std::sync::Arc;

use postbox_auth::password::PasswordHasher;
use postbox_auth::session::SessionService;
use postbox_auth::token::AccessTokenCodec;
use postbox_core::config::AppConfig;
use postbox_core::types::id::IdGenerator;
use postbox_database::connection::DatabasePool;
use postbox_entity::account::AccountStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool wrapper.
    pub db: Arc<DatabasePool>,
    /// Account store.
    pub accounts: Arc<dyn AccountStore>,
    /// Session lifecycle service.
    pub sessions: Arc<SessionService>,
    /// Access token codec.
    pub codec: Arc<AccessTokenCodec>,
    /// Password hasher.
    pub hasher: Arc<PasswordHasher>,
    /// ID generator.
    pub ids: IdGenerator,
}
