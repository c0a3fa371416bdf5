//! # postbox-database
//!
//! PostgreSQL connection management and the concrete [`AccountStore`] and
//! [`RefreshTokenStore`] implementations.
//!
//! [`AccountStore`]: postbox_entity::AccountStore
//! [`RefreshTokenStore`]: postbox_entity::RefreshTokenStore

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
