//! # postbox-entity
//!
//! Domain entity models for the Postbox service. Each entity module also
//! defines the capability interface its storage backend must implement, so
//! services depend on `Arc<dyn Store>` rather than a concrete database.

pub mod account;
pub mod refresh_token;

pub use account::{Account, AccountStore};
pub use refresh_token::{RefreshToken, RefreshTokenStore};
