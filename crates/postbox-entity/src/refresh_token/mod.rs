//! Refresh token entity and storage interface.

pub mod model;
pub mod store;

pub use model::RefreshToken;
pub use store::RefreshTokenStore;
