//! Axum extractors.

pub mod auth;
pub mod pagination;

pub use auth::AuthAccount;
pub use pagination::PaginationParams;
