//! Concrete PostgreSQL store implementations.

pub mod account;
pub mod refresh_token;

pub use account::AccountRepository;
pub use refresh_token::RefreshTokenRepository;
