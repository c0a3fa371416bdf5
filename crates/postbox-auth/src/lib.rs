//! # postbox-auth
//!
//! The credential and session lifecycle core of Postbox.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and verification
//! - `token` — access token signing and verification (HS256)
//! - `session` — login, refresh-to-access exchange, revocation, and the
//!   background expiry sweeper

pub mod password;
pub mod session;
pub mod token;

pub use password::PasswordHasher;
pub use session::{RefreshTokenSweeper, SessionService};
pub use token::{AccessClaims, AccessTokenCodec, AccessTokenGrant};
