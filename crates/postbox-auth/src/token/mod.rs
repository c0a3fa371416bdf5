//! Access token signing and verification.

pub mod claims;
pub mod codec;

pub use claims::AccessClaims;
pub use codec::{AccessTokenCodec, AccessTokenGrant};
