//! Session lifecycle: login, refresh-to-access exchange, revocation, and
//! the background expiry sweeper.

pub mod cookie;
pub mod secret;
pub mod service;
pub mod sweeper;

#[cfg(test)]
pub(crate) mod testing;

pub use service::SessionService;
pub use sweeper::RefreshTokenSweeper;
