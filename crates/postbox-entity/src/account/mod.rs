//! Account entity and storage interface.

pub mod model;
pub mod store;

pub use model::Account;
pub use store::AccountStore;
