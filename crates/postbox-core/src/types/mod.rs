//! Shared value types.

pub mod id;
pub mod pagination;

pub use id::IdGenerator;
pub use pagination::{PageRequest, PageResponse};
