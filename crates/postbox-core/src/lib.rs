//! # postbox-core
//!
//! Shared foundation for the Postbox service: the unified error type,
//! configuration schemas, pagination types, and the time-ordered ID
//! generator.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
