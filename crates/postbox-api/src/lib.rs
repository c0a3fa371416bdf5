//! # postbox-api
//!
//! HTTP API layer for Postbox built on Axum.
//!
//! Provides the REST endpoints, extractors, DTOs, and error mapping for
//! the account and session subsystem.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
