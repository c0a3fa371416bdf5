//! HTTP request handlers, grouped by resource.

pub mod account;
pub mod auth;
pub mod health;
pub mod info;
pub mod refresh_token;
