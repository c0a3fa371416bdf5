//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Access token exchange response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    /// The signed bearer token.
    pub access_token: String,
    /// Expiration timestamp (seconds since epoch).
    pub expires: i64,
}

/// Bulk revocation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokedCountResponse {
    /// Number of refresh tokens removed.
    pub revoked: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Database connectivity.
    pub database: String,
}

/// Service info response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    /// Service version.
    pub version: String,
    /// Whether the service runs in production mode.
    pub production: bool,
}
