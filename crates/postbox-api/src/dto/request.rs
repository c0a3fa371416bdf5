//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create account request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAccountRequest {
    /// Username. Character set rules are checked separately.
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Whether the account gets admin rights.
    #[serde(default)]
    pub admin: bool,
}

/// Update account request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    /// New password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    /// New admin flag. Settable by admins only.
    pub admin: Option<bool>,
}

/// Update refresh token metadata request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRefreshTokenRequest {
    /// Free-form description, e.g. the device or client the token belongs to.
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: String,
}
