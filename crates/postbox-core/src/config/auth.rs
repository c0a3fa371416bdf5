//! Authentication and token lifetime configuration.

use serde::{Deserialize, Serialize};

/// Credential and token lifetime configuration.
///
/// Lifetimes default to the values the service has always shipped with:
/// seven days for refresh tokens and fifteen minutes for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Symmetric secret for access token signing (HMAC-SHA256).
    ///
    /// When unset, a random secret is generated at startup. Operators must
    /// pin this value to keep sessions valid across restarts.
    #[serde(default)]
    pub signing_secret: Option<String>,
    /// Refresh token lifetime in seconds.
    #[serde(default = "default_refresh_lifetime")]
    pub refresh_token_lifetime_seconds: u64,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_lifetime")]
    pub access_token_lifetime_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_secret: None,
            refresh_token_lifetime_seconds: default_refresh_lifetime(),
            access_token_lifetime_seconds: default_access_lifetime(),
        }
    }
}

fn default_refresh_lifetime() -> u64 {
    7 * 24 * 60 * 60
}

fn default_access_lifetime() -> u64 {
    15 * 60
}
