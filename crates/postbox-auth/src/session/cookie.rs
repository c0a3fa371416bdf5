//! Refresh token cookie value encoding.
//!
//! The cookie value is the standard base64 encoding of the UTF-8 string
//! `"<accountID>:<rawSecret>"`. The raw secret never exists server-side
//! outside the login response and this decoding step.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

/// Name of the refresh token cookie.
pub const REFRESH_COOKIE_NAME: &str = "_refresh_token";

/// The only path the refresh token cookie is ever sent to.
pub const REFRESH_COOKIE_PATH: &str = "/v1/auth/access_token";

/// Encode an account ID and raw secret into a cookie value.
pub fn encode_cookie_value(account_id: Uuid, secret: &str) -> String {
    STANDARD.encode(format!("{account_id}:{secret}"))
}

/// Decode a cookie value back into an account ID and raw secret.
///
/// Returns `None` for any malformed input; the caller maps that to the same
/// generic unauthorized error as a wrong secret.
pub fn decode_cookie_value(value: &str) -> Option<(Uuid, String)> {
    let decoded = STANDARD.decode(value).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (account_id, secret) = decoded.split_once(':')?;
    let account_id = Uuid::parse_str(account_id).ok()?;
    Some((account_id, secret.to_string()))
}
