//! Signs and verifies short-lived bearer credentials.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use postbox_core::error::AppError;
use postbox_entity::account::Account;

use super::claims::AccessClaims;

/// A freshly signed access token together with its expiry.
#[derive(Debug, Clone)]
pub struct AccessTokenGrant {
    /// The signed bearer token.
    pub access_token: String,
    /// Expiration timestamp (seconds since epoch).
    pub expires_at: i64,
}

/// Signs and verifies access tokens with a single symmetric secret.
///
/// The secret is configured once at process start; the codec is stateless
/// and safe to share between any number of concurrent callers. Verification
/// checks signature integrity and expiry only — no store lookup, no
/// server-side revocation check. Callers needing stronger guarantees keep
/// the access lifetime short.
#[derive(Clone)]
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl std::fmt::Debug for AccessTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenCodec")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

impl AccessTokenCodec {
    /// Create a new codec from the signing secret and access token lifetime.
    pub fn new(secret: &[u8], lifetime_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            lifetime: Duration::seconds(lifetime_seconds as i64),
        }
    }

    /// Sign a new access token for the given account.
    pub fn issue(&self, account: &Account) -> Result<AccessTokenGrant, AppError> {
        let now = Utc::now();
        let expires_at = now + self.lifetime;

        let claims = AccessClaims {
            sub: account.id,
            admin: account.admin,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign access token: {e}")))?;

        Ok(AccessTokenGrant {
            access_token,
            expires_at: expires_at.timestamp(),
        })
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// Every failure mode collapses into one generic unauthorized error.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, AppError> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::unauthorized("invalid credentials"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postbox_core::error::ErrorKind;
    use uuid::Uuid;

    fn account(admin: bool) -> Account {
        Account {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: String::new(),
            admin,
            created_at: Utc::now(),
        }
    }

    fn codec() -> AccessTokenCodec {
        AccessTokenCodec::new(b"test-signing-secret", 900)
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let codec = codec();
        let account = account(true);

        let grant = codec.issue(&account).unwrap();
        let claims = codec.verify(&grant.access_token).unwrap();

        assert_eq!(claims.sub, account.id);
        assert!(claims.admin);
        assert_eq!(claims.exp, grant.expires_at);
        assert!(claims.iat <= Utc::now().timestamp());
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let codec = codec();
        let grant = codec.issue(&account(false)).unwrap();

        // Flip one byte of the signature.
        let mut token = grant.access_token;
        let last = token.pop().unwrap();
        token.push(if last == 'A' { 'B' } else { 'A' });

        let err = codec.verify(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let grant = AccessTokenCodec::new(b"other-secret", 900)
            .issue(&account(false))
            .unwrap();

        assert!(codec().verify(&grant.access_token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: Uuid::new_v4(),
            admin: false,
            iat: now - 1000,
            exp: now - 100,
        };
        let token = encode(&Header::default(), &claims, &codec.encoding_key).unwrap();

        let err = codec.verify(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(codec().verify("not.a.token").is_err());
        assert!(codec().verify("").is_err());
    }
}
