//! High-entropy random secret generation.

use rand::Rng;

/// Characters allowed in generated secrets.
const SECRET_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789+*#-_.,";

/// Length of refresh token secrets.
pub const REFRESH_SECRET_LENGTH: usize = 64;

/// Generate a random secret of the given length.
pub fn generate_secret(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| SECRET_CHARSET[rng.random_range(0..SECRET_CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(generate_secret(REFRESH_SECRET_LENGTH).len(), 64);
        assert_eq!(generate_secret(0).len(), 0);
    }

    #[test]
    fn only_uses_allowed_characters() {
        let secret = generate_secret(256);
        assert!(secret.bytes().all(|b| SECRET_CHARSET.contains(&b)));
    }

    #[test]
    fn secrets_differ() {
        assert_ne!(generate_secret(64), generate_secret(64));
    }
}
