//! Password hashing and verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AuthError;
use crate::Result;

/// Hashes a plaintext password with Argon2id and a fresh random salt.
///
/// The same plaintext yields a different digest on every call; the
/// digest alone cannot be reversed to the plaintext.
pub fn hash(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Crypto(e.to_string()))
}

/// Verifies a plaintext password against a stored digest.
///
/// Returns `false` for any mismatch, including a malformed digest;
/// never panics on well-formed inputs.
pub fn verify(plaintext: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let digest = hash("password123").unwrap();
        assert!(verify("password123", &digest));
        assert!(!verify("password124", &digest));
    }

    #[test]
    fn same_plaintext_yields_different_digests() {
        let a = hash("password123").unwrap();
        let b = hash("password123").unwrap();
        assert_ne!(a, b);
        assert!(verify("password123", &a));
        assert!(verify("password123", &b));
    }

    #[test]
    fn malformed_digest_is_a_mismatch_not_a_panic() {
        assert!(!verify("password123", "not-a-digest"));
        assert!(!verify("password123", ""));
    }
}
