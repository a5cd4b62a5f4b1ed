//! Argon2id password hashing.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("stored password digest is malformed: {0}")]
    MalformedDigest(String),
}

fn salt() -> Result<SaltString, PasswordError> {
    let mut bytes = [0u8; 16];
    rand::rng().fill(&mut bytes);
    SaltString::encode_b64(&bytes).map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Hash a plaintext password into a PHC string (`$argon2id$v=19$...`).
///
/// Uses the argon2 crate's default cost parameters.
pub fn hash(password: &str) -> Result<String, PasswordError> {
    let salt = salt()?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Check a plaintext password against a stored digest.
///
/// `Ok(false)` on mismatch; `Err` only when `digest` is not a PHC string.
pub fn verify(password: &str, digest: &str) -> Result<bool, PasswordError> {
    let parsed =
        PasswordHash::new(digest).map_err(|e| PasswordError::MalformedDigest(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn digest_is_salted_phc_string() {
        let a = hash("secret123").unwrap();
        let b = hash("secret123").unwrap();
        assert!(a.starts_with("$argon2id$"));
        assert_ne!(a, "secret123");
        assert_ne!(a, b, "two hashes of the same password must differ by salt");
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let digest = hash("secret123").unwrap();
        assert_eq!(verify("secret124", &digest), Ok(false));
    }

    #[test]
    fn malformed_digest_is_error() {
        assert!(matches!(
            verify("secret123", "not-a-phc-string"),
            Err(PasswordError::MalformedDigest(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(4))]

        #[test]
        fn hash_then_verify_round_trips(password in ".{0,40}", other in ".{0,40}") {
            let digest = hash(&password).unwrap();
            prop_assert_eq!(verify(&password, &digest), Ok(true));
            if other != password {
                prop_assert_eq!(verify(&other, &digest), Ok(false));
            }
        }
    }
}
