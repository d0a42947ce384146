//! One-way password digests.
//!
//! Digests are Argon2id in PHC string format, so the salt and parameters
//! travel with the hash and [`verify_password`] needs nothing else.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash `password` with a fresh random salt.
///
/// This is CPU-bound; call it from `spawn_blocking` inside async code.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;
    Ok(digest.to_string())
}

/// Check `password` against a digest produced by [`hash_password`].
///
/// A mismatch is `Ok(false)`. A digest that cannot be parsed is an error.
pub fn verify_password(password: &str, digest: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(digest).map_err(|e| anyhow!("Stored password digest is invalid: {}", e))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("Failed to verify password: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_verifies_against_original_password() {
        let digest = hash_password("examplePass").unwrap();
        assert!(verify_password("examplePass", &digest).unwrap());
    }

    #[test]
    fn digest_rejects_other_passwords() {
        let digest = hash_password("examplePass").unwrap();
        assert!(!verify_password("examplePass ", &digest).unwrap());
        assert!(!verify_password("", &digest).unwrap());
        assert!(!verify_password("somethingElse", &digest).unwrap());
    }

    #[test]
    fn digest_never_contains_plaintext() {
        let digest = hash_password("examplePass").unwrap();
        assert!(!digest.contains("examplePass"));
        assert!(digest.starts_with("$argon2"));
    }

    #[test]
    fn same_password_gets_different_salts() {
        let a = hash_password("examplePass").unwrap();
        let b = hash_password("examplePass").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_digest_is_an_error() {
        assert!(verify_password("examplePass", "not-a-digest").is_err());
    }
}
