//! Password hashing with Argon2.

use anyhow::Result;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hashes `password` with a fresh random salt, returning a PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    // ---
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Checks `password` against a stored PHC string.
///
/// An unparseable stored hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    // ---
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            tracing::warn!("Stored password hash is unreadable: {}", err);
            false
        }
    }
}
