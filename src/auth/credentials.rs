//! Password hashing and verification
//!
//! Credentials are hashed with Argon2id via the password-hash API. The
//! ledger core never sees plaintext passwords beyond these two functions.

use crate::types::LedgerError;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

/// Hash a password using Argon2id with a fresh random salt
///
/// Returns the PHC-formatted hash string (salt embedded).
///
/// # Errors
///
/// Returns `HashingFailed` if the hasher rejects the input.
pub fn hash_password(password: &str) -> Result<String, LedgerError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| LedgerError::hashing_failed(e.to_string()))
}

/// Verify a password against a stored PHC hash
///
/// A malformed stored hash verifies as false rather than erroring; callers
/// treat both the same way (credential mismatch).
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
