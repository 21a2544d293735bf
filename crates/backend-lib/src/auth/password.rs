// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Params, Scrypt,
};

use crate::error::AppError;

/// Salted one-way password hashing with a tunable work factor.
///
/// The encoded output is a PHC string carrying the salt and the scrypt
/// parameters, so verification is self-describing: raising the configured
/// work factor later leaves hashes created under a lower factor verifiable.
#[derive(Clone, Copy, Debug)]
pub struct PasswordHasher {
    params: Params,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { params: Params::default() }
    }
}

impl PasswordHasher {
    /// Hasher with the given work factor (log2 of the scrypt CPU/memory
    /// cost); block size and parallelism stay at the recommendations.
    pub fn new(log_n: u8) -> Result<Self, AppError> {
        let params = Params::new(
            log_n,
            Params::RECOMMENDED_R,
            Params::RECOMMENDED_P,
            Params::RECOMMENDED_LEN,
        )
        .map_err(|e| AppError::Hashing(format!("invalid work factor {log_n}: {e}")))?;
        Ok(Self { params })
    }

    /// Hash a password with a fresh random salt.
    ///
    /// Two calls on the same input produce different encodings. Fails only
    /// on catastrophic primitive failure.
    pub fn hash(&self, plain: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password_customized(plain.as_bytes(), None, None, self.params, &salt)
            .map_err(|e| AppError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verify a candidate password against a stored hash.
    ///
    /// Recomputes with the salt and parameters embedded in `stored` and
    /// compares in constant time. A mismatch is `Ok(false)`; only a stored
    /// value this component never produced is an error.
    pub fn verify(&self, candidate: &str, stored: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| AppError::Hashing(format!("malformed stored hash: {e}")))?;

        match Scrypt.verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(scrypt::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::Hashing(e.to_string())),
        }
    }
}
