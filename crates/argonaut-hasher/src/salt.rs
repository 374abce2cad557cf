//! Salt generation.
//!
//! When the caller supplies no salt, the hasher draws
//! `max(min_salt_length, password_len)` bytes, so long passwords get
//! proportionally long salts. Hashes already stored under this rule depend
//! on it; do not replace it with a fixed length.

use argonaut_core::Argon2Options;
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;
use zeroize::Zeroizing;

/// Errors from a salt source.
#[derive(Debug, Error)]
pub enum SaltError {
    /// The entropy source failed.
    #[error("entropy source unavailable: {0}")]
    Unavailable(#[from] rand::Error),

    /// The source returned fewer bytes than requested.
    #[error("salt source returned {got} bytes, expected {expected}")]
    ShortRead {
        /// Requested length
        expected: usize,
        /// Returned length
        got: usize,
    },
}

/// Source of cryptographically secure salt bytes.
pub trait SaltSource: Send + Sync {
    /// Produce exactly `len` random bytes.
    ///
    /// # Errors
    /// Fails if the entropy source is unavailable. Never retried.
    fn generate(&self, len: usize) -> Result<Zeroizing<Vec<u8>>, SaltError>;
}

/// Operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSaltSource;

impl SaltSource for OsSaltSource {
    fn generate(&self, len: usize) -> Result<Zeroizing<Vec<u8>>, SaltError> {
        let mut salt = Zeroizing::new(vec![0u8; len]);
        OsRng.try_fill_bytes(salt.as_mut_slice()).map_err(|e| {
            tracing::warn!("OS entropy source failed: {e}");
            SaltError::Unavailable(e)
        })?;
        Ok(salt)
    }
}

/// Length of an auto-generated salt for a password of `password_len` bytes.
#[must_use]
pub fn default_salt_len(options: &Argon2Options, password_len: usize) -> usize {
    options.min_salt_length().max(password_len)
}
