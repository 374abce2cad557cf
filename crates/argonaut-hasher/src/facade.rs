//! The password hashing facade.
//!
//! [`Argon2Hasher`] holds an immutable [`Argon2Options`] and drives the
//! primitive. It keeps no other state between calls, so a single instance
//! can be shared across threads. Admission control for memory-heavy
//! parallel hashing is left to the caller.

use crate::error::{HashError, Result};
use crate::primitive::{Argon2Primitive, PrimitiveErrorCode, RustCryptoArgon2};
use crate::salt::{default_salt_len, OsSaltSource, SaltError, SaltSource};
use argonaut_core::{Argon2Options, HasherConfig};
use argonaut_encoding::{encoded_len, strip_filler};
use std::fmt;
use zeroize::Zeroizing;

/// Raw Argon2 output, wiped from memory on drop.
#[derive(Clone)]
pub struct RawHash(Zeroizing<Vec<u8>>);

impl RawHash {
    /// The hash bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the hash is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for RawHash {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for RawHash {}

impl fmt::Debug for RawHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawHash([REDACTED; {} bytes])", self.len())
    }
}

/// Result of a successful hash: the raw bytes and the encoded string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashOutput {
    raw: RawHash,
    encoded: String,
}

impl HashOutput {
    /// Raw hash bytes.
    #[must_use]
    pub fn raw(&self) -> &RawHash {
        &self.raw
    }

    /// Canonical `$argon2...` string, suitable for storage.
    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Split into raw hash and encoded string.
    #[must_use]
    pub fn into_parts(self) -> (RawHash, String) {
        (self.raw, self.encoded)
    }
}

/// Argon2 password hasher.
///
/// # Example
///
/// ```no_run
/// use argonaut_hasher::Argon2Hasher;
///
/// # fn main() -> Result<(), argonaut_hasher::HashError> {
/// let hasher: Argon2Hasher = Argon2Hasher::default();
/// let output = hasher.hash_str("correct horse battery staple")?;
/// assert!(hasher.verify_str(output.encoded(), "correct horse battery staple")?);
/// assert!(!hasher.verify_str(output.encoded(), "wrong")?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Argon2Hasher<P = RustCryptoArgon2, S = OsSaltSource> {
    options: Argon2Options,
    primitive: P,
    salt_source: S,
}

impl Argon2Hasher {
    /// Create a hasher backed by RustCrypto `argon2` and the OS CSPRNG.
    #[must_use]
    pub fn new(options: Argon2Options) -> Self {
        Self::with_components(options, RustCryptoArgon2, OsSaltSource)
    }

    /// Create a hasher from file or environment configuration.
    ///
    /// # Errors
    /// Returns `HashError::Configuration` if the configuration is invalid.
    pub fn from_config(config: &HasherConfig) -> Result<Self> {
        Ok(Self::new(config.to_options()?))
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new(Argon2Options::default())
    }
}

impl<P: Argon2Primitive, S: SaltSource> Argon2Hasher<P, S> {
    /// Create a hasher with an explicit primitive and salt source.
    pub fn with_components(options: Argon2Options, primitive: P, salt_source: S) -> Self {
        Self {
            options,
            primitive,
            salt_source,
        }
    }

    /// The options every call runs under.
    #[must_use]
    pub fn options(&self) -> &Argon2Options {
        &self.options
    }

    /// Hash `password` under a freshly generated salt.
    ///
    /// The salt is `max(min_salt_length, password.len())` bytes long.
    pub fn hash(&self, password: &[u8]) -> Result<HashOutput> {
        let salt_len = default_salt_len(&self.options, password.len());
        let salt = self.salt_source.generate(salt_len)?;
        if salt.len() != salt_len {
            return Err(SaltError::ShortRead {
                expected: salt_len,
                got: salt.len(),
            }
            .into());
        }
        self.hash_with_salt(password, &salt)
    }

    /// Hash `password` under a caller-supplied salt.
    ///
    /// Deterministic: identical inputs give identical output.
    pub fn hash_with_salt(&self, password: &[u8], salt: &[u8]) -> Result<HashOutput> {
        let mut raw = Zeroizing::new(vec![0u8; self.options.hash_length()]);
        let mut buffer = vec![0u8; encoded_len(&self.options, salt.len())];

        tracing::debug!(
            "Deriving {} hash (m={}, t={}, p={}, salt {} bytes)",
            self.options.variant(),
            self.options.memory_cost(),
            self.options.time_cost(),
            self.options.parallelism(),
            salt.len()
        );

        self.primitive
            .derive(&self.options, password, salt, raw.as_mut_slice(), &mut buffer)
            .map_err(|code| {
                tracing::warn!("Argon2 derivation failed: {code}");
                HashError::from(code)
            })?;

        let encoded = strip_filler(&buffer).map_err(|e| {
            tracing::warn!("Primitive produced a corrupted encoding: {e}");
            HashError::from(e)
        })?;

        Ok(HashOutput {
            raw: RawHash(raw),
            encoded,
        })
    }

    /// Check `password` against a stored encoded string.
    ///
    /// Returns `Ok(false)` for a wrong password. Any other primitive failure,
    /// including a malformed string or a variant that differs from this
    /// hasher's, is an error.
    pub fn verify(&self, encoded: &str, password: &[u8]) -> Result<bool> {
        match self
            .primitive
            .verify(encoded.as_bytes(), password, self.options.variant())
        {
            Ok(()) => Ok(true),
            Err(PrimitiveErrorCode::VerifyMismatch) => {
                tracing::debug!("Password does not match stored hash");
                Ok(false)
            }
            Err(code) => {
                tracing::warn!("Argon2 verification failed: {code}");
                Err(HashError::from(code))
            }
        }
    }

    /// [`Argon2Hasher::hash`] over the UTF-8 bytes of `password`.
    pub fn hash_str(&self, password: &str) -> Result<HashOutput> {
        self.hash(password.as_bytes())
    }

    /// [`Argon2Hasher::hash_with_salt`] over the UTF-8 bytes of `password`.
    pub fn hash_str_with_salt(&self, password: &str, salt: &[u8]) -> Result<HashOutput> {
        self.hash_with_salt(password.as_bytes(), salt)
    }

    /// [`Argon2Hasher::verify`] over the UTF-8 bytes of `password`.
    pub fn verify_str(&self, encoded: &str, password: &str) -> Result<bool> {
        self.verify(encoded, password.as_bytes())
    }
}
