//! Error types for hashing and verification.
//!
//! A wrong password is not an error: `verify` returns `Ok(false)`. Every
//! variant here means the hasher could not produce an answer at all.

use crate::primitive::PrimitiveErrorCode;
use crate::salt::SaltError;
use argonaut_core::ConfigError;
use argonaut_encoding::EncodingError;
use thiserror::Error;

/// Errors that can occur during hash or verify operations.
#[derive(Debug, Error)]
pub enum HashError {
    /// Options could not be built from configuration.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The Argon2 primitive reported a failure other than a mismatch.
    #[error("argon2 primitive failed: {code}")]
    Primitive {
        /// Reference-library error code
        code: PrimitiveErrorCode,
    },

    /// The primitive's encoded output did not survive cleanup.
    #[error("encoded hash is corrupted: {0}")]
    EncodingCorruption(#[from] EncodingError),

    /// No salt could be generated.
    #[error("salt generation failed: {0}")]
    SaltGeneration(#[from] SaltError),
}

impl HashError {
    /// The primitive error code, if this failure came from the primitive.
    #[must_use]
    pub fn primitive_code(&self) -> Option<PrimitiveErrorCode> {
        match self {
            Self::Primitive { code } => Some(*code),
            _ => None,
        }
    }
}

impl From<PrimitiveErrorCode> for HashError {
    fn from(code: PrimitiveErrorCode) -> Self {
        Self::Primitive { code }
    }
}

/// Result type for hasher operations.
pub type Result<T> = std::result::Result<T, HashError>;
