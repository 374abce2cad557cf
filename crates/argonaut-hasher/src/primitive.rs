//! The Argon2 primitive seam.
//!
//! [`Argon2Primitive`] is the raw derive/verify capability the hasher drives.
//! Failures are reported with the numeric codes of the reference Argon2
//! library so they stay meaningful to anyone reading logs from other
//! implementations. [`RustCryptoArgon2`] binds the trait to the RustCrypto
//! `argon2` crate.

use argon2::{Algorithm, Argon2, Block, Params};
use argonaut_core::{Argon2Options, Variant, Version};
use argonaut_encoding::{decode, encode};
use std::fmt;
use zeroize::Zeroizing;

/// Error codes of the reference Argon2 library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveErrorCode {
    /// Output is too short
    OutputTooShort,
    /// Output is too long
    OutputTooLong,
    /// Password is too long
    PwdTooLong,
    /// Salt is too short
    SaltTooShort,
    /// Salt is too long
    SaltTooLong,
    /// Associated data is too long
    AdTooLong,
    /// Secret is too long
    SecretTooLong,
    /// Time cost is too small
    TimeTooSmall,
    /// Memory cost is too small
    MemoryTooLittle,
    /// Memory cost is too large
    MemoryTooMuch,
    /// Too few lanes
    LanesTooFew,
    /// Too many lanes
    LanesTooMany,
    /// Memory allocation error
    MemoryAllocationError,
    /// The parameter combination is invalid
    IncorrectParameter,
    /// The variant is invalid
    IncorrectType,
    /// Too few threads
    ThreadsTooFew,
    /// Too many threads
    ThreadsTooMany,
    /// Encoding failed (usually an undersized buffer)
    EncodingFail,
    /// Decoding failed
    DecodingFail,
    /// Threading failure
    ThreadFail,
    /// The password does not match the supplied hash
    VerifyMismatch,
}

impl PrimitiveErrorCode {
    /// Numeric code.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::OutputTooShort => -2,
            Self::OutputTooLong => -3,
            Self::PwdTooLong => -5,
            Self::SaltTooShort => -6,
            Self::SaltTooLong => -7,
            Self::AdTooLong => -9,
            Self::SecretTooLong => -11,
            Self::TimeTooSmall => -12,
            Self::MemoryTooLittle => -14,
            Self::MemoryTooMuch => -15,
            Self::LanesTooFew => -16,
            Self::LanesTooMany => -17,
            Self::MemoryAllocationError => -22,
            Self::IncorrectParameter => -25,
            Self::IncorrectType => -26,
            Self::ThreadsTooFew => -28,
            Self::ThreadsTooMany => -29,
            Self::EncodingFail => -31,
            Self::DecodingFail => -32,
            Self::ThreadFail => -33,
            Self::VerifyMismatch => -35,
        }
    }

    /// Symbolic name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::OutputTooShort => "ARGON2_OUTPUT_TOO_SHORT",
            Self::OutputTooLong => "ARGON2_OUTPUT_TOO_LONG",
            Self::PwdTooLong => "ARGON2_PWD_TOO_LONG",
            Self::SaltTooShort => "ARGON2_SALT_TOO_SHORT",
            Self::SaltTooLong => "ARGON2_SALT_TOO_LONG",
            Self::AdTooLong => "ARGON2_AD_TOO_LONG",
            Self::SecretTooLong => "ARGON2_SECRET_TOO_LONG",
            Self::TimeTooSmall => "ARGON2_TIME_TOO_SMALL",
            Self::MemoryTooLittle => "ARGON2_MEMORY_TOO_LITTLE",
            Self::MemoryTooMuch => "ARGON2_MEMORY_TOO_MUCH",
            Self::LanesTooFew => "ARGON2_LANES_TOO_FEW",
            Self::LanesTooMany => "ARGON2_LANES_TOO_MANY",
            Self::MemoryAllocationError => "ARGON2_MEMORY_ALLOCATION_ERROR",
            Self::IncorrectParameter => "ARGON2_INCORRECT_PARAMETER",
            Self::IncorrectType => "ARGON2_INCORRECT_TYPE",
            Self::ThreadsTooFew => "ARGON2_THREADS_TOO_FEW",
            Self::ThreadsTooMany => "ARGON2_THREADS_TOO_MANY",
            Self::EncodingFail => "ARGON2_ENCODING_FAIL",
            Self::DecodingFail => "ARGON2_DECODING_FAIL",
            Self::ThreadFail => "ARGON2_THREAD_FAIL",
            Self::VerifyMismatch => "ARGON2_VERIFY_MISMATCH",
        }
    }
}

impl fmt::Display for PrimitiveErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl From<argon2::Error> for PrimitiveErrorCode {
    fn from(err: argon2::Error) -> Self {
        match err {
            argon2::Error::OutputTooShort => Self::OutputTooShort,
            argon2::Error::OutputTooLong => Self::OutputTooLong,
            argon2::Error::PwdTooLong => Self::PwdTooLong,
            argon2::Error::SaltTooShort => Self::SaltTooShort,
            argon2::Error::SaltTooLong => Self::SaltTooLong,
            argon2::Error::AdTooLong => Self::AdTooLong,
            argon2::Error::SecretTooLong => Self::SecretTooLong,
            argon2::Error::TimeTooSmall => Self::TimeTooSmall,
            argon2::Error::MemoryTooLittle => Self::MemoryTooLittle,
            argon2::Error::MemoryTooMuch => Self::MemoryTooMuch,
            argon2::Error::ThreadsTooFew => Self::LanesTooFew,
            argon2::Error::ThreadsTooMany => Self::LanesTooMany,
            argon2::Error::AlgorithmInvalid => Self::IncorrectType,
            argon2::Error::B64Encoding(_) => Self::DecodingFail,
            argon2::Error::VersionInvalid | argon2::Error::KeyIdTooLong => {
                Self::IncorrectParameter
            }
        }
    }
}

/// Raw Argon2 derive/verify capability.
pub trait Argon2Primitive: Send + Sync {
    /// Derive `hash.len()` bytes from `password` and `salt` under `options`,
    /// then write the encoded string into `encoded`, zero-filling the rest.
    ///
    /// # Errors
    /// Returns the reference error code on any failure, including
    /// `EncodingFail` when `encoded` cannot hold the string plus a
    /// terminating zero byte.
    fn derive(
        &self,
        options: &Argon2Options,
        password: &[u8],
        salt: &[u8],
        hash: &mut [u8],
        encoded: &mut [u8],
    ) -> Result<(), PrimitiveErrorCode>;

    /// Check `password` against an encoded string whose tag must be `variant`.
    ///
    /// # Errors
    /// `VerifyMismatch` when the password is wrong; any other code when no
    /// answer could be determined.
    fn verify(
        &self,
        encoded: &[u8],
        password: &[u8],
        variant: Variant,
    ) -> Result<(), PrimitiveErrorCode>;
}

/// [`Argon2Primitive`] backed by the RustCrypto `argon2` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoArgon2;

impl RustCryptoArgon2 {
    fn context(
        variant: Variant,
        version: Version,
        memory_cost: u32,
        time_cost: u32,
        parallelism: u32,
        output_len: usize,
    ) -> Result<Argon2<'static>, PrimitiveErrorCode> {
        let algorithm = match variant {
            Variant::Argon2d => Algorithm::Argon2d,
            Variant::Argon2i => Algorithm::Argon2i,
            Variant::Argon2id => Algorithm::Argon2id,
        };
        let version = match version {
            Version::V0x10 => argon2::Version::V0x10,
            Version::V0x13 => argon2::Version::V0x13,
        };
        let params = Params::new(memory_cost, time_cost, parallelism, Some(output_len))?;
        Ok(Argon2::new(algorithm, version, params))
    }

    /// Run the hash over a block matrix whose allocation may fail.
    ///
    /// Costs can come from an untrusted stored string, so an oversized `m=`
    /// must surface as `MemoryAllocationError` rather than abort the process.
    fn hash_into(
        argon2: &Argon2<'_>,
        password: &[u8],
        salt: &[u8],
        out: &mut [u8],
    ) -> Result<(), PrimitiveErrorCode> {
        let block_count = argon2.params().block_count();
        let mut blocks: Vec<Block> = Vec::new();
        blocks.try_reserve_exact(block_count).map_err(|e| {
            tracing::warn!("Cannot allocate {block_count} Argon2 blocks: {e}");
            PrimitiveErrorCode::MemoryAllocationError
        })?;
        blocks.resize(block_count, Block::default());

        argon2.hash_password_into_with_memory(password, salt, out, blocks.as_mut_slice())?;
        Ok(())
    }
}

impl Argon2Primitive for RustCryptoArgon2 {
    fn derive(
        &self,
        options: &Argon2Options,
        password: &[u8],
        salt: &[u8],
        hash: &mut [u8],
        encoded: &mut [u8],
    ) -> Result<(), PrimitiveErrorCode> {
        let argon2 = Self::context(
            options.variant(),
            options.version(),
            options.memory_cost(),
            options.time_cost(),
            options.parallelism(),
            hash.len(),
        )?;
        Self::hash_into(&argon2, password, salt, hash)?;

        let text = encode(options, salt, hash);
        if text.len() >= encoded.len() {
            return Err(PrimitiveErrorCode::EncodingFail);
        }
        let (written, filler) = encoded.split_at_mut(text.len());
        written.copy_from_slice(text.as_bytes());
        filler.fill(0);
        Ok(())
    }

    fn verify(
        &self,
        encoded: &[u8],
        password: &[u8],
        variant: Variant,
    ) -> Result<(), PrimitiveErrorCode> {
        let text = std::str::from_utf8(encoded).map_err(|_| PrimitiveErrorCode::DecodingFail)?;
        let decoded = decode(text).map_err(|e| {
            tracing::debug!("Rejecting encoded hash: {e}");
            PrimitiveErrorCode::DecodingFail
        })?;
        if decoded.variant != variant {
            tracing::debug!(
                "Encoded hash is {} but {} was requested",
                decoded.variant,
                variant
            );
            return Err(PrimitiveErrorCode::DecodingFail);
        }

        let argon2 = Self::context(
            decoded.variant,
            decoded.version,
            decoded.memory_cost,
            decoded.time_cost,
            decoded.parallelism,
            decoded.hash.len(),
        )?;
        let mut computed = Zeroizing::new(vec![0u8; decoded.hash.len()]);
        Self::hash_into(&argon2, password, &decoded.salt, computed.as_mut_slice())?;

        if constant_time_eq(&computed, &decoded.hash) {
            Ok(())
        } else {
            Err(PrimitiveErrorCode::VerifyMismatch)
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
