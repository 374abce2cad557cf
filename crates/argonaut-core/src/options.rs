//! Argon2 variants, versions and the immutable option set.
//!
//! An [`Argon2Options`] value is built once, validated at construction and
//! then only read. Hashers hold it for their whole lifetime.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default Argon2 time cost (iterations).
pub const DEFAULT_TIME_COST: u32 = 3;

/// Default Argon2 memory cost in KiB (64 MiB).
pub const DEFAULT_MEMORY_COST: u32 = 65_536;

/// Default Argon2 parallelism (lanes).
pub const DEFAULT_PARALLELISM: u32 = 1;

/// Default raw hash length in bytes.
pub const DEFAULT_HASH_LENGTH: usize = 32;

/// Default floor for auto-generated salt lengths in bytes.
pub const DEFAULT_MIN_SALT_LENGTH: usize = 16;

/// Argon2 algorithm variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Data-dependent memory access (GPU resistant)
    Argon2d,
    /// Data-independent memory access (side-channel resistant)
    Argon2i,
    /// Hybrid of the two
    #[default]
    Argon2id,
}

impl Variant {
    /// Identifier used in the encoded string tag (`argon2<ident>`).
    #[must_use]
    pub fn ident(self) -> &'static str {
        match self {
            Self::Argon2d => "d",
            Self::Argon2i => "i",
            Self::Argon2id => "id",
        }
    }

    /// Full tag as it appears after the leading `$`.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Argon2d => "argon2d",
            Self::Argon2i => "argon2i",
            Self::Argon2id => "argon2id",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        let ident = lowered.strip_prefix("argon2").unwrap_or(&lowered);
        [Self::Argon2d, Self::Argon2i, Self::Argon2id]
            .into_iter()
            .find(|variant| variant.ident() == ident)
            .ok_or_else(|| {
                ConfigError::invalid("variant", format!("unknown Argon2 variant '{s}'"))
            })
    }
}

/// Argon2 algorithm version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Version {
    /// Version 1.0 (0x10 = 16)
    V0x10,
    /// Version 1.3 (0x13 = 19)
    #[default]
    V0x13,
}

impl Version {
    /// Numeric version as written in the `v=` segment.
    #[must_use]
    pub fn as_u32(self) -> u32 {
        match self {
            Self::V0x10 => 0x10,
            Self::V0x13 => 0x13,
        }
    }
}

impl From<Version> for u32 {
    fn from(version: Version) -> Self {
        version.as_u32()
    }
}

impl TryFrom<u32> for Version {
    type Error = ConfigError;

    fn try_from(value: u32) -> ConfigResult<Self> {
        match value {
            0x10 => Ok(Self::V0x10),
            0x13 => Ok(Self::V0x13),
            other => Err(ConfigError::invalid(
                "version",
                format!("expected 16 (0x10) or 19 (0x13), got {other}"),
            )),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// Immutable Argon2 configuration shared by every hash and verify call.
///
/// All numeric fields are guaranteed to be non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argon2Options {
    variant: Variant,
    version: Version,
    time_cost: u32,
    memory_cost: u32,
    parallelism: u32,
    hash_length: usize,
    min_salt_length: usize,
}

impl Argon2Options {
    /// Create a validated option set.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` naming the first numeric field
    /// that is zero.
    pub fn new(
        variant: Variant,
        version: Version,
        time_cost: u32,
        memory_cost: u32,
        parallelism: u32,
        hash_length: usize,
        min_salt_length: usize,
    ) -> ConfigResult<Self> {
        let counts = [
            ("time_cost", u64::from(time_cost)),
            ("memory_cost", u64::from(memory_cost)),
            ("parallelism", u64::from(parallelism)),
            ("hash_length", hash_length as u64),
            ("min_salt_length", min_salt_length as u64),
        ];
        if let Some((field, _)) = counts.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::invalid(field, "must be greater than zero"));
        }

        Ok(Self {
            variant,
            version,
            time_cost,
            memory_cost,
            parallelism,
            hash_length,
            min_salt_length,
        })
    }

    /// Argon2 variant.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Argon2 version.
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Number of passes over memory.
    #[must_use]
    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    /// Memory usage in KiB.
    #[must_use]
    pub fn memory_cost(&self) -> u32 {
        self.memory_cost
    }

    /// Number of lanes.
    #[must_use]
    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    /// Raw hash output length in bytes.
    #[must_use]
    pub fn hash_length(&self) -> usize {
        self.hash_length
    }

    /// Floor for auto-generated salt lengths in bytes.
    #[must_use]
    pub fn min_salt_length(&self) -> usize {
        self.min_salt_length
    }
}

impl Default for Argon2Options {
    fn default() -> Self {
        Self {
            variant: Variant::Argon2id,
            version: Version::V0x13,
            time_cost: DEFAULT_TIME_COST,
            memory_cost: DEFAULT_MEMORY_COST,
            parallelism: DEFAULT_PARALLELISM,
            hash_length: DEFAULT_HASH_LENGTH,
            min_salt_length: DEFAULT_MIN_SALT_LENGTH,
        }
    }
}
