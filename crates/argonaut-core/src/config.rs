//! Configuration management for Argonaut.
//!
//! Provides TOML-based hasher configuration with XDG-compliant paths and
//! environment variable overrides. The file only carries plain values; it is
//! turned into a validated [`Argon2Options`] with [`HasherConfig::to_options`].

use crate::error::{ConfigError, ConfigResult};
use crate::options::{
    Argon2Options, Variant, Version, DEFAULT_HASH_LENGTH, DEFAULT_MEMORY_COST,
    DEFAULT_MIN_SALT_LENGTH, DEFAULT_PARALLELISM, DEFAULT_TIME_COST,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Hasher configuration.
///
/// This is loaded from `~/.config/argonaut/config.toml` (or platform
/// equivalent). Missing keys fall back to the defaults of
/// [`Argon2Options::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    /// Argon2 variant: `argon2d`, `argon2i` or `argon2id`
    pub variant: Variant,
    /// Argon2 version: 16 or 19
    pub version: u32,
    /// Iteration count
    pub time_cost: u32,
    /// Memory cost in KiB
    pub memory_cost_kib: u32,
    /// Lane count
    pub parallelism: u32,
    /// Raw hash length in bytes
    pub hash_length: usize,
    /// Minimum auto-generated salt length in bytes
    pub min_salt_length: usize,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Argon2id,
            version: Version::V0x13.as_u32(),
            time_cost: DEFAULT_TIME_COST,
            memory_cost_kib: DEFAULT_MEMORY_COST,
            parallelism: DEFAULT_PARALLELISM,
            hash_length: DEFAULT_HASH_LENGTH,
            min_salt_length: DEFAULT_MIN_SALT_LENGTH,
        }
    }
}

impl HasherConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// Unlike [`HasherConfig::load`], a missing file is an error here.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `ARGONAUT_VARIANT`: Override the variant (`id`, `argon2i`, ...)
    /// - `ARGONAUT_VERSION`: Override the version (16 or 19)
    /// - `ARGONAUT_TIME_COST`: Override the iteration count
    /// - `ARGONAUT_MEMORY_COST`: Override the memory cost in KiB
    /// - `ARGONAUT_PARALLELISM`: Override the lane count
    /// - `ARGONAUT_HASH_LENGTH`: Override the hash length in bytes
    /// - `ARGONAUT_MIN_SALT_LENGTH`: Override the minimum generated salt length
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup.
    ///
    /// Values that are present but unparsable are rejected rather than
    /// ignored, so a typo never silently weakens the cost parameters.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("ARGONAUT_VARIANT") {
            self.variant = Variant::from_str(&val)?;
            tracing::debug!("Override variant from env: {}", self.variant);
        }
        if let Some(val) = lookup("ARGONAUT_VERSION") {
            self.version = parse_override("version", &val)?;
            tracing::debug!("Override version from env: {}", self.version);
        }
        if let Some(val) = lookup("ARGONAUT_TIME_COST") {
            self.time_cost = parse_override("time_cost", &val)?;
            tracing::debug!("Override time_cost from env: {}", self.time_cost);
        }
        if let Some(val) = lookup("ARGONAUT_MEMORY_COST") {
            self.memory_cost_kib = parse_override("memory_cost_kib", &val)?;
            tracing::debug!("Override memory_cost_kib from env: {}", self.memory_cost_kib);
        }
        if let Some(val) = lookup("ARGONAUT_PARALLELISM") {
            self.parallelism = parse_override("parallelism", &val)?;
            tracing::debug!("Override parallelism from env: {}", self.parallelism);
        }
        if let Some(val) = lookup("ARGONAUT_HASH_LENGTH") {
            self.hash_length = parse_override("hash_length", &val)?;
            tracing::debug!("Override hash_length from env: {}", self.hash_length);
        }
        if let Some(val) = lookup("ARGONAUT_MIN_SALT_LENGTH") {
            self.min_salt_length = parse_override("min_salt_length", &val)?;
            tracing::debug!("Override min_salt_length from env: {}", self.min_salt_length);
        }
        Ok(())
    }

    /// Save configuration to an explicit path.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let config_dir = path
            .parent()
            .ok_or_else(|| ConfigError::invalid("config_path", "no parent directory"))?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(Self::config_path()?)
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/argonaut/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("rs", "argonaut", "argonaut").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Validate the configuration and build the immutable option set.
    pub fn to_options(&self) -> ConfigResult<Argon2Options> {
        let version = Version::try_from(self.version)?;
        Argon2Options::new(
            self.variant,
            version,
            self.time_cost,
            self.memory_cost_kib,
            self.parallelism,
            self.hash_length,
            self.min_salt_length,
        )
    }
}

fn parse_override<T: FromStr>(field: &str, value: &str) -> ConfigResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(field, format!("cannot parse '{value}'")))
}
