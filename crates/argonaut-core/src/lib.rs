//! Argonaut Core - Foundation crate for the Argonaut password hasher.
//!
//! This crate provides the immutable Argon2 option set, the variant and
//! version enumerations, error types and TOML configuration loading that the
//! encoding and hasher crates build on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`options`] - `Variant`, `Version` and the validated `Argon2Options` value
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//!
//! # Example
//!
//! ```rust
//! use argonaut_core::{Argon2Options, HasherConfig, Variant};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = HasherConfig::default().to_options()?;
//! assert_eq!(options.variant(), Variant::Argon2id);
//! assert_eq!(options, Argon2Options::default());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod options;

// Re-export commonly used types
pub use config::HasherConfig;
pub use error::{ConfigError, ConfigResult};
pub use options::{Argon2Options, Variant, Version};
