//! Argonaut Hasher - Argon2 password hashing and verification.
//!
//! Wraps an Argon2 primitive behind a small facade that generates salts,
//! sizes and cleans the encoded output, and classifies verification results.
//!
//! # Security Model
//!
//! - Salts come from the OS CSPRNG, `max(min_salt_length, password_len)` bytes
//! - A wrong password is `Ok(false)`, never an error
//! - Malformed hashes, bad parameters and entropy failures are errors
//! - Raw hashes and generated salts are zeroized on drop
//! - Passwords, salts and hashes are never logged
//!
//! # Example
//!
//! ```no_run
//! use argonaut_core::HasherConfig;
//! use argonaut_hasher::Argon2Hasher;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let hasher = Argon2Hasher::from_config(&HasherConfig::load_with_env()?)?;
//! let stored = hasher.hash_str("hunter2")?.encoded().to_string();
//!
//! // Later, at login
//! if hasher.verify_str(&stored, "hunter2")? {
//!     println!("welcome back");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod facade;
pub mod primitive;
pub mod salt;

pub use error::{HashError, Result};
pub use facade::{Argon2Hasher, HashOutput, RawHash};
pub use primitive::{Argon2Primitive, PrimitiveErrorCode, RustCryptoArgon2};
pub use salt::{default_salt_len, OsSaltSource, SaltError, SaltSource};
