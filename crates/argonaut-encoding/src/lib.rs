//! Argonaut Encoding - the canonical Argon2 encoded string.
//!
//! Pure codec for strings of the form
//!
//! ```text
//! $argon2<d|i|id>$v=<16|19>$m=<mem>,t=<time>,p=<par>$<b64 salt>$<b64 hash>
//! ```
//!
//! with base64 fields in the standard alphabet and no `=` padding.
//!
//! # Modules
//!
//! - [`sizing`] - Exact buffer sizes for the primitive's encoding output
//! - [`codec`] - Serialization, filler stripping and parsing
//! - [`error`] - Encoding error types
//!
//! # Example
//!
//! ```rust
//! use argonaut_core::Argon2Options;
//! use argonaut_encoding::{decode, encode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = Argon2Options::default();
//! let encoded = encode(&options, b"somesalt", &[0u8; 32]);
//! let decoded = decode(&encoded)?;
//! assert!(decoded.matches_options(&options));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod codec;
pub mod error;
pub mod sizing;

pub use codec::{decode, encode, strip_filler, DecodedHash};
pub use error::{EncodingError, Result};
pub use sizing::{b64_len, encoded_len, params_template};
