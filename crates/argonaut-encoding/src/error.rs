//! Error types for the encoding module.

use thiserror::Error;

/// Errors raised while cleaning up or parsing an encoded string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// A byte outside printable ASCII survived filler stripping.
    #[error("non-ASCII byte 0x{byte:02x} at offset {offset}")]
    NonAscii {
        /// Offending byte
        byte: u8,
        /// Offset in the stripped output
        offset: usize,
    },

    /// Wrong number of `$`-separated segments.
    #[error("expected 5 or 6 '$'-separated segments, found {0}")]
    SegmentCount(usize),

    /// The leading `argon2<variant>` tag is missing or unknown.
    #[error("unknown algorithm tag '{0}'")]
    UnknownTag(String),

    /// A parameter segment is malformed.
    #[error("malformed {field} segment: {reason}")]
    Malformed {
        /// Segment name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A base64 field did not decode.
    #[error("invalid base64 in {field}: {source}")]
    Base64 {
        /// Which field failed
        field: &'static str,
        /// Underlying decoder error
        #[source]
        source: base64::DecodeError,
    },
}

/// Result type for encoding operations.
pub type Result<T> = std::result::Result<T, EncodingError>;
