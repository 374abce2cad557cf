//! Serialization, filler stripping and parsing of encoded strings.

use crate::error::{EncodingError, Result};
use argonaut_core::{Argon2Options, Variant, Version};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;

/// Parameters, salt and hash recovered from an encoded string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHash {
    /// Variant named by the `argon2<variant>` tag
    pub variant: Variant,
    /// Version from `v=`, or 0x10 when the segment is absent
    pub version: Version,
    /// `m=` in KiB
    pub memory_cost: u32,
    /// `t=`
    pub time_cost: u32,
    /// `p=`
    pub parallelism: u32,
    /// Decoded salt bytes
    pub salt: Vec<u8>,
    /// Decoded hash bytes
    pub hash: Vec<u8>,
}

impl DecodedHash {
    /// Whether this hash was produced under `options`.
    ///
    /// Compares variant, version, the three costs and the hash length. A
    /// `false` result on a successfully verified password means the stored
    /// hash should be regenerated with the current options.
    #[must_use]
    pub fn matches_options(&self, options: &Argon2Options) -> bool {
        self.variant == options.variant()
            && self.version == options.version()
            && self.memory_cost == options.memory_cost()
            && self.time_cost == options.time_cost()
            && self.parallelism == options.parallelism()
            && self.hash.len() == options.hash_length()
    }
}

/// Serialize options, salt and hash into the canonical encoded string.
///
/// Empty salt or hash yield an empty field, never a panic.
#[must_use]
pub fn encode(options: &Argon2Options, salt: &[u8], hash: &[u8]) -> String {
    format!(
        "${}$v={}$m={},t={},p={}${}${}",
        options.variant().tag(),
        options.version().as_u32(),
        options.memory_cost(),
        options.time_cost(),
        options.parallelism(),
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(hash),
    )
}

/// Turn a primitive-filled buffer into the encoded string.
///
/// Every zero byte is dropped. Whatever remains must be printable ASCII;
/// anything else means the buffer was corrupted.
pub fn strip_filler(buffer: &[u8]) -> Result<String> {
    let mut text = String::with_capacity(buffer.len());
    for (offset, &byte) in buffer.iter().filter(|&&b| b != 0).enumerate() {
        if !byte.is_ascii_graphic() {
            return Err(EncodingError::NonAscii { byte, offset });
        }
        text.push(char::from(byte));
    }
    Ok(text)
}

/// Parse an encoded string.
///
/// Accepts the legacy form without a `v=` segment as version 0x10.
pub fn decode(encoded: &str) -> Result<DecodedHash> {
    let segments: Vec<&str> = encoded.split('$').collect();

    let (tag, version, params, salt, hash) = match segments.as_slice() {
        ["", tag, version, params, salt, hash] => {
            (*tag, parse_version(version)?, *params, *salt, *hash)
        }
        ["", tag, params, salt, hash] => (*tag, Version::V0x10, *params, *salt, *hash),
        _ => return Err(EncodingError::SegmentCount(segments.len())),
    };

    let variant = parse_tag(tag)?;
    let (memory_cost, time_cost, parallelism) = parse_params(params)?;

    let salt = STANDARD_NO_PAD
        .decode(salt)
        .map_err(|source| EncodingError::Base64 { field: "salt", source })?;
    let hash = STANDARD_NO_PAD
        .decode(hash)
        .map_err(|source| EncodingError::Base64 { field: "hash", source })?;

    Ok(DecodedHash {
        variant,
        version,
        memory_cost,
        time_cost,
        parallelism,
        salt,
        hash,
    })
}

fn parse_tag(tag: &str) -> Result<Variant> {
    match tag {
        "argon2d" => Ok(Variant::Argon2d),
        "argon2i" => Ok(Variant::Argon2i),
        "argon2id" => Ok(Variant::Argon2id),
        other => Err(EncodingError::UnknownTag(other.to_string())),
    }
}

fn parse_version(segment: &str) -> Result<Version> {
    let value = segment
        .strip_prefix("v=")
        .ok_or_else(|| malformed("version", format!("expected 'v=<n>', got '{segment}'")))?;
    let number = parse_decimal("version", value)?;
    Version::try_from(number).map_err(|e| malformed("version", e.to_string()))
}

fn parse_params(segment: &str) -> Result<(u32, u32, u32)> {
    let mut fields = segment.split(',');
    let mut next = |key: &'static str| -> Result<u32> {
        let field = fields
            .next()
            .ok_or_else(|| malformed("params", format!("missing '{key}='")))?;
        let value = field
            .strip_prefix(key)
            .and_then(|rest| rest.strip_prefix('='))
            .ok_or_else(|| malformed("params", format!("expected '{key}=', got '{field}'")))?;
        parse_decimal("params", value)
    };

    let memory_cost = next("m")?;
    let time_cost = next("t")?;
    let parallelism = next("p")?;

    if fields.next().is_some() {
        return Err(malformed("params", "unexpected trailing field".to_string()));
    }
    Ok((memory_cost, time_cost, parallelism))
}

fn parse_decimal(field: &'static str, value: &str) -> Result<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(field, format!("'{value}' is not a decimal number")));
    }
    value
        .parse()
        .map_err(|_| malformed(field, format!("'{value}' is out of range")))
}

fn malformed(field: &'static str, reason: String) -> EncodingError {
    EncodingError::Malformed { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::{b64_len, encoded_len};

    fn options(variant: Variant, hash_length: usize) -> Argon2Options {
        Argon2Options::new(variant, Version::V0x13, 2, 65_536, 4, hash_length, 8)
            .expect("valid options")
    }

    #[test]
    fn test_encode_layout() {
        let options = options(Variant::Argon2i, 3);
        let encoded = encode(&options, b"somesalt", &[0xff, 0xfe, 0xfd]);
        assert_eq!(encoded, "$argon2i$v=19$m=65536,t=2,p=4$c29tZXNhbHQ$//79");
    }

    #[test]
    fn test_encode_decode_parameters() {
        let options = options(Variant::Argon2id, 32);
        let salt = [7u8; 16];
        let hash = [42u8; 32];

        let encoded = encode(&options, &salt, &hash);

        let fields: Vec<&str> = encoded.split('$').collect();
        assert!(fields[4..].iter().all(|field| !field.contains('=')));
        assert_eq!(fields[4].len(), b64_len(16));
        assert_eq!(fields[5].len(), b64_len(32));
        assert_eq!(fields[4].len(), 22);
        assert_eq!(fields[5].len(), 43);

        let decoded = decode(&encoded).expect("decode");
        assert_eq!(decoded.variant, Variant::Argon2id);
        assert_eq!(decoded.version, Version::V0x13);
        assert_eq!(decoded.memory_cost, 65_536);
        assert_eq!(decoded.time_cost, 2);
        assert_eq!(decoded.parallelism, 4);
        assert_eq!(decoded.salt, salt);
        assert_eq!(decoded.hash, hash);
        assert!(decoded.matches_options(&options));
    }

    #[test]
    fn test_encoded_len_fits_exactly() {
        let options = options(Variant::Argon2d, 32);
        for salt_len in [0usize, 1, 8, 16, 17, 40] {
            let salt = vec![1u8; salt_len];
            let encoded = encode(&options, &salt, &[2u8; 32]);
            assert_eq!(encoded.len() + 1, encoded_len(&options, salt_len));
        }
    }

    #[test]
    fn test_empty_fields() {
        let options = options(Variant::Argon2i, 4);
        let encoded = encode(&options, &[], &[]);
        assert_eq!(encoded, "$argon2i$v=19$m=65536,t=2,p=4$$");

        let decoded = decode(&encoded).expect("decode empty fields");
        assert!(decoded.salt.is_empty());
        assert!(decoded.hash.is_empty());
        assert!(!decoded.matches_options(&options));
    }

    #[test]
    fn test_strip_filler() {
        let mut buffer = b"$argon2id$v=19$m=8,t=1,p=1$AAAA$BBBB".to_vec();
        buffer.extend_from_slice(&[0, 0, 0]);
        let text = strip_filler(&buffer).expect("strip filler");
        assert_eq!(text, "$argon2id$v=19$m=8,t=1,p=1$AAAA$BBBB");
        assert!(!text.contains('\0'));
    }

    #[test]
    fn test_strip_filler_rejects_non_ascii() {
        let buffer = [b'$', b'a', 0xc3, 0xa9, 0];
        assert_eq!(
            strip_filler(&buffer),
            Err(EncodingError::NonAscii {
                byte: 0xc3,
                offset: 2
            })
        );

        assert!(matches!(
            strip_filler(b"$argon2id\n"),
            Err(EncodingError::NonAscii { byte: b'\n', .. })
        ));
    }

    #[test]
    fn test_decode_legacy_without_version() {
        let decoded =
            decode("$argon2i$m=4096,t=3,p=1$c29tZXNhbHQ$AAAAAAAAAAAAAAAAAAAAAA").expect("decode");
        assert_eq!(decoded.version, Version::V0x10);
        assert_eq!(decoded.memory_cost, 4096);
        assert_eq!(decoded.salt, b"somesalt");
        assert_eq!(decoded.hash.len(), 16);
    }

    #[test]
    fn test_decode_rejects_missing_segment() {
        let err = decode("$argon2id$v=19$m=8,t=1,p=1$c29tZXNhbHQ").unwrap_err();
        assert!(matches!(err, EncodingError::Malformed { field: "params", .. }));

        let err = decode("argon2id$v=19$m=8,t=1,p=1$c29tZXNhbHQ$AAAA").unwrap_err();
        assert_eq!(err, EncodingError::SegmentCount(5));

        assert_eq!(decode("").unwrap_err(), EncodingError::SegmentCount(1));
    }

    #[test]
    fn test_decode_rejects_bad_fields() {
        assert_eq!(
            decode("$argon2x$v=19$m=8,t=1,p=1$AAAA$AAAA").unwrap_err(),
            EncodingError::UnknownTag("argon2x".to_string())
        );
        assert!(matches!(
            decode("$argon2id$v=18$m=8,t=1,p=1$AAAA$AAAA").unwrap_err(),
            EncodingError::Malformed { field: "version", .. }
        ));
        assert!(matches!(
            decode("$argon2id$v=19$t=1,m=8,p=1$AAAA$AAAA").unwrap_err(),
            EncodingError::Malformed { field: "params", .. }
        ));
        assert!(matches!(
            decode("$argon2id$v=19$m=-8,t=1,p=1$AAAA$AAAA").unwrap_err(),
            EncodingError::Malformed { field: "params", .. }
        ));
        assert!(matches!(
            decode("$argon2id$v=19$m=8,t=1,p=1,x=2$AAAA$AAAA").unwrap_err(),
            EncodingError::Malformed { field: "params", .. }
        ));
        assert!(matches!(
            decode("$argon2id$v=19$m=99999999999,t=1,p=1$AAAA$AAAA").unwrap_err(),
            EncodingError::Malformed { field: "params", .. }
        ));
    }

    #[test]
    fn test_decode_rejects_padding() {
        let err = decode("$argon2id$v=19$m=8,t=1,p=1$c29tZXNhbHQ=$AAAA").unwrap_err();
        assert!(matches!(err, EncodingError::Base64 { field: "salt", .. }));

        let err = decode("$argon2id$v=19$m=8,t=1,p=1$AAAA$AA*A").unwrap_err();
        assert!(matches!(err, EncodingError::Base64 { field: "hash", .. }));
    }
}
