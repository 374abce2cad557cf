//! Buffer sizing for the encoded representation.
//!
//! The primitive writes its encoded output into a caller-allocated buffer
//! followed by a terminating zero byte, so the capacity is the literal
//! parameter template plus both base64 fields plus one byte of slack.
//! Undersizing is a hard failure in the primitive; anything past the
//! written text stays zero and is removed by [`crate::strip_filler`].

use argonaut_core::Argon2Options;

/// Length of the unpadded base64 rendering of `n` input bytes.
///
/// Equal to `ceil(n / 3 * 4)`; zero for an empty input.
#[must_use]
pub fn b64_len(n: usize) -> usize {
    (n * 4).div_ceil(3)
}

/// The encoded string with both base64 fields left empty.
///
/// `$argon2<variant>$v=<version>$m=<mem>,t=<time>,p=<par>$$`
#[must_use]
pub fn params_template(options: &Argon2Options) -> String {
    format!(
        "${}$v={}$m={},t={},p={}$$",
        options.variant().tag(),
        options.version().as_u32(),
        options.memory_cost(),
        options.time_cost(),
        options.parallelism(),
    )
}

/// Exact buffer capacity for an encoded string over `salt_len` salt bytes.
///
/// The hash field length comes from [`Argon2Options::hash_length`].
#[must_use]
pub fn encoded_len(options: &Argon2Options, salt_len: usize) -> usize {
    params_template(options).len() + b64_len(salt_len) + b64_len(options.hash_length()) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use argonaut_core::{Variant, Version};

    #[test]
    fn test_b64_len() {
        assert_eq!(b64_len(32), 43);
        assert_eq!(b64_len(16), 22);
        assert_eq!(b64_len(0), 0);
        assert_eq!(b64_len(1), 2);
        assert_eq!(b64_len(2), 3);
        assert_eq!(b64_len(3), 4);
        assert_eq!(b64_len(8), 11);
    }

    #[test]
    fn test_params_template() {
        let options = Argon2Options::new(Variant::Argon2i, Version::V0x13, 2, 65_536, 4, 24, 8)
            .expect("valid options");
        assert_eq!(params_template(&options), "$argon2i$v=19$m=65536,t=2,p=4$$");

        let options = Argon2Options::new(Variant::Argon2d, Version::V0x10, 1, 8, 1, 4, 8)
            .expect("valid options");
        assert_eq!(params_template(&options), "$argon2d$v=16$m=8,t=1,p=1$$");
    }

    #[test]
    fn test_encoded_len_default() {
        let options = Argon2Options::default();
        // "$argon2id$v=19$m=65536,t=3,p=1$$" is 32 bytes
        assert_eq!(params_template(&options).len(), 32);
        assert_eq!(encoded_len(&options, 16), 32 + 22 + 43 + 1);
    }

    #[test]
    fn test_encoded_len_empty_salt() {
        let options = Argon2Options::default();
        assert_eq!(encoded_len(&options, 0), 32 + 43 + 1);
    }
}
