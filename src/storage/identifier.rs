//! Random record identifiers.
//!
//! Every stored image is named by a fresh 128-bit random value rendered in the
//! familiar UUID layout:
//!
//! ```text
//! xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx     (y is one of 8, 9, a, b)
//! ```
//!
//! The version/variant bits are cosmetic. Uniqueness is probabilistic; no check
//! against existing records is made.

use std::fmt;

use thiserror::Error;

/// Number of random bytes behind an identifier.
pub const IDENTIFIER_BYTES: usize = 16;

/// Length of the textual identifier (32 hex digits plus 4 hyphens).
pub const IDENTIFIER_LEN: usize = 36;

/// Byte offsets of the hyphens in the textual form.
const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// The operating system's random source could not be read.
#[derive(Debug, Clone, Error)]
#[error("Random source unavailable: {0}")]
pub struct RandomSourceError(pub String);

/// A generated record identifier, e.g. `3f2b8c1e-9a4d-4e7f-b2c1-0d9e8f7a6b5c`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Shape 16 raw bytes into an identifier.
    ///
    /// Forces the version nibble of byte 6 to `4` and the variant bits of
    /// byte 8 to `10`, then renders lowercase hex grouped `8-4-4-4-12`.
    pub fn from_bytes(mut bytes: [u8; IDENTIFIER_BYTES]) -> Self {
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        let text = format!(
            "{}-{}-{}-{}-{}",
            hex::encode(&bytes[0..4]),
            hex::encode(&bytes[4..6]),
            hex::encode(&bytes[6..8]),
            hex::encode(&bytes[8..10]),
            hex::encode(&bytes[10..16]),
        );
        Identifier(text)
    }

    /// The textual form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a fresh identifier from the OS CSPRNG.
pub fn generate_identifier() -> Result<Identifier, RandomSourceError> {
    let mut bytes = [0u8; IDENTIFIER_BYTES];
    getrandom::getrandom(&mut bytes).map_err(|e| RandomSourceError(e.to_string()))?;
    Ok(Identifier::from_bytes(bytes))
}

/// Check whether `s` has exactly the shape [`generate_identifier`] produces.
pub fn is_identifier(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != IDENTIFIER_LEN {
        return false;
    }

    for (i, &b) in bytes.iter().enumerate() {
        let ok = if HYPHEN_POSITIONS.contains(&i) {
            b == b'-'
        } else {
            matches!(b, b'0'..=b'9' | b'a'..=b'f')
        };
        if !ok {
            return false;
        }
    }

    // Version and variant nibbles
    bytes[14] == b'4' && matches!(bytes[19], b'8' | b'9' | b'a' | b'b')
}
