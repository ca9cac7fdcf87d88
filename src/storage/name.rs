//! Record names and extension handling.
//!
//! A record is addressed by a single filename: an identifier optionally
//! followed by the extension taken from the uploader's filename. Names coming
//! from request paths are parsed into [`RecordName`] before any filesystem
//! access, so nothing outside this shape (`..`, `/`, NUL, absolute paths) ever
//! reaches a path join.

use std::fmt;

use super::identifier::{is_identifier, Identifier, IDENTIFIER_LEN};

/// Maximum number of characters after the dot in a stored extension.
pub const MAX_EXTENSION_LEN: usize = 16;

/// Extract the extension (with its leading dot) from a client filename.
///
/// Only the final path component is considered, so directory parts sent by
/// some browsers are ignored. Returns an empty string when there is no dot or
/// the dot is the last character. Casing is preserved.
///
/// ```
/// use image_gallery::storage::extension_of;
///
/// assert_eq!(extension_of("photo.PNG"), ".PNG");
/// assert_eq!(extension_of("archive.tar.gz"), ".gz");
/// assert_eq!(extension_of("blob"), "");
/// ```
pub fn extension_of(original_name: &str) -> &str {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);

    match base.rfind('.') {
        Some(idx) if idx + 1 < base.len() => &base[idx..],
        _ => "",
    }
}

/// Whether `extension` may be part of a record name.
///
/// Accepts the empty string, or a dot followed by 1 to [`MAX_EXTENSION_LEN`]
/// characters from `[A-Za-z0-9_-]`.
pub fn is_valid_extension(extension: &str) -> bool {
    if extension.is_empty() {
        return true;
    }

    let Some(suffix) = extension.strip_prefix('.') else {
        return false;
    };

    !suffix.is_empty()
        && suffix.len() <= MAX_EXTENSION_LEN
        && suffix
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// A validated record filename such as `3f2b8c1e-9a4d-4e7f-b2c1-0d9e8f7a6b5c.PNG`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordName(String);

impl RecordName {
    /// Build the name for a freshly generated identifier.
    ///
    /// Returns `None` if the extension fails [`is_valid_extension`].
    pub fn new(identifier: &Identifier, extension: &str) -> Option<Self> {
        if !is_valid_extension(extension) {
            return None;
        }
        Some(RecordName(format!("{}{}", identifier, extension)))
    }

    /// Parse a name received from a client or read from the content root.
    pub fn parse(name: &str) -> Option<Self> {
        if !name.is_ascii() || name.len() < IDENTIFIER_LEN {
            return None;
        }

        let (identifier, extension) = name.split_at(IDENTIFIER_LEN);
        if is_identifier(identifier) && is_valid_extension(extension) {
            Some(RecordName(name.to_string()))
        } else {
            None
        }
    }

    /// The identifier part of the name.
    pub fn identifier(&self) -> &str {
        &self.0[..IDENTIFIER_LEN]
    }

    /// The extension part, including the dot (may be empty).
    pub fn extension(&self) -> &str {
        &self.0[IDENTIFIER_LEN..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
