//! Mapping between short dictionary-key strings and small integers.

use std::collections::HashMap;

use crate::error::FleeceError;

/// A bidirectional mapping from short dictionary-key strings to small
/// integers, kept out-of-band from the encoded data.
///
/// An encoder given a mapping stores eligible dict keys as integers; a
/// reader inverts them through [`SharedKeys::decode`]. The mapping is
/// logically append-only: integers, once assigned, never change meaning.
/// Both sides of a document exchange must observe the same mapping.
#[derive(Default)]
pub struct SharedKeys {
    by_string: HashMap<String, u16>,
    by_code: Vec<String>,
}

impl SharedKeys {
    /// Maximum number of keys a mapping can hold; codes are
    /// `0..MAX_COUNT`.
    pub const MAX_COUNT: usize = 2048;

    /// Longest key string eligible for integer encoding.
    pub const MAX_KEY_LENGTH: usize = 16;

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently mapped.
    pub fn count(&self) -> usize {
        self.by_code.len()
    }

    /// Whether `key` could be assigned an integer: 1 to 16 bytes, ASCII
    /// alphanumerics plus `_` and `-`.
    pub fn is_eligible(key: &str) -> bool {
        !key.is_empty()
            && key.len() <= Self::MAX_KEY_LENGTH
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    }

    /// Looks up the integer encoding of `key` without allocating one.
    /// This is the reader-side call; it never mutates the mapping.
    pub fn encode(&self, key: &str) -> Option<u16> {
        self.by_string.get(key).copied()
    }

    /// Looks up or allocates the integer encoding of `key`.
    ///
    /// Returns `None` when the key is ineligible or the mapping is full;
    /// the caller then falls back to writing the key as a string.
    pub fn encode_and_add(&mut self, key: &str) -> Option<u16> {
        if let Some(code) = self.by_string.get(key) {
            return Some(*code);
        }
        if !Self::is_eligible(key) || self.by_code.len() >= Self::MAX_COUNT {
            return None;
        }
        let code = self.by_code.len() as u16;
        self.by_code.push(key.to_owned());
        self.by_string.insert(key.to_owned(), code);
        Some(code)
    }

    /// Reverse lookup of a previously-encoded integer.
    pub fn decode(&self, code: u16) -> Option<&str> {
        self.by_code.get(code as usize).map(String::as_str)
    }

    /// Like [`SharedKeys::decode`], but reports unknown codes as
    /// [`FleeceError::SharedKeysStateError`].
    pub fn decode_checked(&self, code: u16) -> Result<&str, FleeceError> {
        self.decode(code).ok_or(FleeceError::SharedKeysStateError)
    }
}
