use thiserror::Error;

/// Errors produced by the fleece codec.
///
/// Reader operations never return these; they report failure by value
/// (`None`, empty slices, [`crate::ValueType::Undefined`]). Errors surface
/// from the encoder and from checked shared-keys lookups.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FleeceError {
    /// Out of memory, or an allocation failed.
    #[error("out of memory")]
    MemoryError,
    /// Array index or iterator out of range.
    #[error("out of range")]
    OutOfRange,
    /// Bad input data (duplicate dict key, embedded NUL in a string, ...).
    #[error("invalid data")]
    InvalidData,
    /// Structural misuse of the encoder (missing key, mismatched end, ...).
    #[error("encode error")]
    EncodeError,
    /// Unparseable value tag.
    #[error("unknown value")]
    UnknownValue,
    /// Key not found.
    #[error("not found")]
    NotFound,
    /// Misuse of shared keys.
    #[error("shared keys state error")]
    SharedKeysStateError,
}
