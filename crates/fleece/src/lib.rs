//! Fleece: a binary serialization format for JSON-like data with zero-copy
//! random access.
//!
//! A fleece document is a single byte buffer in which any value, array
//! element, or dict entry is reachable without parsing, allocation, or
//! copying: scalars are tagged two-byte records (wider payloads follow the
//! tag), containers hold fixed-width slots, and larger values are shared
//! through backward pointers. The last two bytes of a buffer are its root.
//!
//! Documents can also be encoded as *deltas* against an existing base
//! buffer: the delta is readable only appended after its base (see
//! `fleece_buffers::concat`), with pointers reaching back across the
//! boundary.

mod array;
mod constants;
mod dict;
mod encoder;
mod error;
mod shared_keys;
mod string_table;
mod value;
mod varint;

pub use array::{Array, ArrayIter};
pub use dict::{Dict, DictIter, DictKey};
pub use encoder::{Encoder, EncoderOptions};
pub use error::FleeceError;
pub use shared_keys::SharedKeys;
pub use value::{Value, ValueType};
