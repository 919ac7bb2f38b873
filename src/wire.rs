//! Stable wire encodings for the public bulletin-board types.
//!
//! Every public type travels in two interchangeable forms: a compact binary
//! encoding for storage and transport, and JSON for genesis files and
//! clients. Both run over the same serde data model, in which big integers
//! are base-10 strings, so the two forms cannot drift apart.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;

/// Encodes a value into the binary wire form.
pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, Error> {
    bincode::serialize(value).map_err(|err| Error::Encode(err.to_string()))
}

/// Decodes a value from the binary wire form. No partial values: any
/// malformed field fails the whole decode.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    bincode::deserialize(bytes).map_err(|err| Error::Decode(err.to_string()))
}

/// Encodes a value as JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|err| Error::Encode(err.to_string()))
}

/// Decodes a value from JSON.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, Error> {
    serde_json::from_str(json).map_err(|err| Error::Decode(err.to_string()))
}
