//! JSON decoding helpers.
//!
//! Thin wrapper over `serde_json` that folds its failure modes into the
//! single [`RestClientError::Json`] kind, with a message naming the failed
//! target shape. Unknown input fields are ignored, matching serde's default
//! permissive behavior.

use std::any::type_name;
use std::io;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::{RestClientError, Result};

/// Decode a JSON string into a typed value.
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| classify::<T>(e))
}

/// Decode a JSON byte slice into a typed value.
pub fn decode_slice<T: DeserializeOwned>(json: &[u8]) -> Result<T> {
    serde_json::from_slice(json).map_err(|e| classify::<T>(e))
}

/// Decode JSON from a reader into a typed value.
pub fn decode_reader<T: DeserializeOwned, R: io::Read>(reader: R) -> Result<T> {
    serde_json::from_reader(reader).map_err(|e| classify::<T>(e))
}

/// Encode a value as a JSON string.
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| RestClientError::Json {
        message: format!("Unable to serialize {}", type_name::<T>()),
        cause: Some(e),
    })
}

/// Fold a serde_json failure into the client-facing error kind.
///
/// Malformed text (including truncation), a shape mismatch against the
/// target, and I/O faults while reading the source each get a distinct
/// message under the one `Json` kind.
fn classify<T>(error: serde_json::Error) -> RestClientError {
    let message = match error.classify() {
        Category::Syntax | Category::Eof => "Unable to parse JSON".to_string(),
        Category::Data => format!("Unable to map JSON to {}", type_name::<T>()),
        Category::Io => "Unable to retrieve JSON".to_string(),
    };
    RestClientError::Json {
        message,
        cause: Some(error),
    }
}
