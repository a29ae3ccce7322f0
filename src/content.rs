//! Built-in `contentEncoding` decoders and `contentMediaType` checks.
//!
//! Compilers bind these by name; nothing in the kernel depends on them.
use crate::schema::{Decoder, MediaType};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;

/// Decode a base64 string into its raw bytes.
///
/// # Errors
///
/// Returns the decoder's message when the input is not valid base64.
pub fn from_base64(content: &str) -> Result<Vec<u8>, String> {
    STANDARD.decode(content).map_err(|error| error.to_string())
}

/// Check that the bytes parse as a JSON document.
///
/// # Errors
///
/// Returns the parser's message when the bytes are not valid JSON.
pub fn is_json(content: &[u8]) -> Result<(), String> {
    serde_json::from_slice::<Value>(content)
        .map(|_| ())
        .map_err(|error| error.to_string())
}

/// The `base64` decoder, ready to attach to a schema node.
#[must_use]
pub fn base64_decoder() -> Decoder {
    Decoder {
        name: "base64".to_string(),
        func: from_base64,
    }
}

/// The `application/json` media type check, ready to attach to a schema
/// node.
#[must_use]
pub fn json_media_type() -> MediaType {
    MediaType {
        name: "application/json".to_string(),
        func: is_json,
    }
}
