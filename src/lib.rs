//! Validation core for a JSON Schema engine.
//!
//! This crate is the part of a JSON Schema engine that runs *after*
//! compilation: given a tree of compiled schema nodes and a decoded JSON
//! value, it decides whether the value conforms and, when it does not,
//! produces a structured error tree naming every failing keyword, its
//! location in the schema, and its location in the instance.
//!
//! Loading, `$ref` resolution, and compilation live in an external compiler
//! that populates a [`Schemas`] arena; formats, content decoders, media
//! types, and extension keywords reach the core as predicates bound by that
//! compiler.
//!
//! # Validation
//!
//! ```rust
//! use jsonschema_core::{JsonType, Schema, Schemas, TypeSet};
//! use serde_json::json;
//!
//! let mut schemas = Schemas::new();
//! let root = schemas.insert(Schema {
//!     types: TypeSet::new().with(JsonType::Object),
//!     required: vec!["name".to_string()],
//!     ..Schema::default()
//! });
//!
//! assert!(schemas.is_valid(&json!({"name": "x"}), root));
//!
//! let error = schemas.validate(&json!({}), root).unwrap_err();
//! assert_eq!(error.keyword, "required");
//! ```
//!
//! # Numbers
//!
//! Numeric keywords compare exact rationals, never `f64` round-trips, so
//! `{"multipleOf": 0.1}` accepts `0.3`. For that to hold end to end, decode
//! instances with [`from_str`]/[`from_slice`]/[`from_reader`] (or any
//! `serde_json` entry point — this crate enables `arbitrary_precision`, so
//! number literals keep their source text).
pub mod content;
mod error;
mod helpers;
mod numeric;
mod paths;
mod primitive_type;
mod schema;
mod validator;

pub use crate::{
    error::{ValidationError, ValidationErrorKind},
    helpers::equal,
    numeric::parse_decimal,
    paths::{escape, JsonPointer, PathChunk, PointerNode, Segment},
    primitive_type::{JsonType, TypeSet},
    schema::{
        Additional, ContentDecode, Decoder, Dependency, Extension, ExtensionCheck,
        ExtensionContext, Format, FormatCheck, Items, MediaType, MediaTypeCheck, Schema,
        SchemaIndex, Schemas,
    },
};

use serde_json::Value;
use std::io;

/// Validate `instance` against the schema node at `index`.
///
/// Equivalent to [`Schemas::validate`].
///
/// # Errors
///
/// Returns the [`ValidationError`] tree when the instance does not conform.
pub fn validate(
    schemas: &Schemas,
    index: SchemaIndex,
    instance: &Value,
) -> Result<(), ValidationError> {
    schemas.validate(instance, index)
}

/// Whether `instance` is valid against the schema node at `index`.
#[must_use]
pub fn is_valid(schemas: &Schemas, index: SchemaIndex, instance: &Value) -> bool {
    schemas.is_valid(instance, index)
}

/// Decode a JSON document from a string, preserving numeric precision.
///
/// # Errors
///
/// Returns the underlying parser error for malformed input; this is the
/// only place a structurally invalid document can surface.
pub fn from_str(data: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(data)
}

/// Decode a JSON document from bytes, preserving numeric precision.
///
/// # Errors
///
/// Returns the underlying parser error for malformed input.
pub fn from_slice(data: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(data)
}

/// Decode a JSON document from a reader, preserving numeric precision.
///
/// # Errors
///
/// Returns the underlying parser error for malformed input or I/O failure.
pub fn from_reader<R: io::Read>(reader: R) -> Result<Value, serde_json::Error> {
    serde_json::from_reader(reader)
}
