//! The compiled schema tree that the validator consumes.
//!
//! A [`Schema`] is an immutable record once compilation has finished: the
//! compiler parses source documents, resolves every `$ref` into a
//! [`SchemaIndex`], compiles regexes, parses numeric keywords into exact
//! rationals, and binds format/decoder/media-type predicates. The validator
//! only reads.
use crate::{error::ValidationError, paths::JsonPointer, primitive_type::TypeSet, validator};
use ahash::AHashMap;
use fancy_regex::Regex;
use fraction::BigFraction;
use serde_json::Value;
use url::Url;

/// A `format` predicate: `true` means the value conforms. Checks for
/// inapplicable kinds are the predicate's responsibility.
pub type FormatCheck = fn(&Value) -> bool;
/// A `contentEncoding` decoder: the decoded bytes, or a message describing
/// why decoding failed.
pub type ContentDecode = fn(&str) -> Result<Vec<u8>, String>;
/// A `contentMediaType` predicate over decoded bytes.
pub type MediaTypeCheck = fn(&[u8]) -> Result<(), String>;
/// An extension keyword validator: invoked with the context, the extension's
/// configuration value, and the instance.
pub type ExtensionCheck = fn(&ExtensionContext, &Value, &Value) -> Result<(), String>;

/// A named `format` predicate bound by the compiler.
#[derive(Debug, Clone)]
pub struct Format {
    /// The format name, used in error messages.
    pub name: String,
    /// The predicate.
    pub func: FormatCheck,
}

/// A named `contentEncoding` decoder bound by the compiler.
#[derive(Debug, Clone)]
pub struct Decoder {
    /// The encoding name, used in error messages.
    pub name: String,
    /// The decoder.
    pub func: ContentDecode,
}

/// A named `contentMediaType` predicate bound by the compiler.
#[derive(Debug, Clone)]
pub struct MediaType {
    /// The media type name, used in error messages.
    pub name: String,
    /// The predicate.
    pub func: MediaTypeCheck,
}

/// A registered extension keyword: configuration plus validator predicate.
#[derive(Debug)]
pub struct Extension {
    /// The keyword name; doubles as the error tag.
    pub name: String,
    /// The keyword's value in the source schema.
    pub config: Value,
    /// The validator predicate.
    pub func: ExtensionCheck,
}

/// Context handed to extension validators. Currently empty; a placeholder
/// for future hooks.
#[derive(Debug, Default)]
pub struct ExtensionContext {}

/// The `items` keyword.
#[derive(Debug, Clone, Default)]
pub enum Items {
    /// Keyword absent.
    #[default]
    None,
    /// One schema applied to every element.
    Single(SchemaIndex),
    /// An ordered list of schemas applied positionally.
    Tuple(Vec<SchemaIndex>),
}

/// The `additionalItems` / `additionalProperties` keywords: absent, a
/// boolean switch, or a schema for the leftovers.
#[derive(Debug, Clone, Copy, Default)]
pub enum Additional {
    /// Keyword absent.
    #[default]
    Absent,
    /// Boolean form.
    Allow(bool),
    /// Schema form.
    Schema(SchemaIndex),
}

/// One entry of the legacy `dependencies` keyword.
#[derive(Debug, Clone)]
pub enum Dependency {
    /// Schema form: the object must also match this schema.
    Schema(SchemaIndex),
    /// Property-list form: these properties must also be present.
    Required(Vec<String>),
}

/// One node of the compiled schema tree, corresponding to one JSON Schema
/// object.
///
/// Every field is public so an external compiler can populate it; after
/// that, treat the node as frozen. Unspecified bounds are `None`; an absent
/// `min_contains` means 1.
#[derive(Debug, Default)]
pub struct Schema {
    /// Absolute URL of the resource this node was compiled from. Only used
    /// for error context.
    pub url: Option<Url>,
    /// JSON Pointer from the resource root to this node.
    pub pointer: JsonPointer,
    /// Unconditional outcome, skipping every other keyword.
    pub always: Option<bool>,
    /// Resolved `$ref` target.
    pub ref_: Option<SchemaIndex>,
    /// The `type` keyword. Empty means any.
    pub types: TypeSet,
    /// The `const` keyword.
    pub constant: Option<Value>,
    /// The `enum` keyword. Empty means absent.
    pub enum_: Vec<Value>,
    /// The `format` keyword, bound to a predicate.
    pub format: Option<Format>,
    pub not: Option<SchemaIndex>,
    pub all_of: Vec<SchemaIndex>,
    pub any_of: Vec<SchemaIndex>,
    pub one_of: Vec<SchemaIndex>,
    /// `then`/`else` only apply while `if_` is present.
    pub if_: Option<SchemaIndex>,
    pub then: Option<SchemaIndex>,
    pub else_: Option<SchemaIndex>,
    pub min_properties: Option<usize>,
    pub max_properties: Option<usize>,
    pub required: Vec<String>,
    pub properties: AHashMap<String, SchemaIndex>,
    pub property_names: Option<SchemaIndex>,
    /// Draft-4 compatibility switch: every property name must itself be a
    /// valid regex.
    pub regex_properties: bool,
    pub pattern_properties: Vec<(Regex, SchemaIndex)>,
    pub additional_properties: Additional,
    pub dependencies: Vec<(String, Dependency)>,
    pub dependent_required: Vec<(String, Vec<String>)>,
    pub dependent_schemas: Vec<(String, SchemaIndex)>,
    pub unevaluated_properties: Option<SchemaIndex>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub unique_items: bool,
    pub items: Items,
    /// Only consulted when `items` is the tuple form.
    pub additional_items: Additional,
    pub contains: Option<SchemaIndex>,
    /// Absent means the default of 1.
    pub min_contains: Option<usize>,
    pub max_contains: Option<usize>,
    pub unevaluated_items: Option<SchemaIndex>,
    /// String lengths are counted in Unicode code points.
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub content_encoding: Option<Decoder>,
    pub content_media_type: Option<MediaType>,
    pub minimum: Option<BigFraction>,
    pub exclusive_minimum: Option<BigFraction>,
    pub maximum: Option<BigFraction>,
    pub exclusive_maximum: Option<BigFraction>,
    pub multiple_of: Option<BigFraction>,
    /// Registered extension keywords, applied after everything else.
    pub extensions: Vec<Extension>,
}

impl Schema {
    /// The absolute location of this node, for display in `$ref` errors:
    /// URL plus percent-encoded fragment, or the bare pointer for nodes
    /// without a resource URL.
    #[must_use]
    pub fn absolute_location(&self) -> String {
        match &self.url {
            Some(url) => format!("{url}#{}", self.pointer.uri_fragment()),
            None => self.pointer.to_string(),
        }
    }
}

/// Opaque handle to a node inside a [`Schemas`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaIndex(usize);

/// Arena of compiled schema nodes.
///
/// Nodes refer to each other by [`SchemaIndex`], so `$ref` cycles are
/// representable without ownership gymnastics. Every node lives exactly as
/// long as the arena.
#[derive(Debug, Default)]
pub struct Schemas {
    list: Vec<Schema>,
}

impl Schemas {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its handle.
    ///
    /// Cyclic trees are built by inserting a placeholder first and patching
    /// it through [`get_mut`](Self::get_mut) once the targets exist.
    pub fn insert(&mut self, schema: Schema) -> SchemaIndex {
        self.list.push(schema);
        SchemaIndex(self.list.len() - 1)
    }

    /// Borrow the node behind `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` came from a different arena.
    #[must_use]
    pub fn get(&self, index: SchemaIndex) -> &Schema {
        &self.list[index.0]
    }

    /// Mutably borrow the node behind `index`. Intended for compilers
    /// patching forward references; nothing may mutate nodes once
    /// validation has started.
    ///
    /// # Panics
    ///
    /// Panics if `index` came from a different arena.
    pub fn get_mut(&mut self, index: SchemaIndex) -> &mut Schema {
        &mut self.list[index.0]
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Validate `instance` against the node at `index`.
    ///
    /// # Errors
    ///
    /// Returns the error tree described in [`ValidationError`].
    pub fn validate(&self, instance: &Value, index: SchemaIndex) -> Result<(), ValidationError> {
        validator::validate(self, index, instance)
    }

    /// Whether `instance` is valid against the node at `index`.
    #[must_use]
    pub fn is_valid(&self, instance: &Value, index: SchemaIndex) -> bool {
        self.validate(instance, index).is_ok()
    }
}
