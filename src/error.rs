//! Error types
use crate::{
    paths::JsonPointer,
    primitive_type::{JsonType, TypeSet},
};
use fraction::BigFraction;
use serde_json::Value;
use std::{
    error,
    fmt::{self, Formatter, Write},
};

/// A failed schema application: a tree of keyword failures mirroring the
/// schema structure.
///
/// Combinator failures keep the failing subschema results in [`causes`];
/// leaves have none. When several keywords fail at the same schema level the
/// root carries the empty keyword tag and groups them.
///
/// [`causes`]: ValidationError::causes
#[derive(Debug, PartialEq)]
pub struct ValidationError {
    /// Tag of the keyword that failed: `"required"`, `"allOf/2"`, `"$ref"`.
    /// Empty for the synthetic root grouping several failures.
    pub keyword: String,
    /// What went wrong.
    pub kind: ValidationErrorKind,
    /// Path to the value that failed validation.
    pub instance_path: JsonPointer,
    /// Path to the JSON Schema keyword that failed validation.
    pub schema_path: JsonPointer,
    /// Failures of subschema applications that produced this error.
    pub causes: Vec<ValidationError>,
}

impl ValidationError {
    /// Iterate over this error and every transitive cause, depth-first.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.causes.iter().rev());
            Some(next)
        })
    }
}

/// Kinds of failures that may happen during validation.
#[derive(Debug, PartialEq)]
#[allow(missing_docs)]
pub enum ValidationErrorKind {
    /// The input array contains more items than the tuple form allows.
    AdditionalItems { limit: usize },
    /// Properties not covered by any property keyword are not allowed.
    AdditionalProperties { unexpected: Vec<String> },
    /// The subschema at this `allOf` index did not match.
    AllOf { index: usize },
    /// The input value is not valid under any `anyOf` subschema.
    AnyOf,
    /// The input value doesn't match the expected constant.
    Constant { expected: Value },
    /// The input array doesn't contain items conforming to the `contains`
    /// schema.
    Contains,
    /// The input value could not be decoded with the attached decoder.
    ContentEncoding { encoding: String, error: String },
    /// The decoded content does not conform to the attached media type.
    ContentMediaType { media_type: String, error: String },
    /// A property's presence requires other properties that are missing.
    Dependency { property: String, missing: Vec<String> },
    /// Same as [`Dependency`], for the `dependentRequired` keyword.
    ///
    /// [`Dependency`]: ValidationErrorKind::Dependency
    DependentRequired { property: String, missing: Vec<String> },
    /// The condition matched but the `else` branch did not. Never produced
    /// by the condition itself, whose outcome is silent.
    Else,
    /// The input value doesn't match any of the enumerated options.
    Enum { options: Vec<Value> },
    /// Value is too large.
    ExclusiveMaximum { limit: BigFraction },
    /// Value is too small.
    ExclusiveMinimum { limit: BigFraction },
    /// A registered extension keyword rejected the value.
    Extension { name: String, message: String },
    /// Everything is invalid for an always-failing schema.
    FalseSchema,
    /// The input value doesn't match the expected format.
    Format { format: String },
    /// Synthetic root for several keyword failures at one schema level.
    Group,
    /// Too many array items matched the `contains` schema.
    MaxContains { matched: Vec<usize>, limit: usize },
    /// Value is too large.
    Maximum { limit: BigFraction },
    /// Too many items in an array.
    MaxItems { got: usize, limit: usize },
    /// String is too long.
    MaxLength { got: usize, limit: usize },
    /// Too many properties in an object.
    MaxProperties { got: usize, limit: usize },
    /// Too few array items matched the `contains` schema.
    MinContains { matched: Vec<usize>, limit: usize },
    /// Value is too small.
    Minimum { limit: BigFraction },
    /// Too few items in an array.
    MinItems { got: usize, limit: usize },
    /// String is too short.
    MinLength { got: usize, limit: usize },
    /// Not enough properties in an object.
    MinProperties { got: usize, limit: usize },
    /// The number is not a multiple of the given divisor.
    MultipleOf { multiple_of: BigFraction },
    /// The negated schema matched.
    Not,
    /// More than one `oneOf` subschema matched.
    OneOfMultipleValid { first: usize, second: usize },
    /// No `oneOf` subschema matched.
    OneOfNotValid,
    /// The string doesn't match the pattern.
    Pattern { pattern: String },
    /// An object property name is invalid.
    PropertyNames { property: String },
    /// A referenced schema did not match.
    Reference { location: String },
    /// A property name is not a valid regular expression.
    RegexProperty { key: String },
    /// Required properties are missing.
    Required { missing: Vec<String> },
    /// The condition matched but the `then` branch did not.
    Then,
    /// The input value doesn't match the required type(s).
    Type { got: JsonType, want: TypeSet },
    /// Array items no keyword evaluated failed the `unevaluatedItems`
    /// schema.
    UnevaluatedItems { unexpected: Vec<usize> },
    /// Object properties no keyword evaluated failed the
    /// `unevaluatedProperties` schema.
    UnevaluatedProperties { unexpected: Vec<String> },
    /// The input array has equal elements.
    UniqueItems { first: usize, second: usize },
}

fn quoted(names: &[String]) -> String {
    let mut out = String::new();
    for (index, name) in names.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "\"{name}\"");
    }
    out
}

fn joined<T: fmt::Display>(items: &[T]) -> String {
    let mut out = String::new();
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{item}");
    }
    out
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidationErrorKind::AdditionalItems { limit } => {
                write!(f, "additional items are not allowed ({limit} items expected)")
            }
            ValidationErrorKind::AdditionalProperties { unexpected } => {
                write!(f, "additional properties are not allowed: {}", quoted(unexpected))
            }
            ValidationErrorKind::AllOf { index } => {
                write!(f, "value is not valid against subschema {index}")
            }
            ValidationErrorKind::AnyOf => f.write_str("value is not valid against any subschema"),
            ValidationErrorKind::Constant { expected } => {
                write!(f, "value must be {expected}")
            }
            ValidationErrorKind::Contains => {
                f.write_str("no items match the contains schema")
            }
            ValidationErrorKind::ContentEncoding { encoding, error } => {
                write!(f, "value is not \"{encoding}\" encoded: {error}")
            }
            ValidationErrorKind::ContentMediaType { media_type, error } => {
                write!(f, "content is not valid \"{media_type}\": {error}")
            }
            ValidationErrorKind::Dependency { property, missing }
            | ValidationErrorKind::DependentRequired { property, missing } => {
                write!(
                    f,
                    "properties {} are required when \"{property}\" is present",
                    quoted(missing)
                )
            }
            ValidationErrorKind::Else => f.write_str("value does not match the else schema"),
            ValidationErrorKind::Enum { options } => {
                write!(f, "value must be one of: {}", joined(options))
            }
            ValidationErrorKind::ExclusiveMaximum { limit } => {
                write!(f, "value must be less than {limit}")
            }
            ValidationErrorKind::ExclusiveMinimum { limit } => {
                write!(f, "value must be greater than {limit}")
            }
            ValidationErrorKind::Extension { name, message } => {
                write!(f, "\"{name}\": {message}")
            }
            ValidationErrorKind::FalseSchema => f.write_str("always fail"),
            ValidationErrorKind::Format { format } => {
                write!(f, "value is not a \"{format}\"")
            }
            ValidationErrorKind::Group => f.write_str("validation failed"),
            ValidationErrorKind::MaxContains { matched, limit } => {
                write!(
                    f,
                    "{} items match the contains schema, at most {limit} allowed",
                    matched.len()
                )
            }
            ValidationErrorKind::Maximum { limit } => {
                write!(f, "value must be less than or equal to {limit}")
            }
            ValidationErrorKind::MaxItems { got, limit } => {
                write!(f, "array has {got} items, at most {limit} allowed")
            }
            ValidationErrorKind::MaxLength { got, limit } => {
                write!(f, "string has {got} characters, at most {limit} allowed")
            }
            ValidationErrorKind::MaxProperties { got, limit } => {
                write!(f, "object has {got} properties, at most {limit} allowed")
            }
            ValidationErrorKind::MinContains { matched, limit } => {
                write!(
                    f,
                    "{} items match the contains schema, at least {limit} required",
                    matched.len()
                )
            }
            ValidationErrorKind::Minimum { limit } => {
                write!(f, "value must be greater than or equal to {limit}")
            }
            ValidationErrorKind::MinItems { got, limit } => {
                write!(f, "array has {got} items, at least {limit} required")
            }
            ValidationErrorKind::MinLength { got, limit } => {
                write!(f, "string has {got} characters, at least {limit} required")
            }
            ValidationErrorKind::MinProperties { got, limit } => {
                write!(f, "object has {got} properties, at least {limit} required")
            }
            ValidationErrorKind::MultipleOf { multiple_of } => {
                write!(f, "value is not a multiple of {multiple_of}")
            }
            ValidationErrorKind::Not => f.write_str("value must not match the schema"),
            ValidationErrorKind::OneOfMultipleValid { first, second } => {
                write!(f, "value is valid against subschemas {first} and {second}")
            }
            ValidationErrorKind::OneOfNotValid => {
                f.write_str("value is not valid against any subschema")
            }
            ValidationErrorKind::Pattern { pattern } => {
                write!(f, "string does not match \"{pattern}\"")
            }
            ValidationErrorKind::PropertyNames { property } => {
                write!(f, "property name \"{property}\" is not valid")
            }
            ValidationErrorKind::Reference { location } => {
                write!(f, "value does not match the referenced schema {location}")
            }
            ValidationErrorKind::RegexProperty { key } => {
                write!(f, "property name \"{key}\" is not a valid regex")
            }
            ValidationErrorKind::Required { missing } => {
                write!(f, "required properties are missing: {}", quoted(missing))
            }
            ValidationErrorKind::Then => f.write_str("value does not match the then schema"),
            ValidationErrorKind::Type { got, want } => {
                write!(f, "{got} is not of type {want}")
            }
            ValidationErrorKind::UnevaluatedItems { unexpected } => {
                write!(
                    f,
                    "unevaluated items are not allowed at indexes {}",
                    joined(unexpected)
                )
            }
            ValidationErrorKind::UnevaluatedProperties { unexpected } => {
                write!(f, "unevaluated properties are not allowed: {}", quoted(unexpected))
            }
            ValidationErrorKind::UniqueItems { first, second } => {
                write!(f, "items at indexes {first} and {second} are equal")
            }
        }
    }
}

impl error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::{ValidationError, ValidationErrorKind};
    use crate::paths::JsonPointer;

    fn leaf(kind: ValidationErrorKind) -> ValidationError {
        ValidationError {
            keyword: String::new(),
            kind,
            instance_path: JsonPointer::default(),
            schema_path: JsonPointer::default(),
            causes: Vec::new(),
        }
    }

    #[test]
    fn messages() {
        let error = leaf(ValidationErrorKind::Required {
            missing: vec!["b".into(), "c".into()],
        });
        assert_eq!(error.to_string(), "required properties are missing: \"b\", \"c\"");
        let error = leaf(ValidationErrorKind::UniqueItems { first: 0, second: 3 });
        assert_eq!(error.to_string(), "items at indexes 0 and 3 are equal");
        assert_eq!(leaf(ValidationErrorKind::FalseSchema).to_string(), "always fail");
    }

    #[test]
    fn iter_walks_causes_depth_first() {
        let mut root = leaf(ValidationErrorKind::Group);
        let mut first = leaf(ValidationErrorKind::AnyOf);
        first.causes.push(leaf(ValidationErrorKind::Not));
        root.causes.push(first);
        root.causes.push(leaf(ValidationErrorKind::Contains));
        let kinds: Vec<_> = root.iter().map(|error| &error.kind).collect();
        assert_eq!(
            kinds,
            [
                &ValidationErrorKind::Group,
                &ValidationErrorKind::AnyOf,
                &ValidationErrorKind::Not,
                &ValidationErrorKind::Contains,
            ]
        );
    }
}
