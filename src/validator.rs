//! The recursive validation kernel.
//!
//! One [`Scope`] applies one schema node to one instance value. Applying a
//! node yields the [`Unevaluated`] bookkeeping consumed by the
//! `unevaluated*` keywords: the property names no keyword has looked at yet
//! and the highest array index any keyword has covered. Combinators hand
//! the bookkeeping of successful children back to their parent.
use crate::{
    error::{ValidationError, ValidationErrorKind},
    helpers, numeric,
    paths::{escape, JsonPointer, PathChunk, PointerNode},
    primitive_type::JsonType,
    schema::{Additional, Dependency, ExtensionContext, Items, Schema, SchemaIndex, Schemas},
};
use ahash::AHashSet;
use fancy_regex::Regex;
use serde_json::{Map, Number, Value};
use std::borrow::Cow;

pub(crate) fn validate(
    schemas: &Schemas,
    index: SchemaIndex,
    instance: &Value,
) -> Result<(), ValidationError> {
    let location = PointerNode::new();
    Scope::new(schemas, schemas.get(index), instance)
        .apply(&location)
        .map(|_| ())
}

/// What a schema application has not looked at yet.
#[derive(Debug, Default)]
struct Unevaluated<'v> {
    /// Property names of the current object no keyword has evaluated.
    properties: AHashSet<&'v str>,
    /// Highest array index any keyword has evaluated.
    last_item: Option<usize>,
}

impl<'v> Unevaluated<'v> {
    fn for_instance(instance: &'v Value) -> Self {
        let properties = match instance {
            Value::Object(object) => object.keys().map(String::as_str).collect(),
            _ => AHashSet::new(),
        };
        Unevaluated {
            properties,
            last_item: None,
        }
    }

    /// Fold a successful child application into this one. A property stays
    /// unevaluated only if both sides agree; the item watermark advances to
    /// the larger of the two.
    fn merge(&mut self, child: &Unevaluated<'v>) {
        self.properties
            .retain(|name| child.properties.contains(name));
        self.last_item = self.last_item.max(child.last_item);
    }
}

/// The keyword being reported, used to derive both the error tag and the
/// schema-pointer suffix.
enum Keyword {
    None,
    Plain(&'static str),
    Indexed(&'static str, usize),
    Property(&'static str, String),
    Custom(String),
}

impl Keyword {
    fn tag(&self) -> String {
        match self {
            Keyword::None => String::new(),
            Keyword::Plain(keyword) => (*keyword).to_string(),
            Keyword::Indexed(keyword, index) => format!("{keyword}/{index}"),
            Keyword::Property(keyword, property) => format!("{keyword}/{}", escape(property)),
            Keyword::Custom(name) => name.clone(),
        }
    }

    fn chunks(self) -> Vec<PathChunk> {
        match self {
            Keyword::None => Vec::new(),
            Keyword::Plain(keyword) => vec![PathChunk::Keyword(keyword)],
            Keyword::Indexed(keyword, index) => {
                vec![PathChunk::Keyword(keyword), PathChunk::Index(index)]
            }
            Keyword::Property(keyword, property) => {
                vec![PathChunk::Keyword(keyword), property.into()]
            }
            Keyword::Custom(name) => vec![name.into()],
        }
    }
}

/// One application of one schema node to one instance value.
struct Scope<'s, 'v> {
    schemas: &'s Schemas,
    schema: &'s Schema,
    instance: &'v Value,
    uneval: Unevaluated<'v>,
    errors: Vec<ValidationError>,
}

impl<'s, 'v> Scope<'s, 'v> {
    fn new(schemas: &'s Schemas, schema: &'s Schema, instance: &'v Value) -> Self {
        Scope {
            schemas,
            schema,
            instance,
            uneval: Unevaluated::for_instance(instance),
            errors: Vec::new(),
        }
    }

    fn apply(mut self, location: &PointerNode) -> Result<Unevaluated<'v>, ValidationError> {
        let schema = self.schema;

        if let Some(always) = schema.always {
            return if always {
                Ok(self.uneval)
            } else {
                Err(self.error(Keyword::None, ValidationErrorKind::FalseSchema, location))
            };
        }

        if !schema.types.is_empty() {
            let got = JsonType::of(self.instance);
            let integer_relaxation = got == JsonType::Number
                && schema.types.contains(JsonType::Integer)
                && match self.instance {
                    Value::Number(number) => numeric::is_integer(number),
                    _ => false,
                };
            if !schema.types.contains(got) && !integer_relaxation {
                // The remaining keywords would be meaningless for a value of
                // the wrong kind.
                return Err(self.error(
                    Keyword::Plain("type"),
                    ValidationErrorKind::Type {
                        got,
                        want: schema.types,
                    },
                    location,
                ));
            }
        }

        if let Some(constant) = &schema.constant {
            if !helpers::equal(self.instance, constant) {
                self.push_error(
                    Keyword::Plain("const"),
                    ValidationErrorKind::Constant {
                        expected: constant.clone(),
                    },
                    location,
                );
            }
        }

        if !schema.enum_.is_empty()
            && !schema
                .enum_
                .iter()
                .any(|option| helpers::equal(self.instance, option))
        {
            self.push_error(
                Keyword::Plain("enum"),
                ValidationErrorKind::Enum {
                    options: schema.enum_.clone(),
                },
                location,
            );
        }

        if let Some(format) = &schema.format {
            if !(format.func)(self.instance) {
                self.push_error(
                    Keyword::Plain("format"),
                    ValidationErrorKind::Format {
                        format: format.name.clone(),
                    },
                    location,
                );
            }
        }

        match self.instance {
            Value::Object(object) => self.apply_object(object, location),
            Value::Array(items) => self.apply_array(items, location),
            Value::String(string) => self.apply_string(string, location),
            Value::Number(number) => self.apply_number(number, location),
            _ => {}
        }

        self.apply_reference(location);
        self.apply_combinators(location);
        self.apply_unevaluated(location);
        self.apply_extensions(location);

        if self.errors.is_empty() {
            return Ok(self.uneval);
        }
        if self.errors.len() == 1 {
            if let Some(error) = self.errors.pop() {
                return Err(error);
            }
        }
        let mut group = self.error(Keyword::None, ValidationErrorKind::Group, location);
        group.causes = self.errors;
        Err(group)
    }

    fn apply_object(&mut self, object: &'v Map<String, Value>, location: &PointerNode) {
        let schema = self.schema;

        if let Some(limit) = schema.min_properties {
            if object.len() < limit {
                self.push_error(
                    Keyword::Plain("minProperties"),
                    ValidationErrorKind::MinProperties {
                        got: object.len(),
                        limit,
                    },
                    location,
                );
            }
        }

        if let Some(limit) = schema.max_properties {
            if object.len() > limit {
                self.push_error(
                    Keyword::Plain("maxProperties"),
                    ValidationErrorKind::MaxProperties {
                        got: object.len(),
                        limit,
                    },
                    location,
                );
            }
        }

        if !schema.required.is_empty() {
            let missing: Vec<String> = schema
                .required
                .iter()
                .filter(|name| !object.contains_key(name.as_str()))
                .cloned()
                .collect();
            if !missing.is_empty() {
                self.push_error(
                    Keyword::Plain("required"),
                    ValidationErrorKind::Required { missing },
                    location,
                );
            }
        }

        for (name, value) in object {
            if let Some(&subschema) = schema.properties.get(name) {
                if let Err(cause) =
                    self.validate_value(subschema, value, &location.push(name.as_str()))
                {
                    self.errors.push(cause);
                }
                // Evaluated whether the subschema matched or not.
                self.uneval.properties.remove(name.as_str());
            }
        }

        if let Some(subschema) = schema.property_names {
            for name in object.keys() {
                let as_value = Value::String(name.clone());
                if let Err(cause) =
                    self.validate_value(subschema, &as_value, &location.push(name.as_str()))
                {
                    let mut error = self.error(
                        Keyword::Plain("propertyNames"),
                        ValidationErrorKind::PropertyNames {
                            property: name.clone(),
                        },
                        &location.push(name.as_str()),
                    );
                    error.causes.push(cause);
                    self.errors.push(error);
                }
            }
        }

        if schema.regex_properties {
            for name in object.keys() {
                if Regex::new(name).is_err() {
                    self.push_error(
                        Keyword::Plain("regexProperties"),
                        ValidationErrorKind::RegexProperty { key: name.clone() },
                        location,
                    );
                }
            }
        }

        for (pattern, subschema) in &schema.pattern_properties {
            for (name, value) in object {
                if matches!(pattern.is_match(name), Ok(true)) {
                    if let Err(cause) =
                        self.validate_value(*subschema, value, &location.push(name.as_str()))
                    {
                        self.errors.push(cause);
                    }
                    self.uneval.properties.remove(name.as_str());
                }
            }
        }

        match schema.additional_properties {
            Additional::Absent => {}
            Additional::Allow(allowed) => {
                if !allowed && !self.uneval.properties.is_empty() {
                    let unexpected: Vec<String> = object
                        .keys()
                        .filter(|name| self.uneval.properties.contains(name.as_str()))
                        .cloned()
                        .collect();
                    self.push_error(
                        Keyword::Plain("additionalProperties"),
                        ValidationErrorKind::AdditionalProperties { unexpected },
                        location,
                    );
                }
                self.uneval.properties.clear();
            }
            Additional::Schema(subschema) => {
                for (name, value) in object {
                    if !self.uneval.properties.contains(name.as_str()) {
                        continue;
                    }
                    if let Err(cause) =
                        self.validate_value(subschema, value, &location.push(name.as_str()))
                    {
                        self.errors.push(cause);
                    }
                }
                self.uneval.properties.clear();
            }
        }

        for (property, dependency) in &schema.dependencies {
            if !object.contains_key(property) {
                continue;
            }
            match dependency {
                Dependency::Required(names) => {
                    let missing: Vec<String> = names
                        .iter()
                        .filter(|name| !object.contains_key(name.as_str()))
                        .cloned()
                        .collect();
                    if !missing.is_empty() {
                        self.push_error(
                            Keyword::Property("dependencies", property.clone()),
                            ValidationErrorKind::Dependency {
                                property: property.clone(),
                                missing,
                            },
                            location,
                        );
                    }
                }
                Dependency::Schema(subschema) => {
                    if let Err(cause) = self.apply_in_place(*subschema, location) {
                        self.errors.push(cause);
                    }
                }
            }
        }

        for (property, names) in &schema.dependent_required {
            if !object.contains_key(property) {
                continue;
            }
            let missing: Vec<String> = names
                .iter()
                .filter(|name| !object.contains_key(name.as_str()))
                .cloned()
                .collect();
            if !missing.is_empty() {
                self.push_error(
                    Keyword::Property("dependentRequired", property.clone()),
                    ValidationErrorKind::DependentRequired {
                        property: property.clone(),
                        missing,
                    },
                    location,
                );
            }
        }

        for (property, subschema) in &schema.dependent_schemas {
            if object.contains_key(property) {
                if let Err(cause) = self.apply_in_place(*subschema, location) {
                    self.errors.push(cause);
                }
            }
        }
    }

    fn apply_array(&mut self, items: &'v [Value], location: &PointerNode) {
        let schema = self.schema;

        if let Some(limit) = schema.min_items {
            if items.len() < limit {
                self.push_error(
                    Keyword::Plain("minItems"),
                    ValidationErrorKind::MinItems {
                        got: items.len(),
                        limit,
                    },
                    location,
                );
            }
        }

        if let Some(limit) = schema.max_items {
            if items.len() > limit {
                self.push_error(
                    Keyword::Plain("maxItems"),
                    ValidationErrorKind::MaxItems {
                        got: items.len(),
                        limit,
                    },
                    location,
                );
            }
        }

        if schema.unique_items {
            if let Some((first, second)) = helpers::find_duplicate(items) {
                self.push_error(
                    Keyword::Plain("uniqueItems"),
                    ValidationErrorKind::UniqueItems { first, second },
                    location,
                );
            }
        }

        match &schema.items {
            Items::None => {}
            Items::Single(subschema) => {
                for (index, item) in items.iter().enumerate() {
                    if let Err(cause) =
                        self.validate_value(*subschema, item, &location.push(index))
                    {
                        self.errors.push(cause);
                    }
                }
                if !items.is_empty() {
                    self.uneval.last_item = Some(items.len() - 1);
                }
            }
            Items::Tuple(list) => {
                let bound = items.len().min(list.len());
                for (index, (item, subschema)) in items.iter().zip(list).enumerate() {
                    if let Err(cause) =
                        self.validate_value(*subschema, item, &location.push(index))
                    {
                        self.errors.push(cause);
                    }
                }
                if bound > 0 {
                    self.uneval.last_item = Some(bound - 1);
                }
                match schema.additional_items {
                    Additional::Absent => {}
                    Additional::Allow(allowed) => {
                        if !allowed && items.len() > list.len() {
                            self.push_error(
                                Keyword::Plain("additionalItems"),
                                ValidationErrorKind::AdditionalItems { limit: list.len() },
                                location,
                            );
                        }
                        if allowed && !items.is_empty() {
                            self.uneval.last_item = Some(items.len() - 1);
                        }
                    }
                    Additional::Schema(subschema) => {
                        for (index, item) in items.iter().enumerate().skip(list.len()) {
                            if let Err(cause) =
                                self.validate_value(subschema, item, &location.push(index))
                            {
                                self.errors.push(cause);
                            }
                        }
                        if items.len() > list.len() {
                            self.uneval.last_item = Some(items.len() - 1);
                        }
                    }
                }
            }
        }

        if let Some(subschema) = schema.contains {
            let mut matched = Vec::new();
            let mut causes = Vec::new();
            for (index, item) in items.iter().enumerate() {
                match self.validate_value(subschema, item, &location.push(index)) {
                    Ok(()) => matched.push(index),
                    Err(cause) => causes.push(cause),
                }
            }
            if let Some(limit) = schema.min_contains {
                if matched.len() < limit {
                    let mut error = self.error(
                        Keyword::Plain("minContains"),
                        ValidationErrorKind::MinContains {
                            matched: matched.clone(),
                            limit,
                        },
                        location,
                    );
                    error.causes = causes;
                    self.errors.push(error);
                }
            } else if matched.is_empty() {
                let mut error = self.error(
                    Keyword::Plain("contains"),
                    ValidationErrorKind::Contains,
                    location,
                );
                error.causes = causes;
                self.errors.push(error);
            }
            if let Some(limit) = schema.max_contains {
                if matched.len() > limit {
                    self.push_error(
                        Keyword::Plain("maxContains"),
                        ValidationErrorKind::MaxContains { matched, limit },
                        location,
                    );
                }
            }
        }
    }

    fn apply_string(&mut self, string: &'v str, location: &PointerNode) {
        let schema = self.schema;
        let mut length = None;

        if let Some(limit) = schema.min_length {
            let got = *length.get_or_insert_with(|| bytecount::num_chars(string.as_bytes()));
            if got < limit {
                self.push_error(
                    Keyword::Plain("minLength"),
                    ValidationErrorKind::MinLength { got, limit },
                    location,
                );
            }
        }

        if let Some(limit) = schema.max_length {
            let got = *length.get_or_insert_with(|| bytecount::num_chars(string.as_bytes()));
            if got > limit {
                self.push_error(
                    Keyword::Plain("maxLength"),
                    ValidationErrorKind::MaxLength { got, limit },
                    location,
                );
            }
        }

        if let Some(pattern) = &schema.pattern {
            // A backtracking overrun counts as a mismatch.
            if !matches!(pattern.is_match(string), Ok(true)) {
                self.push_error(
                    Keyword::Plain("pattern"),
                    ValidationErrorKind::Pattern {
                        pattern: pattern.as_str().to_string(),
                    },
                    location,
                );
            }
        }

        let mut decoded = Cow::Borrowed(string.as_bytes());
        let mut decode_failed = false;
        if let Some(decoder) = &schema.content_encoding {
            match (decoder.func)(string) {
                Ok(bytes) => decoded = Cow::Owned(bytes),
                Err(error) => {
                    decode_failed = true;
                    self.push_error(
                        Keyword::Plain("contentEncoding"),
                        ValidationErrorKind::ContentEncoding {
                            encoding: decoder.name.clone(),
                            error,
                        },
                        location,
                    );
                }
            }
        }

        if let Some(media_type) = &schema.content_media_type {
            if !decode_failed {
                if let Err(error) = (media_type.func)(&decoded) {
                    self.push_error(
                        Keyword::Plain("contentMediaType"),
                        ValidationErrorKind::ContentMediaType {
                            media_type: media_type.name.clone(),
                            error,
                        },
                        location,
                    );
                }
            }
        }
    }

    fn apply_number(&mut self, number: &Number, location: &PointerNode) {
        let schema = self.schema;
        if schema.minimum.is_none()
            && schema.exclusive_minimum.is_none()
            && schema.maximum.is_none()
            && schema.exclusive_maximum.is_none()
            && schema.multiple_of.is_none()
        {
            return;
        }
        // One exact conversion serves every bound below.
        let Some(value) = numeric::rational(number) else {
            return;
        };

        if let Some(limit) = &schema.minimum {
            if value < *limit {
                self.push_error(
                    Keyword::Plain("minimum"),
                    ValidationErrorKind::Minimum {
                        limit: limit.clone(),
                    },
                    location,
                );
            }
        }

        if let Some(limit) = &schema.exclusive_minimum {
            if value <= *limit {
                self.push_error(
                    Keyword::Plain("exclusiveMinimum"),
                    ValidationErrorKind::ExclusiveMinimum {
                        limit: limit.clone(),
                    },
                    location,
                );
            }
        }

        if let Some(limit) = &schema.maximum {
            if value > *limit {
                self.push_error(
                    Keyword::Plain("maximum"),
                    ValidationErrorKind::Maximum {
                        limit: limit.clone(),
                    },
                    location,
                );
            }
        }

        if let Some(limit) = &schema.exclusive_maximum {
            if value >= *limit {
                self.push_error(
                    Keyword::Plain("exclusiveMaximum"),
                    ValidationErrorKind::ExclusiveMaximum {
                        limit: limit.clone(),
                    },
                    location,
                );
            }
        }

        if let Some(multiple_of) = &schema.multiple_of {
            let ratio = value.clone() / multiple_of.clone();
            if !numeric::is_integral(&ratio) {
                self.push_error(
                    Keyword::Plain("multipleOf"),
                    ValidationErrorKind::MultipleOf {
                        multiple_of: multiple_of.clone(),
                    },
                    location,
                );
            }
        }
    }

    fn apply_reference(&mut self, location: &PointerNode) {
        if let Some(target) = self.schema.ref_ {
            match self.probe(target, location) {
                Ok(child) => self.uneval.merge(&child),
                Err(cause) => {
                    let mut error = self.error(
                        Keyword::Plain("$ref"),
                        ValidationErrorKind::Reference {
                            location: self.schemas.get(target).absolute_location(),
                        },
                        location,
                    );
                    if matches!(&cause.kind, ValidationErrorKind::Group) {
                        error.causes = cause.causes;
                    } else {
                        error.causes.push(cause);
                    }
                    self.errors.push(error);
                }
            }
        }
    }

    fn apply_combinators(&mut self, location: &PointerNode) {
        let schema = self.schema;

        if let Some(subschema) = schema.not {
            // A successful probe is the failure here; its bookkeeping is
            // never propagated.
            if self.probe(subschema, location).is_ok() {
                self.push_error(Keyword::Plain("not"), ValidationErrorKind::Not, location);
            }
        }

        for (index, subschema) in schema.all_of.iter().enumerate() {
            match self.probe(*subschema, location) {
                Ok(child) => self.uneval.merge(&child),
                Err(cause) => {
                    let mut error = self.error(
                        Keyword::Indexed("allOf", index),
                        ValidationErrorKind::AllOf { index },
                        location,
                    );
                    error.causes.push(cause);
                    self.errors.push(error);
                }
            }
        }

        if !schema.any_of.is_empty() {
            let mut matched = false;
            let mut causes = Vec::new();
            // Every branch runs: each success contributes its bookkeeping.
            for subschema in &schema.any_of {
                match self.probe(*subschema, location) {
                    Ok(child) => {
                        matched = true;
                        self.uneval.merge(&child);
                    }
                    Err(cause) => causes.push(cause),
                }
            }
            if !matched {
                let mut error =
                    self.error(Keyword::Plain("anyOf"), ValidationErrorKind::AnyOf, location);
                error.causes = causes;
                self.errors.push(error);
            }
        }

        if !schema.one_of.is_empty() {
            let mut winner = None;
            let mut causes = Vec::new();
            for (index, subschema) in schema.one_of.iter().enumerate() {
                match self.probe(*subschema, location) {
                    Ok(child) => match winner {
                        None => {
                            winner = Some(index);
                            self.uneval.merge(&child);
                        }
                        Some(first) => {
                            self.push_error(
                                Keyword::Plain("oneOf"),
                                ValidationErrorKind::OneOfMultipleValid {
                                    first,
                                    second: index,
                                },
                                location,
                            );
                            break;
                        }
                    },
                    Err(cause) => {
                        if winner.is_none() {
                            causes.push(cause);
                        }
                    }
                }
            }
            if winner.is_none() {
                let mut error = self.error(
                    Keyword::Plain("oneOf"),
                    ValidationErrorKind::OneOfNotValid,
                    location,
                );
                error.causes = causes;
                self.errors.push(error);
            }
        }

        if let Some(condition) = schema.if_ {
            match self.probe(condition, location) {
                Ok(evaluated) => {
                    // The condition's outcome is silent, but a matching
                    // condition still counts as having evaluated.
                    self.uneval.merge(&evaluated);
                    if let Some(then) = schema.then {
                        match self.probe(then, location) {
                            Ok(child) => self.uneval.merge(&child),
                            Err(cause) => {
                                let mut error = self.error(
                                    Keyword::Plain("then"),
                                    ValidationErrorKind::Then,
                                    location,
                                );
                                error.causes.push(cause);
                                self.errors.push(error);
                            }
                        }
                    }
                }
                Err(_) => {
                    if let Some(else_) = schema.else_ {
                        match self.probe(else_, location) {
                            Ok(child) => self.uneval.merge(&child),
                            Err(cause) => {
                                let mut error = self.error(
                                    Keyword::Plain("else"),
                                    ValidationErrorKind::Else,
                                    location,
                                );
                                error.causes.push(cause);
                                self.errors.push(error);
                            }
                        }
                    }
                }
            }
        }
    }

    fn apply_unevaluated(&mut self, location: &PointerNode) {
        let schema = self.schema;

        if let (Some(subschema), Value::Object(object)) =
            (schema.unevaluated_properties, self.instance)
        {
            let mut unexpected = Vec::new();
            let mut causes = Vec::new();
            for (name, value) in object {
                if !self.uneval.properties.contains(name.as_str()) {
                    continue;
                }
                if let Err(cause) =
                    self.validate_value(subschema, value, &location.push(name.as_str()))
                {
                    unexpected.push(name.clone());
                    causes.push(cause);
                }
            }
            if !unexpected.is_empty() {
                let mut error = self.error(
                    Keyword::Plain("unevaluatedProperties"),
                    ValidationErrorKind::UnevaluatedProperties { unexpected },
                    location,
                );
                error.causes = causes;
                self.errors.push(error);
            }
            self.uneval.properties.clear();
        }

        if let (Some(subschema), Value::Array(items)) = (schema.unevaluated_items, self.instance)
        {
            let start = self.uneval.last_item.map_or(0, |last| last + 1);
            let mut unexpected = Vec::new();
            let mut causes = Vec::new();
            for (index, item) in items.iter().enumerate().skip(start) {
                if let Err(cause) = self.validate_value(subschema, item, &location.push(index)) {
                    unexpected.push(index);
                    causes.push(cause);
                }
            }
            if !unexpected.is_empty() {
                let mut error = self.error(
                    Keyword::Plain("unevaluatedItems"),
                    ValidationErrorKind::UnevaluatedItems { unexpected },
                    location,
                );
                error.causes = causes;
                self.errors.push(error);
            }
            if !items.is_empty() {
                self.uneval.last_item = Some(items.len() - 1);
            }
        }
    }

    fn apply_extensions(&mut self, location: &PointerNode) {
        for extension in &self.schema.extensions {
            let context = ExtensionContext::default();
            if let Err(message) = (extension.func)(&context, &extension.config, self.instance) {
                let error = self.error(
                    Keyword::Custom(extension.name.clone()),
                    ValidationErrorKind::Extension {
                        name: extension.name.clone(),
                        message,
                    },
                    location,
                );
                self.errors.push(error);
            }
        }
    }

    /// Apply a subschema to the same instance without recording anything;
    /// the caller decides what to do with the bookkeeping.
    fn probe(
        &self,
        index: SchemaIndex,
        location: &PointerNode,
    ) -> Result<Unevaluated<'v>, ValidationError> {
        Scope::new(self.schemas, self.schemas.get(index), self.instance).apply(location)
    }

    /// Apply a subschema to the same instance, folding its bookkeeping in on
    /// success.
    fn apply_in_place(
        &mut self,
        index: SchemaIndex,
        location: &PointerNode,
    ) -> Result<(), ValidationError> {
        let child = self.probe(index, location)?;
        self.uneval.merge(&child);
        Ok(())
    }

    /// Apply a subschema to a sub-value. Its bookkeeping belongs to its own
    /// scope and is discarded.
    fn validate_value(
        &self,
        index: SchemaIndex,
        value: &Value,
        location: &PointerNode,
    ) -> Result<(), ValidationError> {
        Scope::new(self.schemas, self.schemas.get(index), value)
            .apply(location)
            .map(|_| ())
    }

    fn error(
        &self,
        keyword: Keyword,
        kind: ValidationErrorKind,
        location: &PointerNode,
    ) -> ValidationError {
        let tag = keyword.tag();
        let schema_path = self.schema.pointer.extend_with(keyword.chunks());
        ValidationError {
            keyword: tag,
            kind,
            instance_path: JsonPointer::from(location),
            schema_path,
            causes: Vec::new(),
        }
    }

    fn push_error(&mut self, keyword: Keyword, kind: ValidationErrorKind, location: &PointerNode) {
        let error = self.error(keyword, kind, location);
        self.errors.push(error);
    }
}
