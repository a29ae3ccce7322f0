//! JSON pointers into schemas and validated instances.
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::{fmt, fmt::Write, slice::Iter};

/// JSON Pointer as a wrapper around individual path components.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct JsonPointer(Vec<PathChunk>);

impl JsonPointer {
    /// Return an iterator over the underlying vector of path components.
    pub fn iter(&self) -> Iter<'_, PathChunk> {
        self.0.iter()
    }

    /// Take the last pointer chunk.
    #[must_use]
    #[inline]
    pub fn last(&self) -> Option<&PathChunk> {
        self.0.last()
    }

    pub(crate) fn clone_with(&self, chunk: impl Into<PathChunk>) -> Self {
        let mut new = self.clone();
        new.0.push(chunk.into());
        new
    }

    pub(crate) fn extend_with(&self, chunks: impl IntoIterator<Item = PathChunk>) -> Self {
        let mut new = self.clone();
        new.0.extend(chunks);
        new
    }

    /// The pointer rendered as a URI fragment: each token gets the `~0`/`~1`
    /// treatment first and is then percent-encoded.
    #[must_use]
    pub fn uri_fragment(&self) -> String {
        let mut out = String::new();
        for chunk in &self.0 {
            out.push('/');
            let token = match chunk {
                PathChunk::Property(value) => escape(value),
                PathChunk::Index(idx) => idx.to_string(),
                PathChunk::Keyword(keyword) => (*keyword).to_string(),
            };
            out.push_str(&utf8_percent_encode(&token, FRAGMENT).to_string());
        }
        out
    }
}

// https://url.spec.whatwg.org/#fragment-percent-encode-set
const FRAGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// Apply the JSON Pointer token escapes: `~` to `~0`, then `/` to `~1`.
#[must_use]
pub fn escape(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

impl serde::Serialize for JsonPointer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.0 {
            f.write_char('/')?;
            match chunk {
                PathChunk::Property(value) => {
                    for ch in value.chars() {
                        match ch {
                            '/' => f.write_str("~1")?,
                            '~' => f.write_str("~0")?,
                            _ => f.write_char(ch)?,
                        }
                    }
                }
                PathChunk::Index(idx) => f.write_str(itoa::Buffer::new().format(*idx))?,
                PathChunk::Keyword(keyword) => f.write_str(keyword)?,
            }
        }
        Ok(())
    }
}

/// A key within a JSON object, an index within a JSON array, or a schema
/// keyword. A sequence of chunks is a valid path within a JSON value.
///
/// Keeping indexes and static keywords as their own variants avoids
/// converting them to strings while errors are being built.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathChunk {
    /// Property name within a JSON object.
    Property(Box<str>),
    /// Index within a JSON array.
    Index(usize),
    /// JSON Schema keyword.
    Keyword(&'static str),
}

/// A borrowed path segment, used while walking an instance.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Segment<'a> {
    /// Property name within a JSON object.
    Property(&'a str),
    /// Index within a JSON array.
    Index(usize),
}

/// A node in a linked list representing the instance pointer during
/// validation.
///
/// Each node holds one segment and a reference to its parent, so descending
/// into a sub-value costs no allocation; the full pointer is only
/// materialized when an error is reported.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PointerNode<'a, 'b> {
    pub(crate) segment: Segment<'a>,
    pub(crate) parent: Option<&'b PointerNode<'b, 'a>>,
}

impl Default for PointerNode<'_, '_> {
    fn default() -> Self {
        PointerNode::new()
    }
}

impl<'a, 'b> PointerNode<'a, 'b> {
    /// Create a root node.
    #[must_use]
    pub const fn new() -> Self {
        PointerNode {
            // Never rendered: the root has no parent, and only nodes with a
            // parent contribute a segment.
            segment: Segment::Index(0),
            parent: None,
        }
    }

    /// Push a new segment onto the pointer.
    #[inline]
    #[must_use]
    pub fn push(&'a self, segment: impl Into<Segment<'a>>) -> Self {
        PointerNode {
            segment: segment.into(),
            parent: Some(self),
        }
    }

    fn to_vec(&'a self) -> Vec<PathChunk> {
        // Walk up once to learn the depth, then collect tail-first.
        let mut capacity = 0;
        let mut head = self;
        while let Some(next) = head.parent {
            head = next;
            capacity += 1;
        }
        let mut buffer = Vec::with_capacity(capacity);
        let mut head = self;
        if head.parent.is_some() {
            buffer.push(head.segment.into());
        }
        while let Some(next) = head.parent {
            head = next;
            if head.parent.is_some() {
                buffer.push(head.segment.into());
            }
        }
        buffer.reverse();
        buffer
    }
}

impl IntoIterator for JsonPointer {
    type Item = PathChunk;
    type IntoIter = <Vec<PathChunk> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonPointer {
    type Item = &'a PathChunk;
    type IntoIter = Iter<'a, PathChunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<String> for PathChunk {
    #[inline]
    fn from(value: String) -> Self {
        PathChunk::Property(value.into_boxed_str())
    }
}

impl From<&'static str> for PathChunk {
    #[inline]
    fn from(value: &'static str) -> Self {
        PathChunk::Keyword(value)
    }
}

impl From<usize> for PathChunk {
    #[inline]
    fn from(value: usize) -> Self {
        PathChunk::Index(value)
    }
}

impl<'a> From<&'a str> for Segment<'a> {
    #[inline]
    fn from(value: &'a str) -> Segment<'a> {
        Segment::Property(value)
    }
}

impl From<usize> for Segment<'_> {
    #[inline]
    fn from(value: usize) -> Self {
        Segment::Index(value)
    }
}

impl<'a> From<Segment<'a>> for PathChunk {
    #[inline]
    fn from(value: Segment<'a>) -> Self {
        match value {
            Segment::Property(value) => PathChunk::Property(value.into()),
            Segment::Index(value) => PathChunk::Index(value),
        }
    }
}

impl<'a, 'b> From<&'a PointerNode<'a, 'b>> for JsonPointer {
    #[inline]
    fn from(path: &'a PointerNode<'a, 'b>) -> Self {
        JsonPointer(path.to_vec())
    }
}

impl From<&[PathChunk]> for JsonPointer {
    #[inline]
    fn from(path: &[PathChunk]) -> Self {
        JsonPointer(path.to_vec())
    }
}

impl From<&[&str]> for JsonPointer {
    #[inline]
    fn from(path: &[&str]) -> Self {
        JsonPointer(
            path.iter()
                .map(|item| PathChunk::Property((*item).into()))
                .collect(),
        )
    }
}
