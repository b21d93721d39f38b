//! # Field Paths
//!
//! A [`FieldPath`] addresses one field inside the builder state. It is
//! the unit of exchange between validators (which report where a value
//! failed) and the navigation sink (which scrolls to a field).
//!
//! ## Notation
//!
//! Paths render in dotted notation: `streams.1.requestOptions.url`.
//! Parsing accepts dotted notation, bracketed indices
//! (`streams[1].requestOptions.url`), and RFC 6901 JSON Pointers
//! (`/streams/1/requestOptions/url`). Digit-only segments are array
//! indices in every notation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BuilderError;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object property name.
    Key(String),
    /// An array position.
    Index(usize),
}

impl PathSegment {
    fn from_token(token: &str) -> Self {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = token.parse::<usize>() {
                return PathSegment::Index(index);
            }
        }
        PathSegment::Key(token.to_string())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Path to a field inside the builder state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path, addressing the value it is resolved against.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from pre-split segments.
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Parse dotted or bracketed notation.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidPath` for empty segments (`a..b`),
    /// unterminated brackets, or non-numeric bracket contents.
    pub fn parse(path: &str) -> Result<Self, BuilderError> {
        let invalid = |reason: &str| BuilderError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        if path.is_empty() {
            return Ok(Self { segments });
        }

        for part in path.split('.') {
            let (head, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            if head.is_empty() && rest.is_empty() {
                return Err(invalid("empty segment"));
            }
            if !head.is_empty() {
                segments.push(PathSegment::from_token(head));
            }
            while !rest.is_empty() {
                let close = rest.find(']').ok_or_else(|| invalid("unterminated '['"))?;
                match PathSegment::from_token(&rest[1..close]) {
                    PathSegment::Index(index) => segments.push(PathSegment::Index(index)),
                    PathSegment::Key(_) => return Err(invalid("bracket segment must be an index")),
                }
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(invalid("unexpected text after ']'"));
                }
            }
        }

        Ok(Self { segments })
    }

    /// Parse an RFC 6901 JSON Pointer such as `/streams/1/url`.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidPath` if a non-empty pointer does not
    /// start with `/`.
    pub fn from_json_pointer(pointer: &str) -> Result<Self, BuilderError> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        let body = pointer.strip_prefix('/').ok_or_else(|| BuilderError::InvalidPath {
            path: pointer.to_string(),
            reason: "JSON pointer must start with '/'".to_string(),
        })?;
        let segments = body
            .split('/')
            .map(|token| PathSegment::from_token(&token.replace("~1", "/").replace("~0", "~")))
            .collect();
        Ok(Self { segments })
    }

    /// Returns the segments in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns true for the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append an object key.
    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    /// Append an array index.
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    /// Returns `self` followed by `other`.
    pub fn join(&self, other: &FieldPath) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        FieldPath { segments }
    }

    /// Returns `other` followed by `self`.
    pub fn prefixed_by(&self, prefix: &FieldPath) -> FieldPath {
        prefix.join(self)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        FieldPath::parse(&text).map_err(serde::de::Error::custom)
    }
}
