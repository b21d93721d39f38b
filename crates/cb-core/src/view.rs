//! # Builder Views
//!
//! A view is one navigable section of the builder: the global section or
//! a single stream. Stream views are identified by their *current*
//! position in the stream list. Positions shift when streams are inserted
//! or removed, so a `View::Stream` is never a stable identifier across
//! document edits.
//!
//! ## Wire Format
//!
//! Views serialize as the literal string `"global"` or a bare zero-based
//! integer, the tokens the form layer stores in its `view` field.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BuilderError;

/// Token used for the global view.
pub const GLOBAL_VIEW: &str = "global";

/// A navigable section of the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// The global configuration section.
    Global,
    /// The stream at this position in `formValues.streams`.
    Stream(usize),
}

impl View {
    /// Whether this view exists in a document with `stream_count` streams.
    pub fn exists_in(&self, stream_count: usize) -> bool {
        match self {
            View::Global => true,
            View::Stream(index) => *index < stream_count,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Global => f.write_str(GLOBAL_VIEW),
            View::Stream(index) => write!(f, "{index}"),
        }
    }
}

impl FromStr for View {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == GLOBAL_VIEW {
            return Ok(View::Global);
        }
        s.parse::<usize>()
            .map(View::Stream)
            .map_err(|_| BuilderError::InvalidView(s.to_string()))
    }
}

impl Serialize for View {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            View::Global => serializer.serialize_str(GLOBAL_VIEW),
            View::Stream(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

impl<'de> Deserialize<'de> for View {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Index(usize),
            Token(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Index(index) => Ok(View::Stream(index)),
            Repr::Token(token) if token == GLOBAL_VIEW => Ok(View::Global),
            Repr::Token(token) => Err(serde::de::Error::custom(format!(
                "invalid view '{token}': expected \"global\" or a stream index"
            ))),
        }
    }
}
