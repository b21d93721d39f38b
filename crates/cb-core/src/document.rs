//! # Builder Document
//!
//! The document edited by the connector builder: one `global` section and
//! an ordered list of `streams`. Section contents are free-form JSON; only
//! the two top-level containers are checked here; everything below them
//! belongs to the schema layer.
//!
//! ## Invariant
//!
//! A [`BuilderFormValues`] always wraps a JSON object whose `global` member
//! is an object and whose `streams` member is an array. Stream position in
//! that array is the stream's view index.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::BuilderError;
use crate::view::View;

/// Values the user entered for testing, keyed by config key.
pub type TestingValues = Map<String, Value>;

/// Form values of the builder: the global section plus ordered streams.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BuilderFormValues(Value);

impl BuilderFormValues {
    /// Wrap a JSON document after checking its top-level shape.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDocument` if `value` is not an object,
    /// if `global` is missing or not an object, or if `streams` is missing
    /// or not an array.
    pub fn new(value: Value) -> Result<Self, BuilderError> {
        let object = value
            .as_object()
            .ok_or_else(|| BuilderError::InvalidDocument("form values must be an object".into()))?;
        if !object.get("global").is_some_and(Value::is_object) {
            return Err(BuilderError::InvalidDocument(
                "'global' must be an object".into(),
            ));
        }
        if !object.get("streams").is_some_and(Value::is_array) {
            return Err(BuilderError::InvalidDocument(
                "'streams' must be an array".into(),
            ));
        }
        Ok(Self(value))
    }

    /// The global configuration section.
    pub fn global(&self) -> &Value {
        &self.0["global"]
    }

    /// All stream sections in view order.
    pub fn streams(&self) -> &[Value] {
        self.0
            .get("streams")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The stream at `index`, if it exists.
    pub fn stream(&self, index: usize) -> Option<&Value> {
        self.streams().get(index)
    }

    /// Number of streams, which bounds the valid stream views.
    pub fn stream_count(&self) -> usize {
        self.streams().len()
    }

    /// The section backing `view`, or `None` for a stream index past the end.
    pub fn slice(&self, view: View) -> Option<&Value> {
        if !view.exists_in(self.stream_count()) {
            return None;
        }
        match view {
            View::Global => Some(self.global()),
            View::Stream(index) => self.stream(index),
        }
    }

    /// The whole document as JSON.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl<'de> Deserialize<'de> for BuilderFormValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        BuilderFormValues::new(value).map_err(serde::de::Error::custom)
    }
}

/// Everything the form layer holds that validation reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderState {
    /// The document being edited.
    pub form_values: BuilderFormValues,
    /// Values entered for test reads; absent means none.
    #[serde(default)]
    pub testing_values: TestingValues,
}

impl BuilderState {
    /// Build a state with no testing values.
    pub fn new(form_values: BuilderFormValues) -> Self {
        Self {
            form_values,
            testing_values: TestingValues::new(),
        }
    }

    /// Attach testing values.
    pub fn with_testing_values(mut self, testing_values: TestingValues) -> Self {
        self.testing_values = testing_values;
        self
    }
}
