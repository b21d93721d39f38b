//! # JSON Schema Validation
//!
//! Runtime validation of builder data against JSON Schema definitions
//! (Draft 2020-12), exposed through the [`ViewSchema`] capability.
//!
//! ## Schema Resolution
//!
//! The builder ships three schema files:
//!
//! - `global.schema.json` — the global section.
//! - `stream.schema.json` — a single stream.
//! - `builder.schema.json` — the whole form values document, usually
//!   `$ref`-ing the other two.
//!
//! Cross-file `$ref`s are resolved by filename against the loaded
//! registry. Unknown URIs resolve to a permissive schema so validation
//! never reaches the network.
//!
//! ## First Failure
//!
//! [`JsonSchemaValidator`] stops at the first error the `jsonschema`
//! crate yields. For `required` failures the reported path is the
//! missing property itself, not the object that lacks it, so the form
//! can focus the empty field.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use cb_core::FieldPath;
use jsonschema::error::ValidationErrorKind;
use jsonschema::{Retrieve, Uri, ValidationOptions, Validator};
use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::{SchemaSet, SchemaViolation, ViewSchema};

/// Filename of the global section schema.
pub const GLOBAL_SCHEMA: &str = "global.schema.json";
/// Filename of the per-stream schema.
pub const STREAM_SCHEMA: &str = "stream.schema.json";
/// Filename of the full form values schema.
pub const BUILDER_SCHEMA: &str = "builder.schema.json";

/// Local retriever that resolves `$ref` URIs to schemas loaded in memory.
struct LocalSchemaRetriever {
    /// Map from URI string or bare filename to schema value.
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        tracing::debug!(uri = uri_str, "unresolved $ref, substituting permissive schema");
        Ok(serde_json::json!({}))
    }
}

/// Schemas loaded from disk or memory, indexed by filename.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    /// Map from schema filename (e.g., "stream.schema.json") to parsed JSON value.
    schemas: HashMap<String, Value>,
}

impl SchemaRegistry {
    /// Create a registry from already-parsed schemas.
    pub fn from_schemas(schemas: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            schemas: schemas.into_iter().collect(),
        }
    }

    /// Load every `*.schema.json` file in `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SchemaLoad` if the directory cannot be read or
    /// a schema file is not valid JSON.
    pub fn load_dir(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let schema_dir = schema_dir.as_ref();
        let mut schemas = HashMap::new();

        let entries = std::fs::read_dir(schema_dir).map_err(|e| SchemaError::SchemaLoad {
            schema_name: schema_dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        for entry in entries {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".schema.json") {
                continue;
            }
            let content = std::fs::read_to_string(&path)?;
            let value: Value = serde_json::from_str(&content).map_err(|e| SchemaError::SchemaLoad {
                schema_name: name.to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;
            schemas.insert(name.to_string(), value);
        }

        tracing::debug!(
            dir = %schema_dir.display(),
            count = schemas.len(),
            "loaded builder schemas"
        );
        Ok(Self { schemas })
    }

    /// Returns the names of all loaded schemas, sorted alphabetically.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up a loaded schema by filename.
    pub fn get_schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Options with every loaded schema reachable through `$ref`, by
    /// filename and by its own `$id`.
    fn build_options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);

        let mut schemas_by_uri: HashMap<String, Value> = HashMap::new();
        for (filename, value) in &self.schemas {
            if let Some(id) = value.get("$id").and_then(Value::as_str) {
                schemas_by_uri.insert(id.to_string(), value.clone());
            }
            schemas_by_uri.insert(filename.clone(), value.clone());
        }
        opts.with_retriever(LocalSchemaRetriever { schemas_by_uri });

        opts
    }

    /// Compile the schema stored under `schema_name`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SchemaLoad` if the schema is not registered and
    /// `SchemaError::ValidatorBuild` if it does not compile.
    pub fn compile(&self, schema_name: &str) -> Result<JsonSchemaValidator, SchemaError> {
        let schema_value = self
            .schemas
            .get(schema_name)
            .ok_or_else(|| SchemaError::SchemaLoad {
                schema_name: schema_name.to_string(),
                reason: "schema not found in registry".to_string(),
            })?;

        let validator =
            self.build_options()
                .build(schema_value)
                .map_err(|e| SchemaError::ValidatorBuild {
                    schema_name: schema_name.to_string(),
                    reason: e.to_string(),
                })?;

        Ok(JsonSchemaValidator {
            schema_name: schema_name.to_string(),
            validator,
        })
    }
}

/// A compiled JSON Schema reporting its first violation.
pub struct JsonSchemaValidator {
    schema_name: String,
    validator: Validator,
}

impl JsonSchemaValidator {
    /// Compile a standalone schema with no cross-file references.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidatorBuild` if the schema does not compile.
    pub fn from_value(schema_name: &str, schema: Value) -> Result<Self, SchemaError> {
        SchemaRegistry::from_schemas([(schema_name.to_string(), schema)]).compile(schema_name)
    }
}

impl fmt::Debug for JsonSchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaValidator")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl ViewSchema for JsonSchemaValidator {
    fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        let Some(error) = self.validator.iter_errors(value).next() else {
            return Ok(());
        };

        let mut path = FieldPath::from_json_pointer(&error.instance_path.to_string())
            .unwrap_or_default();
        if let ValidationErrorKind::Required { property } = &error.kind {
            if let Some(name) = property.as_str() {
                path.push_key(name);
            }
        }

        Err(SchemaViolation::new(path, error.to_string()))
    }
}

/// The three compiled builder schemas.
#[derive(Debug)]
pub struct BuilderSchemas {
    global: JsonSchemaValidator,
    stream: JsonSchemaValidator,
    document: JsonSchemaValidator,
}

impl BuilderSchemas {
    /// Compile the builder schemas from a registry.
    ///
    /// # Errors
    ///
    /// Fails if any of [`GLOBAL_SCHEMA`], [`STREAM_SCHEMA`] or
    /// [`BUILDER_SCHEMA`] is missing or does not compile.
    pub fn from_registry(registry: &SchemaRegistry) -> Result<Self, SchemaError> {
        Ok(Self {
            global: registry.compile(GLOBAL_SCHEMA)?,
            stream: registry.compile(STREAM_SCHEMA)?,
            document: registry.compile(BUILDER_SCHEMA)?,
        })
    }

    /// Load and compile the builder schemas from a directory.
    ///
    /// # Errors
    ///
    /// See [`SchemaRegistry::load_dir`] and [`BuilderSchemas::from_registry`].
    pub fn load(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaError> {
        Self::from_registry(&SchemaRegistry::load_dir(schema_dir)?)
    }

    /// Borrow the schemas as the set the error engine consumes.
    pub fn schema_set(&self) -> SchemaSet<'_> {
        SchemaSet {
            global: &self.global,
            stream: &self.stream,
            document: &self.document,
        }
    }
}
