//! JSON Schema to Avro conversion
//!
//! Accepts the JSON Schema produced by pydantic's `model_json_schema()` and
//! builds an Avro record schema:
//! - `$ref` targets in `$defs` or `definitions` become named records or enums
//! - properties missing from `required` become nullable with a null default
//! - `null` is always the first arm of a union
//!
//! # Example
//!
//! ```rust,ignore
//! use avrobridge_core::json_schema::{JsonSchemaOptions, json_schema_to_avro};
//!
//! let record = json_schema_to_avro(&schema, &JsonSchemaOptions::new())?;
//! println!("{}", serde_json::to_string_pretty(&record)?);
//! ```

mod builder;
mod nullability;

pub use builder::AvroSchemaBuilder;
pub use nullability::{null_to_first, set_nullability};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::avro::RecordSchema;
use crate::error::ConversionResult;

/// Options for JSON Schema conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSchemaOptions {
    /// Namespace of the root record; the schema title when unset
    pub namespace: Option<String>,
}

impl JsonSchemaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Convert a JSON Schema document into an Avro record schema
pub fn json_schema_to_avro(
    schema: &Value,
    options: &JsonSchemaOptions,
) -> ConversionResult<RecordSchema> {
    AvroSchemaBuilder::new(schema).build(options.namespace.as_deref())
}

/// Convert JSON Schema text into Avro schema JSON
pub fn json_schema_str_to_avro(
    text: &str,
    options: &JsonSchemaOptions,
) -> ConversionResult<Value> {
    let schema: Value = serde_json::from_str(text)?;
    Ok(json_schema_to_avro(&schema, options)?.to_value())
}
