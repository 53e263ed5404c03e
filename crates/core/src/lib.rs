//! Avrobridge Core - schema conversion between Avro, pydantic and GraphQL
//!
//! Provides:
//! - Avro schema parsing into a typed tree
//! - Avro to pydantic model generation
//! - Avro to GraphQL SDL generation
//! - JSON Schema (pydantic `model_json_schema`) to Avro conversion
//!
//! Every conversion is a pure function of its input. Each top-level call owns
//! a fresh [`TypeRegistry`] of named types.

pub mod avro;
pub mod codegen;
pub mod error;
pub mod json_schema;
pub mod naming;
pub mod registry;

pub use avro::{AvroType, Field, RecordSchema, parse_schema, parse_schema_str};
pub use codegen::{
    Definition, GraphqlConfig, GraphqlGenerator, PydanticGenerator, PydanticOptions,
};
pub use error::{ConversionError, ConversionResult};
pub use json_schema::{JsonSchemaOptions, json_schema_to_avro};
pub use naming::EnumKeyStyle;
pub use registry::TypeRegistry;

use serde_json::Value;

/// Generate a pydantic module from an `.avsc` document
pub fn avsc_to_pydantic(
    schema: &Value,
    enum_key_style: Option<EnumKeyStyle>,
) -> ConversionResult<String> {
    PydanticGenerator::new(PydanticOptions::new().with_enum_key_style(enum_key_style))
        .generate_from_value(schema)
}

/// Generate a GraphQL SDL document from an `.avsc` document
pub fn avsc_to_graphql(schema: &Value, config: &GraphqlConfig) -> ConversionResult<String> {
    GraphqlGenerator::new(config.clone()).generate_from_value(schema)
}
