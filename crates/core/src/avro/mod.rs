//! Avro schema model
//!
//! Parses `.avsc` documents into a typed tree and serializes that tree back to
//! JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use avrobridge_core::avro::parse_schema_str;
//!
//! let schema = parse_schema_str(r#"{"type": "record", "name": "Test", "fields": []}"#)?;
//! assert_eq!(schema.name, "Test");
//! ```

mod parse;
mod types;

pub use parse::{parse_schema, parse_schema_str, parse_type};
pub use types::{
    AvroType, EnumSchema, Field, FixedSchema, LogicalType, Primitive, RecordSchema,
    short_name,
};
