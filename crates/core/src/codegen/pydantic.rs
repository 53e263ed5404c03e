//! Pydantic model generation
//!
//! Every Avro record becomes a `BaseModel` class and every enum a
//! `(str, Enum)` class. Nested types are written before the classes that use
//! them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Definition, Dialect, TypeMapper, python_literal};
use crate::avro::{AvroType, EnumSchema, Field, LogicalType, Primitive, RecordSchema};
use crate::error::ConversionResult;
use crate::naming::{EnumKeyStyle, convert_enum_key, python_identifier};
use crate::registry::TypeRegistry;

/// Imports written at the top of every generated module
pub const MODULE_HEADER: &str = "
from datetime import date, datetime, time
from decimal import Decimal
from enum import Enum
from typing import List, Optional, Dict, Union
from uuid import UUID

from pydantic import BaseModel, Field


";

const INT_BOUNDS: &str = "ge=-2**31, le=(2**31 - 1)";

/// Options for pydantic generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PydanticOptions {
    /// Transliteration applied to enum symbols
    pub enum_key_style: Option<EnumKeyStyle>,
}

impl PydanticOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the enum key style
    pub fn with_enum_key_style(mut self, style: Option<EnumKeyStyle>) -> Self {
        self.enum_key_style = style;
        self
    }
}

struct PydanticDialect<'a> {
    options: &'a PydanticOptions,
}

impl Dialect for PydanticDialect<'_> {
    fn primitive(&self, primitive: Primitive) -> Option<&'static str> {
        Some(match primitive {
            Primitive::Null => "None",
            Primitive::Boolean => "bool",
            Primitive::Int | Primitive::Long => "int",
            Primitive::Float | Primitive::Double => "float",
            Primitive::Bytes => "bytes",
            Primitive::String => "str",
        })
    }

    fn logical(&self, logical: &LogicalType) -> &'static str {
        match logical {
            LogicalType::Uuid => "UUID",
            LogicalType::Decimal { .. } => "Decimal",
            LogicalType::Date => "date",
            LogicalType::TimeMillis | LogicalType::TimeMicros => "time",
            LogicalType::TimestampMillis
            | LogicalType::TimestampMicros
            | LogicalType::LocalTimestampMillis
            | LogicalType::LocalTimestampMicros => "datetime",
        }
    }

    fn array(&self, item: &str) -> String {
        format!("List[{}]", item)
    }

    fn map(&self, value: &str, _registry: &mut TypeRegistry<String>) -> String {
        format!("Dict[str, {}]", value)
    }

    fn union(&self, arms: Vec<String>, has_null: bool) -> String {
        match (arms.len(), has_null) {
            (1, true) => format!("Optional[{}]", arms[0]),
            (1, false) => arms[0].clone(),
            (_, true) => format!("Optional[Union[{}]]", arms.join(",")),
            (_, false) => format!("Union[{}]", arms.join(",")),
        }
    }

    fn nullability(&self, token: String, _optional: bool) -> String {
        token
    }

    fn forward_reference(&self, name: &str) -> String {
        format!("\"{}\"", name)
    }

    fn enum_definition(&self, name: &str, schema: &EnumSchema) -> String {
        let mut lines = vec![format!("class {}(str, Enum):", name)];
        for symbol in &schema.symbols {
            let key = python_identifier(&convert_enum_key(symbol, self.options.enum_key_style));
            lines.push(format!("    {} = \"{}\"", key, symbol));
        }
        lines.join("\n") + "\n"
    }

    fn field(&self, _owner: &str, field: &Field, token: &str) -> String {
        let name = python_identifier(&field.name);
        let alias = (name != field.name).then(|| format!("alias=\"{}\"", field.name));

        if matches!(field.ty, AvroType::Primitive(Primitive::Int)) {
            let default = field
                .default
                .as_ref()
                .map(python_literal)
                .unwrap_or_else(|| "...".to_string());
            let arguments = match alias {
                Some(alias) => format!("{}, {}, {}", default, alias, INT_BOUNDS),
                None => format!("{}, {}", default, INT_BOUNDS),
            };
            return format!("    {}: {} = Field({})", name, token, arguments);
        }

        match (&field.default, alias) {
            (None, None) => format!("    {}: {}", name, token),
            (None, Some(alias)) => format!("    {}: {} = Field({})", name, token, alias),
            (Some(default), None) => {
                format!("    {}: {} = {}", name, token, python_literal(default))
            }
            (Some(default), Some(alias)) => format!(
                "    {}: {} = Field({}, {})",
                name,
                token,
                python_literal(default),
                alias
            ),
        }
    }

    fn record_definition(&self, name: &str, fields: Vec<String>) -> String {
        let body = if fields.is_empty() {
            "    pass".to_string()
        } else {
            fields.join("\n")
        };
        format!("class {}(BaseModel):\n{}\n", name, body)
    }
}

/// Generates pydantic model modules from Avro record schemas
#[derive(Debug, Clone, Default)]
pub struct PydanticGenerator {
    options: PydanticOptions,
}

impl PydanticGenerator {
    pub fn new(options: PydanticOptions) -> Self {
        Self { options }
    }

    /// Generate every class definition for a schema
    pub fn convert(&self, schema: &RecordSchema) -> ConversionResult<Vec<Definition>> {
        let dialect = PydanticDialect {
            options: &self.options,
        };
        TypeMapper::new(dialect).convert(schema)
    }

    /// Generate a complete Python module for a schema
    pub fn generate(&self, schema: &RecordSchema) -> ConversionResult<String> {
        let definitions = self.convert(schema)?;
        tracing::debug!(
            "Generated {} pydantic classes for {}",
            definitions.len(),
            schema.name
        );
        Ok(render_module(&definitions))
    }

    /// Parse an `.avsc` document and generate its module
    pub fn generate_from_value(&self, schema: &Value) -> ConversionResult<String> {
        let schema = crate::avro::parse_schema(schema)?;
        self.generate(&schema)
    }
}

/// Assemble generated classes into module text
pub fn render_module(definitions: &[Definition]) -> String {
    let classes: Vec<&str> = definitions.iter().map(|d| d.body.as_str()).collect();
    format!("{}{}", MODULE_HEADER, classes.join("\n\n"))
}
