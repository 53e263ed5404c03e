//! GraphQL SDL generation
//!
//! Records become object types and enums become GraphQL enums. Non-null types
//! carry a trailing `!`. Maps have no GraphQL counterpart, so each map value
//! type gets a `<Value>MapTuple` object with `key` and `value` fields and the
//! map itself is a list of tuples.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Definition, Dialect, TypeMapper, python_literal};
use crate::avro::{EnumSchema, Field, LogicalType, Primitive, RecordSchema, parse_schema};
use crate::error::ConversionResult;
use crate::naming::camel_type;
use crate::registry::TypeRegistry;

/// Comment written at the top of every generated document
pub const DOCUMENT_HEADER: &str = "# GENERATED GRAPHQL USING avrobridge, DO NOT MANUALLY EDIT";

/// Directive annotations attached to generated fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphqlConfig {
    /// Directive text per field name, applied in every type
    pub field_directives: HashMap<String, String>,
    /// Directive text per type name, then per field name
    pub type_directives: HashMap<String, HashMap<String, String>>,
}

impl GraphqlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration document. JSON is tried first, then YAML.
    pub fn parse(content: &str) -> ConversionResult<Self> {
        match serde_json::from_str(content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::debug!("Configuration is not JSON ({}), trying YAML", e);
                Ok(serde_yaml::from_str(content)?)
            }
        }
    }

    /// Add a directive for a field name in every type
    pub fn with_field_directive(
        mut self,
        field: impl Into<String>,
        directive: impl Into<String>,
    ) -> Self {
        self.field_directives.insert(field.into(), directive.into());
        self
    }

    /// Add a directive for one field of one type
    pub fn with_type_directive(
        mut self,
        type_name: impl Into<String>,
        field: impl Into<String>,
        directive: impl Into<String>,
    ) -> Self {
        self.type_directives
            .entry(type_name.into())
            .or_default()
            .insert(field.into(), directive.into());
        self
    }

    /// Directive suffix for a field, with a leading space per directive
    pub fn directives_for(&self, type_name: &str, field_name: &str) -> String {
        let mut suffix = String::new();
        if let Some(directive) = self.field_directives.get(field_name) {
            suffix.push(' ');
            suffix.push_str(directive);
        }
        if let Some(directive) = self
            .type_directives
            .get(type_name)
            .and_then(|fields| fields.get(field_name))
        {
            suffix.push(' ');
            suffix.push_str(directive);
        }
        suffix
    }
}

struct GraphqlDialect<'a> {
    config: &'a GraphqlConfig,
}

impl Dialect for GraphqlDialect<'_> {
    fn primitive(&self, primitive: Primitive) -> Option<&'static str> {
        match primitive {
            Primitive::Null => None,
            Primitive::String | Primitive::Bytes => Some("String"),
            Primitive::Int => Some("Int"),
            Primitive::Long | Primitive::Float | Primitive::Double => Some("Float"),
            Primitive::Boolean => Some("Boolean"),
        }
    }

    fn logical(&self, logical: &LogicalType) -> &'static str {
        match logical {
            LogicalType::Uuid => "ID",
            LogicalType::Decimal { .. } => "Float",
            LogicalType::Date => "String",
            LogicalType::TimeMillis
            | LogicalType::TimeMicros
            | LogicalType::TimestampMillis
            | LogicalType::TimestampMicros
            | LogicalType::LocalTimestampMillis
            | LogicalType::LocalTimestampMicros => "Int",
        }
    }

    fn array(&self, item: &str) -> String {
        format!("[{}]", item)
    }

    fn map(&self, value: &str, registry: &mut TypeRegistry<String>) -> String {
        let tuple = format!("{}MapTuple", camel_type(value));
        if !registry.has(&tuple) {
            let definition = [
                format!("type {} {{", tuple),
                "    key: String".to_string(),
                format!("    value: [{}]", value),
                "}".to_string(),
            ]
            .join("\n")
                + "\n";
            registry.add(&tuple, definition);
        }
        format!("[{}]", tuple)
    }

    fn union(&self, arms: Vec<String>, _has_null: bool) -> String {
        arms.join(" | ")
    }

    fn nullability(&self, token: String, optional: bool) -> String {
        if optional {
            token.strip_suffix('!').map(str::to_string).unwrap_or(token)
        } else {
            format!("{}!", token)
        }
    }

    fn enum_definition(&self, name: &str, schema: &EnumSchema) -> String {
        let mut lines = vec![format!("enum {} {{", name)];
        lines.extend(schema.symbols.iter().map(|symbol| format!("    {}", symbol)));
        lines.push("}".to_string());
        lines.join("\n") + "\n"
    }

    fn field(&self, owner: &str, field: &Field, token: &str) -> String {
        let line = format!(
            "    {}: {}{}",
            field.name,
            token,
            self.config.directives_for(owner, &field.name)
        );
        match &field.default {
            Some(default) if !default.is_null() => format!(
                "    # use '{}' in queries, defaults not supported in graphql schemas\n{}",
                python_literal(default),
                line
            ),
            _ => line,
        }
    }

    fn record_definition(&self, name: &str, fields: Vec<String>) -> String {
        let mut lines = vec![format!("type {} {{", name)];
        if fields.is_empty() {
            lines.push("    _void: String".to_string());
        }
        lines.extend(fields);
        lines.push("}".to_string());
        lines.join("\n") + "\n"
    }
}

/// Generates GraphQL type definitions from Avro record schemas
#[derive(Debug, Clone, Default)]
pub struct GraphqlGenerator {
    config: GraphqlConfig,
}

impl GraphqlGenerator {
    pub fn new(config: GraphqlConfig) -> Self {
        Self { config }
    }

    /// Generate every type definition for a schema
    pub fn convert(&self, schema: &RecordSchema) -> ConversionResult<Vec<Definition>> {
        let dialect = GraphqlDialect {
            config: &self.config,
        };
        TypeMapper::new(dialect).convert(schema)
    }

    /// Generate a complete SDL document for a schema
    pub fn generate(&self, schema: &RecordSchema) -> ConversionResult<String> {
        let definitions = self.convert(schema)?;
        Ok(render_document(&definitions))
    }

    /// Parse an `.avsc` document and generate its SDL
    pub fn generate_from_value(&self, schema: &Value) -> ConversionResult<String> {
        self.generate(&parse_schema(schema)?)
    }

    /// Merge the definitions of several `.avsc` documents
    ///
    /// Documents whose top-level type is an enum are skipped; they are expected
    /// to be pulled in by the records referencing them. When two documents
    /// define the same name, the later definition wins.
    pub fn convert_many<'a, I>(&self, documents: I) -> ConversionResult<Vec<Definition>>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut merged: TypeRegistry<Definition> = TypeRegistry::new();
        for document in documents {
            if document.get("type").and_then(Value::as_str) == Some("enum") {
                let name = document.get("name").and_then(Value::as_str).unwrap_or("?");
                tracing::debug!("Skipping top-level enum {}", name);
                continue;
            }
            for definition in self.convert(&parse_schema(document)?)? {
                merged.add(&definition.name.clone(), definition);
            }
        }
        Ok(merged.into_definitions())
    }
}

/// Assemble definitions into an SDL document, sorted by their text
pub fn render_document(definitions: &[Definition]) -> String {
    let mut bodies: Vec<&str> = definitions.iter().map(|d| d.body.as_str()).collect();
    bodies.sort_unstable();
    format!("{}\n\n{}", DOCUMENT_HEADER, bodies.join("\n\n"))
}
