//! Code generation from Avro schemas
//!
//! Both output languages share one traversal, [`TypeMapper`]. It walks the
//! [`AvroType`] tree, keeps the [`TypeRegistry`] of named definitions, and
//! asks a [`Dialect`] to render leaves, wrappers and definitions.
//!
//! # Example
//!
//! ```rust,ignore
//! use avrobridge_core::avro::parse_schema_str;
//! use avrobridge_core::codegen::{PydanticGenerator, PydanticOptions};
//!
//! let schema = parse_schema_str(avsc)?;
//! let module = PydanticGenerator::new(PydanticOptions::default()).generate(&schema)?;
//! ```

pub mod graphql;
mod literal;
pub mod pydantic;

pub use graphql::{GraphqlConfig, GraphqlGenerator};
pub use literal::python_literal;
pub use pydantic::{PydanticGenerator, PydanticOptions};

use crate::avro::{AvroType, EnumSchema, Field, LogicalType, Primitive, RecordSchema, short_name};
use crate::error::{ConversionError, ConversionResult};
use crate::registry::TypeRegistry;

/// A generated named definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub body: String,
}

/// Rendering rules of one output language
pub trait Dialect {
    /// Scalar name for a primitive, `None` if the language has no equivalent
    fn primitive(&self, primitive: Primitive) -> Option<&'static str>;

    fn logical(&self, logical: &LogicalType) -> &'static str;

    fn array(&self, item: &str) -> String;

    /// Render a map. Dialects without a native map may register helper types.
    fn map(&self, value: &str, registry: &mut TypeRegistry<String>) -> String;

    /// Combine the rendered non-null arms of a union
    fn union(&self, arms: Vec<String>, has_null: bool) -> String;

    /// Apply optionality to a non-union token
    fn nullability(&self, token: String, optional: bool) -> String;

    /// Reference to a named type whose definition is still being generated
    fn forward_reference(&self, name: &str) -> String {
        name.to_string()
    }

    /// Render an enum under its short `name`
    fn enum_definition(&self, name: &str, schema: &EnumSchema) -> String;

    /// Render one field entry of `owner`; `token` is the rendered field type
    fn field(&self, owner: &str, field: &Field, token: &str) -> String;

    fn record_definition(&self, name: &str, fields: Vec<String>) -> String;
}

/// Recursive Avro traversal shared by all dialects
pub struct TypeMapper<D: Dialect> {
    dialect: D,
    registry: TypeRegistry<String>,
}

impl<D: Dialect> TypeMapper<D> {
    /// Create a mapper with an empty registry
    pub fn new(dialect: D) -> Self {
        Self {
            dialect,
            registry: TypeRegistry::new(),
        }
    }

    /// Convert a root record, returning every named definition in the order
    /// it was completed. Nested types come before the types using them.
    pub fn convert(mut self, schema: &RecordSchema) -> ConversionResult<Vec<Definition>> {
        self.registry.clear();
        self.record(schema)?;

        let names: Vec<String> = self.registry.names().map(str::to_string).collect();
        let bodies = self.registry.into_definitions();
        Ok(names
            .into_iter()
            .zip(bodies)
            .map(|(name, body)| Definition { name, body })
            .collect())
    }

    /// Render a type reference. `optional` is set for arms of a nullable union.
    pub fn render(&mut self, ty: &AvroType, optional: bool) -> ConversionResult<String> {
        let token = match ty {
            AvroType::Union(arms) => return self.union(arms),
            AvroType::Primitive(primitive) => self
                .dialect
                .primitive(*primitive)
                .ok_or_else(|| ConversionError::UnsupportedType(primitive.to_string()))?
                .to_string(),
            AvroType::Named(name) => self.reference(name)?,
            AvroType::Logical { logical, .. } => self.dialect.logical(logical).to_string(),
            AvroType::Enum(schema) => self.enumeration(schema),
            AvroType::Fixed(schema) => match &schema.logical {
                Some(logical) => self.dialect.logical(logical).to_string(),
                None => {
                    return Err(ConversionError::UnsupportedType(format!(
                        "fixed {}",
                        schema.name
                    )));
                }
            },
            AvroType::Array(items) => {
                let item = self.render(items, false)?;
                self.dialect.array(&item)
            }
            AvroType::Map(values) => {
                let value = self.render(values, false)?;
                self.dialect.map(&value, &mut self.registry)
            }
            AvroType::Record(schema) => self.record(schema)?,
        };
        Ok(self.dialect.nullability(token, optional))
    }

    fn union(&mut self, arms: &[AvroType]) -> ConversionResult<String> {
        let has_null = arms.iter().any(AvroType::is_null);
        let rendered = arms
            .iter()
            .filter(|arm| !arm.is_null())
            .map(|arm| self.render(arm, has_null))
            .collect::<ConversionResult<Vec<_>>>()?;

        if rendered.is_empty() {
            return self.render(&AvroType::Primitive(Primitive::Null), true);
        }
        Ok(self.dialect.union(rendered, has_null))
    }

    fn reference(&self, name: &str) -> ConversionResult<String> {
        let short = short_name(name);
        if self.registry.is_pending(short) {
            tracing::debug!("Forward reference to {}", short);
            return Ok(self.dialect.forward_reference(short));
        }
        if self.registry.has(short) {
            return Ok(short.to_string());
        }
        Err(ConversionError::UnsupportedType(name.to_string()))
    }

    fn enumeration(&mut self, schema: &EnumSchema) -> String {
        let name = short_name(&schema.name).to_string();
        if self.registry.has(&name) {
            tracing::debug!("Reusing enum {}", name);
        } else {
            let definition = self.dialect.enum_definition(&name, schema);
            self.registry.add(&name, definition);
        }
        name
    }

    fn record(&mut self, schema: &RecordSchema) -> ConversionResult<String> {
        let name = short_name(&schema.name).to_string();
        if self.registry.has(&name) {
            tracing::debug!("Reusing record {}", name);
            return self.reference(&name);
        }

        self.registry.reserve(&name);
        let mut fields = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            let token = self.render(&field.ty, false)?;
            fields.push(self.dialect.field(&name, field, &token));
        }

        let definition = self.dialect.record_definition(&name, fields);
        self.registry.add(&name, definition);
        Ok(name)
    }
}
