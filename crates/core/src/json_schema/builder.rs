//! Avro record construction from a JSON Schema document

use serde_json::{Map, Value};

use super::nullability::{null_to_first, set_nullability};
use crate::avro::{AvroType, EnumSchema, Field, LogicalType, Primitive, RecordSchema};
use crate::error::{ConversionError, ConversionResult};
use crate::registry::TypeRegistry;

const DEFINITION_TABLES: [&str; 2] = ["$defs", "definitions"];

/// Walks one JSON Schema document and builds the equivalent Avro types
///
/// The builder owns the registry of definitions already emitted, so it must
/// not be reused across documents.
pub struct AvroSchemaBuilder<'a> {
    root: &'a Value,
    seen: TypeRegistry<AvroType>,
}

impl<'a> AvroSchemaBuilder<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self {
            root,
            seen: TypeRegistry::new(),
        }
    }

    /// Build the record for the document root
    pub fn build(mut self, namespace: Option<&str>) -> ConversionResult<RecordSchema> {
        let title = self
            .root
            .get("title")
            .and_then(Value::as_str)
            .ok_or_else(|| ConversionError::SchemaShape("title is required".to_string()))?
            .to_string();

        self.seen.clear();
        let fields = self.fields(self.root)?;
        tracing::debug!(
            "Built Avro record {} with {} fields and {} named types",
            title,
            fields.len(),
            self.seen.len()
        );

        Ok(RecordSchema {
            namespace: Some(namespace.unwrap_or(&title).to_string()),
            name: title,
            doc: None,
            fields,
        })
    }

    /// Convert the `properties` of an object schema into Avro fields
    pub fn fields(&mut self, parent: &Value) -> ConversionResult<Vec<Field>> {
        let required: Vec<&str> = parent
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let Some(properties) = parent.get("properties").and_then(Value::as_object) else {
            return Ok(Vec::new());
        };

        let mut fields = Vec::with_capacity(properties.len());
        for (name, spec) in properties {
            let mut field = self.field(name, spec)?;
            if !required.contains(&name.as_str()) {
                set_nullability(&mut field);
            }
            null_to_first(&mut field.ty);
            fields.push(field);
        }
        Ok(fields)
    }

    fn field(&mut self, name: &str, spec: &Value) -> ConversionResult<Field> {
        Ok(Field {
            name: name.to_string(),
            ty: self.field_type(spec)?,
            default: spec.get("default").cloned(),
            doc: spec
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    /// Derive the Avro type of one property schema
    pub fn field_type(&mut self, spec: &Value) -> ConversionResult<AvroType> {
        let node = spec
            .as_object()
            .ok_or_else(|| ConversionError::unsupported(spec))?;

        if let Some(variants) = node
            .get("anyOf")
            .or_else(|| node.get("oneOf"))
            .and_then(Value::as_array)
        {
            return match node.get("discriminator") {
                Some(discriminator) => self.discriminated_union(variants, discriminator),
                None => self.union(variants),
            };
        }

        if let Some(reference) = reference_of(node) {
            return self.reference(reference);
        }

        if let Some(avro_type) = node.get("avro_type") {
            return avro_type_override(avro_type);
        }

        let Some(type_name) = node.get("type").and_then(Value::as_str) else {
            return Err(ConversionError::UnsupportedType(format!(
                "Field '{}' does not have a defined type",
                spec
            )));
        };

        match type_name {
            "array" if is_tuple(node) => self.tuple(node, spec),
            "array" => self.array(node, spec),
            "string" => Ok(string_type(node.get("format").and_then(Value::as_str))),
            "number" => Ok(AvroType::Primitive(Primitive::Double)),
            "integer" => Ok(integer_type(node)),
            "boolean" => Ok(AvroType::Primitive(Primitive::Boolean)),
            "null" => Ok(AvroType::Primitive(Primitive::Null)),
            "object" => self.object(node),
            _ => Err(ConversionError::unsupported(spec)),
        }
    }

    fn union(&mut self, variants: &[Value]) -> ConversionResult<AvroType> {
        let mut arms = Vec::with_capacity(variants.len());
        for variant in variants {
            match self.field_type(variant)? {
                AvroType::Union(nested) => arms.extend(nested),
                arm => arms.push(arm),
            }
        }
        Ok(AvroType::Union(arms))
    }

    /// Variants carrying a constant discriminator value become records named
    /// `<value>Variant`
    fn discriminated_union(
        &mut self,
        variants: &[Value],
        discriminator: &Value,
    ) -> ConversionResult<AvroType> {
        let property = discriminator
            .get("propertyName")
            .and_then(Value::as_str)
            .unwrap_or("type");

        let mut arms = Vec::with_capacity(variants.len());
        for variant in variants {
            let definition = match variant.as_object().and_then(reference_of) {
                Some(reference) => self.definition(reference)?.1,
                None => variant,
            };

            let Some(value) = discriminator_value(definition, property) else {
                arms.push(self.field_type(variant)?);
                continue;
            };

            let name = format!("{}Variant", value);
            if self.seen.has(&name) {
                arms.push(AvroType::Named(name));
                continue;
            }
            self.seen.reserve(&name);
            let record = AvroType::Record(RecordSchema::new(&name, self.fields(definition)?));
            self.seen.add(&name, record.clone());
            arms.push(record);
        }
        Ok(AvroType::Union(arms))
    }

    fn reference(&mut self, reference: &str) -> ConversionResult<AvroType> {
        let (key, definition) = self.definition(reference)?;
        let symbols = definition.get("enum").and_then(Value::as_array);
        // Enums are emitted under their title, records under their key
        let name = match symbols {
            Some(_) => definition
                .get("title")
                .and_then(Value::as_str)
                .map_or(key, str::to_string),
            None => key,
        };
        if self.seen.has(&name) {
            tracing::debug!("Reusing definition {}", name);
            return Ok(AvroType::Named(name));
        }

        let ty = if let Some(symbols) = symbols {
            let mut schema = EnumSchema::new(&name, symbols.iter().map(symbol_text).collect());
            schema.doc = description(definition);
            AvroType::Enum(schema)
        } else {
            self.seen.reserve(&name);
            let mut record = RecordSchema::new(&name, self.fields(definition)?);
            record.doc = description(definition);
            AvroType::Record(record)
        };

        self.seen.add(&name, ty.clone());
        Ok(ty)
    }

    /// Resolve a `$ref` to its definition name and body
    fn definition(&self, reference: &str) -> ConversionResult<(String, &'a Value)> {
        let name = reference.rsplit('/').next().unwrap_or(reference).to_string();
        let root = self.root;
        DEFINITION_TABLES
            .iter()
            .find_map(|table| root.get(*table).and_then(|defs| defs.get(&name)))
            .map(|definition| (name.clone(), definition))
            .ok_or(ConversionError::MissingDefinition(name))
    }

    fn array(&mut self, node: &Map<String, Value>, spec: &Value) -> ConversionResult<AvroType> {
        let items = match node.get("items") {
            Some(Value::Array(items)) => items.first(),
            other => other,
        }
        .filter(|items| items.is_object())
        .ok_or_else(|| ConversionError::unsupported(spec))?;

        Ok(AvroType::Array(Box::new(self.field_type(items)?)))
    }

    /// Fixed-length arrays become arrays over the union of their item types
    fn tuple(&mut self, node: &Map<String, Value>, spec: &Value) -> ConversionResult<AvroType> {
        let items = node
            .get("prefixItems")
            .or_else(|| node.get("items"))
            .and_then(Value::as_array)
            .filter(|items| !items.is_empty())
            .ok_or_else(|| ConversionError::unsupported(spec))?;

        let mut possible = Vec::new();
        for item in items {
            let item_types = match self.field_type(item)? {
                AvroType::Union(arms) => arms,
                other => vec![other],
            };
            for ty in item_types {
                if !possible.contains(&ty) {
                    possible.push(ty);
                }
            }
        }

        let items = if possible.len() == 1 {
            possible.remove(0)
        } else {
            AvroType::Union(possible)
        };
        Ok(AvroType::Array(Box::new(items)))
    }

    fn object(&mut self, node: &Map<String, Value>) -> ConversionResult<AvroType> {
        let values = match node.get("additionalProperties") {
            Some(schema @ Value::Object(properties)) if !properties.is_empty() => {
                self.field_type(schema)?
            }
            _ => AvroType::Primitive(Primitive::String),
        };
        Ok(AvroType::Map(Box::new(values)))
    }
}

fn reference_of(node: &Map<String, Value>) -> Option<&str> {
    if let Some(reference) = node.get("$ref").and_then(Value::as_str) {
        return Some(reference);
    }
    match node.get("allOf").and_then(Value::as_array) {
        Some(all_of) if all_of.len() == 1 => all_of[0].get("$ref").and_then(Value::as_str),
        _ => None,
    }
}

fn is_tuple(node: &Map<String, Value>) -> bool {
    node.contains_key("prefixItems")
        || (node.contains_key("minItems") && node.contains_key("maxItems"))
}

fn discriminator_value(definition: &Value, property: &str) -> Option<String> {
    let spec = definition.get("properties")?.get(property)?;
    let value = match spec.get("const") {
        Some(value) => value,
        None => match spec.get("enum").and_then(Value::as_array) {
            Some(values) if values.len() == 1 => &values[0],
            _ => return None,
        },
    };
    Some(symbol_text(value))
}

fn symbol_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn description(definition: &Value) -> Option<String> {
    definition
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn string_type(format: Option<&str>) -> AvroType {
    match format {
        None => AvroType::Primitive(Primitive::String),
        Some("date-time") => AvroType::logical(Primitive::Long, LogicalType::TimestampMicros),
        Some("date") => AvroType::logical(Primitive::Int, LogicalType::Date),
        Some("time") => AvroType::logical(Primitive::Long, LogicalType::TimeMicros),
        Some("uuid") => AvroType::logical(Primitive::String, LogicalType::Uuid),
        Some("binary") => AvroType::Primitive(Primitive::Bytes),
        Some(other) => {
            tracing::debug!("No Avro mapping for string format {}, using string", other);
            AvroType::Primitive(Primitive::String)
        }
    }
}

/// `int` only when both bounds are present and fit in 32 bits
fn integer_type(node: &Map<String, Value>) -> AvroType {
    let minimum = node.get("minimum").and_then(Value::as_f64);
    let maximum = node.get("maximum").and_then(Value::as_f64);
    match (minimum, maximum) {
        (Some(minimum), Some(maximum))
            if minimum >= f64::from(i32::MIN) && maximum <= f64::from(i32::MAX) =>
        {
            AvroType::Primitive(Primitive::Int)
        }
        _ => AvroType::Primitive(Primitive::Long),
    }
}

/// Explicit Avro type requested through `avro_type`
fn avro_type_override(avro_type: &Value) -> ConversionResult<AvroType> {
    let name = avro_type
        .as_str()
        .ok_or_else(|| ConversionError::unsupported(avro_type))?;

    if let Some(primitive) = Primitive::from_name(name) {
        return Ok(AvroType::Primitive(primitive));
    }
    let (base, logical) = match name {
        "timestamp-millis" => (Primitive::Long, LogicalType::TimestampMillis),
        "timestamp-micros" => (Primitive::Long, LogicalType::TimestampMicros),
        "time-millis" => (Primitive::Int, LogicalType::TimeMillis),
        "time-micros" => (Primitive::Long, LogicalType::TimeMicros),
        "date" => (Primitive::Int, LogicalType::Date),
        "uuid" => (Primitive::String, LogicalType::Uuid),
        "decimal" => (
            Primitive::Bytes,
            LogicalType::Decimal {
                precision: None,
                scale: None,
            },
        ),
        _ => {
            return Err(ConversionError::UnsupportedType(format!(
                "avro_type {}",
                name
            )));
        }
    };
    Ok(AvroType::logical(base, logical))
}
