//! Parsing `.avsc` JSON into [`AvroType`] trees

use serde_json::{Map, Value};

use super::types::{
    AvroType, EnumSchema, Field, FixedSchema, LogicalType, Primitive, RecordSchema,
};
use crate::error::{ConversionError, ConversionResult};

/// Parse a root record schema from its JSON text
pub fn parse_schema_str(text: &str) -> ConversionResult<RecordSchema> {
    let value: Value = serde_json::from_str(text)?;
    parse_schema(&value)
}

/// Parse a root record schema
///
/// The root must carry `type`, `name` and `fields`. Missing keys fail before
/// any nested type is looked at.
pub fn parse_schema(value: &Value) -> ConversionResult<RecordSchema> {
    let node = value
        .as_object()
        .ok_or_else(|| ConversionError::SchemaShape("Schema must be a JSON object".to_string()))?;

    match node.get("type").and_then(Value::as_str) {
        Some("record") => {}
        Some(other) => {
            return Err(ConversionError::SchemaShape(format!(
                "Type {} not supported as schema root",
                other
            )));
        }
        None => return Err(ConversionError::SchemaShape("Type not supported".to_string())),
    }
    if !node.contains_key("name") {
        return Err(ConversionError::SchemaShape("Name is required".to_string()));
    }
    if !node.contains_key("fields") {
        return Err(ConversionError::SchemaShape("Fields are required".to_string()));
    }

    parse_record(node)
}

/// Parse any type reference
pub fn parse_type(value: &Value) -> ConversionResult<AvroType> {
    match value {
        Value::String(name) => Ok(match Primitive::from_name(name) {
            Some(primitive) => AvroType::Primitive(primitive),
            None => AvroType::Named(name.clone()),
        }),
        Value::Array(arms) => {
            let arms = arms.iter().map(parse_type).collect::<ConversionResult<Vec<_>>>()?;
            Ok(AvroType::Union(arms))
        }
        Value::Object(node) => parse_node(node, value),
        _ => Err(ConversionError::unsupported(value)),
    }
}

fn parse_node(node: &Map<String, Value>, value: &Value) -> ConversionResult<AvroType> {
    let base_name = node.get("type").and_then(Value::as_str);
    if let Some(name) = node.get("logicalType").and_then(Value::as_str) {
        let logical = LogicalType::from_node(name, node);
        match (logical, base_name.and_then(Primitive::from_name)) {
            (Some(logical), Some(base)) => return Ok(AvroType::Logical { base, logical }),
            (Some(_), None) if base_name == Some("fixed") => {}
            _ => tracing::debug!("Ignoring logical type {} on {}", name, value),
        }
    }

    let type_name = match node.get("type") {
        Some(Value::String(type_name)) => type_name.as_str(),
        // A field-style wrapper such as {"type": {"type": "map", ...}}
        Some(inner @ (Value::Object(_) | Value::Array(_))) => return parse_type(inner),
        _ => return Err(ConversionError::unsupported(value)),
    };

    match type_name {
        "record" | "error" => Ok(AvroType::Record(parse_record(node)?)),
        "enum" => Ok(AvroType::Enum(parse_enum(node, value)?)),
        "array" => {
            let items = node
                .get("items")
                .ok_or_else(|| ConversionError::unsupported(value))?;
            Ok(AvroType::Array(Box::new(parse_type(items)?)))
        }
        "map" => {
            let values = node
                .get("values")
                .ok_or_else(|| ConversionError::unsupported(value))?;
            Ok(AvroType::Map(Box::new(parse_type(values)?)))
        }
        "fixed" => Ok(AvroType::Fixed(parse_fixed(node, value)?)),
        other => Ok(match Primitive::from_name(other) {
            Some(primitive) => AvroType::Primitive(primitive),
            None => AvroType::Named(other.to_string()),
        }),
    }
}

fn parse_record(node: &Map<String, Value>) -> ConversionResult<RecordSchema> {
    let name = string_key(node, "name")?;
    let fields = node
        .get("fields")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ConversionError::SchemaShape(format!("Record {} must have a fields list", name))
        })?
        .iter()
        .map(parse_field)
        .collect::<ConversionResult<Vec<_>>>()?;

    Ok(RecordSchema {
        name,
        namespace: optional_string(node, "namespace"),
        doc: optional_string(node, "doc"),
        fields,
    })
}

fn parse_enum(node: &Map<String, Value>, value: &Value) -> ConversionResult<EnumSchema> {
    let name = string_key(node, "name")?;
    let symbols = node
        .get("symbols")
        .and_then(Value::as_array)
        .ok_or_else(|| ConversionError::unsupported(value))?
        .iter()
        .map(|symbol| {
            symbol
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ConversionError::unsupported(value))
        })
        .collect::<ConversionResult<Vec<_>>>()?;

    Ok(EnumSchema {
        name,
        namespace: optional_string(node, "namespace"),
        doc: optional_string(node, "doc"),
        symbols,
    })
}

fn parse_fixed(node: &Map<String, Value>, value: &Value) -> ConversionResult<FixedSchema> {
    let size = node
        .get("size")
        .and_then(Value::as_u64)
        .ok_or_else(|| ConversionError::unsupported(value))?;

    Ok(FixedSchema {
        name: string_key(node, "name")?,
        namespace: optional_string(node, "namespace"),
        size,
        logical: node
            .get("logicalType")
            .and_then(Value::as_str)
            .and_then(|name| LogicalType::from_node(name, node)),
    })
}

fn parse_field(value: &Value) -> ConversionResult<Field> {
    let node = value
        .as_object()
        .ok_or_else(|| ConversionError::SchemaShape(format!("Invalid field: {}", value)))?;
    let name = string_key(node, "name")?;
    let ty = node
        .get("type")
        .ok_or_else(|| ConversionError::SchemaShape(format!("Field {} has no type", name)))?;

    Ok(Field {
        ty: parse_type(ty)?,
        default: node.get("default").cloned(),
        doc: optional_string(node, "doc"),
        name,
    })
}

fn string_key(node: &Map<String, Value>, key: &str) -> ConversionResult<String> {
    node.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ConversionError::SchemaShape(format!(
                "{} is required in {}",
                key,
                Value::Object(node.clone())
            ))
        })
}

fn optional_string(node: &Map<String, Value>, key: &str) -> Option<String> {
    node.get(key).and_then(Value::as_str).map(str::to_string)
}
