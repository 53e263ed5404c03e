//! Avro schema types
//!
//! A parsed Avro schema is an [`AvroType`] tree. The tree is decided once at
//! parse time so the generators can match on it exhaustively.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

/// Avro primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

impl Primitive {
    /// Parse a primitive type name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(Primitive::Null),
            "boolean" => Some(Primitive::Boolean),
            "int" => Some(Primitive::Int),
            "long" => Some(Primitive::Long),
            "float" => Some(Primitive::Float),
            "double" => Some(Primitive::Double),
            "bytes" => Some(Primitive::Bytes),
            "string" => Some(Primitive::String),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Null => "null",
            Primitive::Boolean => "boolean",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Bytes => "bytes",
            Primitive::String => "string",
        }
    }
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Semantic refinements of a primitive type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Uuid,
    Decimal {
        precision: Option<u64>,
        scale: Option<u64>,
    },
    Date,
    TimeMillis,
    TimeMicros,
    TimestampMillis,
    TimestampMicros,
    LocalTimestampMillis,
    LocalTimestampMicros,
}

impl LogicalType {
    /// Parse a `logicalType` annotation. Decimal precision and scale are read
    /// from the surrounding node.
    pub fn from_node(name: &str, node: &Map<String, Value>) -> Option<Self> {
        let logical = match name {
            "uuid" => LogicalType::Uuid,
            "decimal" => LogicalType::Decimal {
                precision: node.get("precision").and_then(Value::as_u64),
                scale: node.get("scale").and_then(Value::as_u64),
            },
            "date" => LogicalType::Date,
            "time-millis" => LogicalType::TimeMillis,
            "time-micros" => LogicalType::TimeMicros,
            "timestamp-millis" => LogicalType::TimestampMillis,
            "timestamp-micros" => LogicalType::TimestampMicros,
            "local-timestamp-millis" => LogicalType::LocalTimestampMillis,
            "local-timestamp-micros" => LogicalType::LocalTimestampMicros,
            _ => return None,
        };
        Some(logical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::Uuid => "uuid",
            LogicalType::Decimal { .. } => "decimal",
            LogicalType::Date => "date",
            LogicalType::TimeMillis => "time-millis",
            LogicalType::TimeMicros => "time-micros",
            LogicalType::TimestampMillis => "timestamp-millis",
            LogicalType::TimestampMicros => "timestamp-micros",
            LogicalType::LocalTimestampMillis => "local-timestamp-millis",
            LogicalType::LocalTimestampMicros => "local-timestamp-micros",
        }
    }
}

/// An Avro type reference
#[derive(Debug, Clone, PartialEq)]
pub enum AvroType {
    /// A primitive type
    Primitive(Primitive),
    /// A reference to a named type defined elsewhere in the document
    Named(String),
    /// A union of types
    Union(Vec<AvroType>),
    /// A primitive refined by a `logicalType`
    Logical {
        base: Primitive,
        logical: LogicalType,
    },
    Enum(EnumSchema),
    /// A fixed-size byte sequence, usable only through its logical type
    Fixed(FixedSchema),
    Array(Box<AvroType>),
    /// A map with string keys
    Map(Box<AvroType>),
    Record(RecordSchema),
}

impl AvroType {
    pub fn is_null(&self) -> bool {
        matches!(self, AvroType::Primitive(Primitive::Null))
    }

    /// Convenience constructor for a logical type
    pub fn logical(base: Primitive, logical: LogicalType) -> Self {
        AvroType::Logical { base, logical }
    }

    /// Convert to the JSON representation used in `.avsc` documents
    pub fn to_value(&self) -> Value {
        match self {
            AvroType::Primitive(primitive) => Value::String(primitive.as_str().to_string()),
            AvroType::Named(name) => Value::String(name.clone()),
            AvroType::Union(arms) => Value::Array(arms.iter().map(AvroType::to_value).collect()),
            AvroType::Logical { base, logical } => {
                let mut node = Map::new();
                node.insert("type".to_string(), json!(base.as_str()));
                node.insert("logicalType".to_string(), json!(logical.as_str()));
                if let LogicalType::Decimal { precision, scale } = logical {
                    if let Some(precision) = precision {
                        node.insert("precision".to_string(), json!(precision));
                    }
                    if let Some(scale) = scale {
                        node.insert("scale".to_string(), json!(scale));
                    }
                }
                Value::Object(node)
            }
            AvroType::Enum(schema) => schema.to_value(),
            AvroType::Fixed(schema) => schema.to_value(),
            AvroType::Array(items) => json!({"type": "array", "items": items.to_value()}),
            AvroType::Map(values) => json!({"type": "map", "values": values.to_value()}),
            AvroType::Record(schema) => schema.to_value(),
        }
    }
}

impl From<Primitive> for AvroType {
    fn from(primitive: Primitive) -> Self {
        AvroType::Primitive(primitive)
    }
}

/// An Avro enum definition
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    pub name: String,
    pub namespace: Option<String>,
    pub doc: Option<String>,
    pub symbols: Vec<String>,
}

impl EnumSchema {
    pub fn new(name: impl Into<String>, symbols: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            doc: None,
            symbols,
        }
    }

    pub fn to_value(&self) -> Value {
        let mut node = Map::new();
        node.insert("type".to_string(), json!("enum"));
        node.insert("name".to_string(), json!(self.name));
        if let Some(namespace) = &self.namespace {
            node.insert("namespace".to_string(), json!(namespace));
        }
        if let Some(doc) = &self.doc {
            node.insert("doc".to_string(), json!(doc));
        }
        node.insert("symbols".to_string(), json!(self.symbols));
        Value::Object(node)
    }
}

/// An Avro fixed definition
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSchema {
    pub name: String,
    pub namespace: Option<String>,
    pub size: u64,
    pub logical: Option<LogicalType>,
}

impl FixedSchema {
    pub fn to_value(&self) -> Value {
        let mut node = Map::new();
        node.insert("type".to_string(), json!("fixed"));
        node.insert("name".to_string(), json!(self.name));
        if let Some(namespace) = &self.namespace {
            node.insert("namespace".to_string(), json!(namespace));
        }
        node.insert("size".to_string(), json!(self.size));
        if let Some(logical) = &self.logical {
            node.insert("logicalType".to_string(), json!(logical.as_str()));
            if let LogicalType::Decimal { precision, scale } = logical {
                if let Some(precision) = precision {
                    node.insert("precision".to_string(), json!(precision));
                }
                if let Some(scale) = scale {
                    node.insert("scale".to_string(), json!(scale));
                }
            }
        }
        Value::Object(node)
    }
}

/// An Avro record definition
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub name: String,
    pub namespace: Option<String>,
    pub doc: Option<String>,
    pub fields: Vec<Field>,
}

impl RecordSchema {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            doc: None,
            fields,
        }
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn to_value(&self) -> Value {
        let mut node = Map::new();
        node.insert("type".to_string(), json!("record"));
        if let Some(namespace) = &self.namespace {
            node.insert("namespace".to_string(), json!(namespace));
        }
        node.insert("name".to_string(), json!(self.name));
        if let Some(doc) = &self.doc {
            node.insert("doc".to_string(), json!(doc));
        }
        node.insert(
            "fields".to_string(),
            Value::Array(self.fields.iter().map(Field::to_value).collect()),
        );
        Value::Object(node)
    }
}

/// A field of a record
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: AvroType,
    /// `Some(Value::Null)` is an explicit null default, `None` means no default
    pub default: Option<Value>,
    pub doc: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: AvroType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            doc: None,
        }
    }

    /// Set the default value
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn to_value(&self) -> Value {
        let mut node = Map::new();
        node.insert("name".to_string(), json!(self.name));
        node.insert("type".to_string(), self.ty.to_value());
        if let Some(doc) = &self.doc {
            node.insert("doc".to_string(), json!(doc));
        }
        if let Some(default) = &self.default {
            node.insert("default".to_string(), default.clone());
        }
        Value::Object(node)
    }
}

impl Serialize for AvroType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl Serialize for RecordSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Strip the namespace from a possibly qualified type name
pub fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}
