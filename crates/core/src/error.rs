//! Error types for schema conversion operations

use thiserror::Error;

/// Errors that can occur while converting between schema formats
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The input document is missing a required structural element
    #[error("Invalid schema structure: {0}")]
    SchemaShape(String),

    /// A type description could not be mapped to the target format
    #[error("Type {0} not supported yet")]
    UnsupportedType(String),

    /// An enum key style was requested that is not known
    #[error("Invalid enum key style: {style}. Supported styles: {supported}")]
    UnsupportedStyle { style: String, supported: String },

    /// A `$ref` points at a definition that does not exist
    #[error("Definition {0} does not exist")]
    MissingDefinition(String),

    /// A registry lookup for a name that was never added
    #[error("Unknown registry entry: {0}")]
    UnknownRegistryEntry(String),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML input
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConversionError {
    /// Build an `UnsupportedType` error from the offending JSON description
    pub fn unsupported(value: &serde_json::Value) -> Self {
        ConversionError::UnsupportedType(value.to_string())
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;
