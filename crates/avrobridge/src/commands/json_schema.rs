//! CLI command for JSON Schema to Avro conversion

use std::path::PathBuf;

use avrobridge_core::{JsonSchemaOptions, json_schema_to_avro};

use super::{load_json, write_output};
use crate::error::CliError;

/// Arguments for the `json-schema-to-avro` command
pub struct JsonSchemaArgs {
    /// JSON Schema file (`-` for stdin)
    pub schema: PathBuf,
    /// Output `.avsc` file
    pub output: Option<PathBuf>,
    /// Namespace of the root record
    pub namespace: Option<String>,
    /// Verbose output
    pub verbose: bool,
}

/// Handle the `json-schema-to-avro` command
pub fn handle_json_schema_to_avro(args: &JsonSchemaArgs) -> Result<(), CliError> {
    let mut options = JsonSchemaOptions::new();
    if let Some(namespace) = &args.namespace {
        options = options.with_namespace(namespace);
    }

    if args.verbose {
        eprintln!("Converting JSON Schema to Avro...");
        eprintln!("  Schema: {}", args.schema.display());
        if let Some(namespace) = &options.namespace {
            eprintln!("  Namespace: {}", namespace);
        }
    }

    let schema = load_json(&args.schema)?;
    let record = json_schema_to_avro(&schema, &options)?;
    if args.verbose {
        eprintln!("  Fields: {}", record.fields.len());
    }

    let avsc = serde_json::to_string_pretty(&record)
        .map_err(|e| CliError::InvalidArgument(format!("Failed to serialize schema: {}", e)))?;

    write_output(args.output.as_deref(), &avsc, args.verbose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    #[test]
    fn test_writes_avsc() {
        let dir = TempDir::new().unwrap();
        let schema = dir.path().join("schema.json");
        let output = dir.path().join("schema.avsc");
        std::fs::write(
            &schema,
            r#"{"title": "Test", "type": "object", "properties": {"c1": {"type": "string"}}}"#,
        )
        .unwrap();

        handle_json_schema_to_avro(&JsonSchemaArgs {
            schema,
            output: Some(output.clone()),
            namespace: Some("com.example".to_string()),
            verbose: false,
        })
        .unwrap();

        let avsc: Value = serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(avsc["namespace"], "com.example");
        assert_eq!(
            avsc["fields"],
            json!([{"name": "c1", "type": ["null", "string"], "default": null}])
        );
    }

    #[test]
    fn test_missing_title() {
        let dir = TempDir::new().unwrap();
        let schema = dir.path().join("schema.json");
        std::fs::write(&schema, r#"{"type": "object", "properties": {}}"#).unwrap();

        let err = handle_json_schema_to_avro(&JsonSchemaArgs {
            schema,
            output: None,
            namespace: None,
            verbose: false,
        })
        .unwrap_err();
        assert!(matches!(err, CliError::ConversionError(_)));
    }
}
