//! CLI command for Avro to pydantic generation

use std::path::PathBuf;

use avrobridge_core::{EnumKeyStyle, PydanticGenerator, PydanticOptions};

use super::{load_json, write_output};
use crate::error::CliError;

/// Arguments for the `avro-to-pydantic` command
pub struct PydanticArgs {
    /// Avro schema file (`-` for stdin)
    pub avsc: PathBuf,
    /// Output Python file
    pub output: Option<PathBuf>,
    /// Enum member naming style
    pub enum_key_style: Option<String>,
    /// Verbose output
    pub verbose: bool,
}

/// Handle the `avro-to-pydantic` command
pub fn handle_avro_to_pydantic(args: &PydanticArgs) -> Result<(), CliError> {
    let enum_key_style = args
        .enum_key_style
        .as_deref()
        .map(str::parse::<EnumKeyStyle>)
        .transpose()
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;

    if args.verbose {
        eprintln!("Generating pydantic models...");
        eprintln!("  Schema: {}", args.avsc.display());
        if let Some(style) = enum_key_style {
            eprintln!("  Enum key style: {}", style);
        }
    }

    let schema = load_json(&args.avsc)?;
    let generator = PydanticGenerator::new(PydanticOptions::new().with_enum_key_style(enum_key_style));
    let code = generator.generate_from_value(&schema)?;

    write_output(args.output.as_deref(), &code, args.verbose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_module() {
        let dir = TempDir::new().unwrap();
        let avsc = dir.path().join("test.avsc");
        let output = dir.path().join("models.py");
        std::fs::write(
            &avsc,
            r#"{"type": "record", "name": "Test", "fields": [
                {"name": "status", "type": {"type": "enum", "name": "Status", "symbols": ["FirstValue"]}}
            ]}"#,
        )
        .unwrap();

        handle_avro_to_pydantic(&PydanticArgs {
            avsc,
            output: Some(output.clone()),
            enum_key_style: Some("snake_case".to_string()),
            verbose: false,
        })
        .unwrap();

        let code = std::fs::read_to_string(output).unwrap();
        assert!(code.contains("class Status(str, Enum):\n    first_value = \"FirstValue\""));
        assert!(code.contains("class Test(BaseModel):\n    status: Status"));
    }

    #[test]
    fn test_rejects_unknown_style() {
        let err = handle_avro_to_pydantic(&PydanticArgs {
            avsc: PathBuf::from("unused.avsc"),
            output: None,
            enum_key_style: Some("kebab".to_string()),
            verbose: false,
        })
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(message) if message.contains("kebab")));
    }
}
