//! CLI command implementations

pub mod graphql;
pub mod json_schema;
pub mod pydantic;

use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::CliError;

/// Read an input file, or stdin when the path is `-`
pub fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::FileReadError(PathBuf::from("<stdin>"), e.to_string()))?;
        return Ok(content);
    }
    std::fs::read_to_string(path).map_err(|e| CliError::FileReadError(path.to_path_buf(), e.to_string()))
}

/// Read and parse a JSON document
pub fn load_json(path: &Path) -> Result<Value, CliError> {
    let content = read_input(path)?;
    serde_json::from_str(&content).map_err(|e| CliError::ParseError(path.to_path_buf(), e.to_string()))
}

/// Write generated text to a file, or print it when no path is given
pub fn write_output(output: Option<&Path>, content: &str, verbose: bool) -> Result<(), CliError> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .map_err(|e| CliError::FileWriteError(path.to_path_buf(), e.to_string()))?;
            if verbose {
                eprintln!("Output written to: {}", path.display());
            }
        }
        None => println!("{}", content),
    }
    Ok(())
}
