//! CLI commands for Avro to GraphQL generation

use std::path::{Path, PathBuf};

use avrobridge_core::codegen::graphql::render_document;
use avrobridge_core::{GraphqlConfig, GraphqlGenerator};

use super::{load_json, read_input, write_output};
use crate::error::CliError;

/// Arguments for the `avro-to-graphql` command
pub struct GraphqlArgs {
    /// Avro schema file (`-` for stdin)
    pub avsc: PathBuf,
    /// Output SDL file
    pub output: Option<PathBuf>,
    /// Directive configuration (JSON or YAML)
    pub config: Option<PathBuf>,
    /// Verbose output
    pub verbose: bool,
}

/// Arguments for the `avro-folder-to-graphql` command
pub struct GraphqlFolderArgs {
    /// Folder containing `.avsc` files
    pub avsc_folder: PathBuf,
    /// Output SDL file
    pub output: Option<PathBuf>,
    /// Directive configuration (JSON or YAML)
    pub config: Option<PathBuf>,
    /// Verbose output
    pub verbose: bool,
}

/// Load the directive configuration, or the empty one when no path is given
pub fn load_config(path: Option<&Path>) -> Result<GraphqlConfig, CliError> {
    let Some(path) = path else {
        return Ok(GraphqlConfig::default());
    };
    let content = read_input(path)?;
    GraphqlConfig::parse(&content)
        .map_err(|e| CliError::ConfigError(format!("{}: {}", path.display(), e)))
}

/// Handle the `avro-to-graphql` command
pub fn handle_avro_to_graphql(args: &GraphqlArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;

    if args.verbose {
        eprintln!("Generating GraphQL schema...");
        eprintln!("  Schema: {}", args.avsc.display());
        eprintln!(
            "  Directives: {} field, {} type",
            config.field_directives.len(),
            config.type_directives.len()
        );
    }

    let schema = load_json(&args.avsc)?;
    let sdl = GraphqlGenerator::new(config).generate_from_value(&schema)?;

    write_output(args.output.as_deref(), &sdl, args.verbose)
}

/// Handle the `avro-folder-to-graphql` command
pub fn handle_avro_folder_to_graphql(args: &GraphqlFolderArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let files = collect_avsc_files(&args.avsc_folder)?;

    if args.verbose {
        eprintln!("Generating GraphQL schema from folder...");
        eprintln!("  Folder: {}", args.avsc_folder.display());
        eprintln!("  Files: {}", files.len());
    }

    let mut documents = Vec::with_capacity(files.len());
    for file in &files {
        tracing::debug!("Loading {}", file.display());
        documents.push(load_json(file)?);
    }

    let definitions = GraphqlGenerator::new(config).convert_many(&documents)?;
    if args.verbose {
        eprintln!("  Definitions: {}", definitions.len());
    }

    write_output(args.output.as_deref(), &render_document(&definitions), args.verbose)
}

/// All `*.avsc` files directly inside a folder, sorted by path
fn collect_avsc_files(folder: &Path) -> Result<Vec<PathBuf>, CliError> {
    if !folder.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "{} is not a directory",
            folder.display()
        )));
    }

    let pattern = folder.join("*.avsc");
    let pattern = pattern.to_str().ok_or_else(|| {
        CliError::InvalidArgument(format!("Non UTF-8 path: {}", folder.display()))
    })?;

    let mut files = Vec::new();
    for entry in glob::glob(pattern).map_err(|e| CliError::InvalidArgument(e.to_string()))? {
        let path = entry.map_err(|e| CliError::FileReadError(e.path().to_path_buf(), e.to_string()))?;
        files.push(path);
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collects_sorted_avsc_files() {
        let dir = TempDir::new().unwrap();
        for name in ["b.avsc", "a.avsc", "notes.txt"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }

        let files = collect_avsc_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.avsc", "b.avsc"]);
    }

    #[test]
    fn test_rejects_missing_folder() {
        let err = collect_avsc_files(Path::new("/nonexistent/avsc")).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_yaml_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "field_directives:\n  id: \"@external\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.directives_for("Test", "id"), " @external");
        assert_eq!(load_config(None).unwrap(), GraphqlConfig::default());
    }
}
