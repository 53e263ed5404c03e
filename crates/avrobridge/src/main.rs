//! avrobridge CLI - schema conversion between Avro, pydantic and GraphQL
//!
//! Commands:
//! - `avrobridge avro-to-pydantic` - Generate pydantic models from an `.avsc` file
//! - `avrobridge avro-to-graphql` - Generate a GraphQL schema from an `.avsc` file
//! - `avrobridge avro-folder-to-graphql` - Generate one GraphQL schema from a folder of `.avsc` files
//! - `avrobridge json-schema-to-avro` - Convert a pydantic JSON Schema into an Avro schema

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::graphql::{
    GraphqlArgs, GraphqlFolderArgs, handle_avro_folder_to_graphql, handle_avro_to_graphql,
};
use commands::json_schema::{JsonSchemaArgs, handle_json_schema_to_avro};
use commands::pydantic::{PydanticArgs, handle_avro_to_pydantic};

#[derive(Parser)]
#[command(name = "avrobridge")]
#[command(author, version, about = "Convert between Avro, pydantic and GraphQL schemas", long_about = None)]
struct Cli {
    /// Print progress and debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate pydantic models from an Avro schema
    AvroToPydantic {
        /// Avro schema file (`-` for stdin)
        #[arg(long)]
        avsc: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Enum member naming style (snake_case, snake_case_upper)
        #[arg(long)]
        enum_key_style: Option<String>,
    },

    /// Generate a GraphQL schema from an Avro schema
    AvroToGraphql {
        /// Avro schema file (`-` for stdin)
        #[arg(long)]
        avsc: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directive configuration file (JSON or YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate one GraphQL schema from every `.avsc` file in a folder
    AvroFolderToGraphql {
        /// Folder containing `.avsc` files
        #[arg(long)]
        avsc_folder: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directive configuration file (JSON or YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Convert a JSON Schema document into an Avro schema
    JsonSchemaToAvro {
        /// JSON Schema file (`-` for stdin)
        #[arg(long)]
        schema: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Namespace of the root record (default: the schema title)
        #[arg(short, long)]
        namespace: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let verbose = cli.verbose;
    match cli.command {
        Commands::AvroToPydantic {
            avsc,
            output,
            enum_key_style,
        } => {
            let args = PydanticArgs {
                avsc,
                output,
                enum_key_style,
                verbose,
            };
            handle_avro_to_pydantic(&args)
                .with_context(|| format!("avro-to-pydantic failed for {}", args.avsc.display()))?;
        }
        Commands::AvroToGraphql {
            avsc,
            output,
            config,
        } => {
            let args = GraphqlArgs {
                avsc,
                output,
                config,
                verbose,
            };
            handle_avro_to_graphql(&args)
                .with_context(|| format!("avro-to-graphql failed for {}", args.avsc.display()))?;
        }
        Commands::AvroFolderToGraphql {
            avsc_folder,
            output,
            config,
        } => {
            let args = GraphqlFolderArgs {
                avsc_folder,
                output,
                config,
                verbose,
            };
            handle_avro_folder_to_graphql(&args).with_context(|| {
                format!(
                    "avro-folder-to-graphql failed for {}",
                    args.avsc_folder.display()
                )
            })?;
        }
        Commands::JsonSchemaToAvro {
            schema,
            output,
            namespace,
        } => {
            let args = JsonSchemaArgs {
                schema,
                output,
                namespace,
                verbose,
            };
            handle_json_schema_to_avro(&args).with_context(|| {
                format!("json-schema-to-avro failed for {}", args.schema.display())
            })?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
