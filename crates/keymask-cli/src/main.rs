//! KeyMask CLI
//!
//! Command-line interface for masking JSON documents with a field schema

use anyhow::Context;
use clap::{Parser, Subcommand};
use keymask_config_file::LoadedSchema;
use keymask_core::ConditionRegistry;
use keymask_pii::MaskingRules;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "keymask")]
#[command(about = "KeyMask - Config-driven masking for schema-less records", long_about = None)]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn", env = "KEYMASK_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mask a JSON document using a field schema
    Mask {
        /// Path to the schema file (YAML, TOML or JSON)
        #[arg(long, env = "KEYMASK_SCHEMA")]
        schema: PathBuf,

        /// Input JSON file ("-" or absent for stdin)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long, default_value = "false")]
        pretty: bool,
    },
    /// Validate a masking config string and list its rules
    Check {
        /// Config in the form key:start,end,placeholder(;...)
        config: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Mask {
            schema,
            input,
            pretty,
        } => {
            let loaded = LoadedSchema::from_file(&schema, &ConditionRegistry::new())
                .with_context(|| format!("Failed to load schema {}", schema.display()))?;
            let document = read_input(input.as_ref())?;

            let masked = mask_document(&loaded, &document)?;

            let output = if pretty {
                serde_json::to_string_pretty(&masked)?
            } else {
                serde_json::to_string(&masked)?
            };
            println!("{}", output);
        }
        Commands::Check { config } => {
            let rules = MaskingRules::parse(&config)?;
            for rule in rules.sorted() {
                println!(
                    "{}: keep first {}, keep last {}, placeholder '{}'",
                    rule.key, rule.start_offset, rule.end_offset, rule.placeholder
                );
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays a clean JSON document
fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn read_input(input: Option<&PathBuf>) -> anyhow::Result<Value> {
    let contents = match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display()))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    serde_json::from_str(&contents).context("Input is not valid JSON")
}

/// Apply the schema to a record, or to each element of a top-level array
fn mask_document(loaded: &LoadedSchema, document: &Value) -> anyhow::Result<Value> {
    let chain = loaded.chain();

    match document {
        Value::Array(records) => {
            tracing::debug!("Masking {} records", records.len());
            let masked = records
                .iter()
                .map(|record| loaded.schema.apply(record, &chain))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(masked))
        }
        record => Ok(loaded.schema.apply(record, &chain)?),
    }
}
