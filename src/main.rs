//! rsqlfilter - compile RSQL filter expressions and optionally apply them to
//! JSON documents

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use log::{debug, info};
use rsqlfilter::fields::{action_fields, target_fields};
use rsqlfilter::predicate::evaluate;
use rsqlfilter::{Predicate, Schema};
use std::path::{Path, PathBuf};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Entity {
    Target,
    Action,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
}

/// Compile an RSQL filter expression into a predicate tree
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RSQL expression, e.g. "name==targetId1;updatestatus==pending"
    query: String,

    /// JSON schema definition to compile against
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Built-in schema used when no --schema is given
    #[arg(short, long, value_enum, default_value = "target")]
    entity: Entity,

    /// JSON array of documents to filter with the compiled predicate
    #[arg(short = 'D', long)]
    data: Option<PathBuf>,

    /// Output format for the compiled predicate
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let schema = load_schema(&args)?;
    debug!(
        "compiling against entity {} with {} fields",
        schema.entity(),
        schema.fields().len()
    );

    let predicate = rsqlfilter::parse(&args.query, &schema)
        .with_context(|| format!("Failed to compile filter '{}'", args.query))?;

    match args.format {
        OutputFormat::Text => println!("{}", predicate),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&predicate).context("Failed to serialize predicate")?
        ),
    }

    if let Some(data) = &args.data {
        filter_documents(data, &predicate)?;
    }

    Ok(())
}

fn load_schema(args: &Args) -> Result<Schema> {
    if let Some(path) = &args.schema {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema file {}", path.display()))?;
        return Schema::from_json(&json)
            .with_context(|| format!("Invalid schema file {}", path.display()));
    }

    let schema = match args.entity {
        Entity::Target => target_fields(),
        Entity::Action => action_fields(),
    };
    schema.context("Failed to build built-in schema")
}

fn filter_documents(path: &Path, predicate: &Predicate) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;
    let documents: serde_json::Value =
        serde_json::from_str(&json).context("Failed to parse data file")?;

    let documents = match documents {
        serde_json::Value::Array(documents) => documents,
        _ => bail!("Data file {} must contain a JSON array", path.display()),
    };

    let total = documents.len();
    let mut matched = 0;
    for document in documents.iter().filter(|d| evaluate(predicate, d)) {
        println!("{}", document);
        matched += 1;
    }

    info!("{} of {} documents matched", matched, total);
    Ok(())
}
