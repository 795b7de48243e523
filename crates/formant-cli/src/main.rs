//! Command-line interface for Formant.
//!
//! Schemas are saved into a JSON store file (`--store`, default
//! `forms.json`). Schema documents are authored as YAML or JSON and checked
//! before they are accepted.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use formant_core::{validate_form_document, FillSession, FormSchema, ValueBag};
use formant_store::{JsonFileStore, SchemaStore};

#[derive(Parser)]
#[command(name = "formant", version, about = "Dynamic form schema toolkit")]
struct Cli {
    /// Path to the schema store file
    #[arg(long, global = true, default_value = "forms.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List saved schemas
    List,

    /// Print one saved schema as YAML
    Show {
        /// Schema id
        id: String,
    },

    /// Scaffold a new draft schema document
    New {
        /// Schema name
        name: String,

        /// Write the draft here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check a schema document without saving it
    Check {
        /// Schema document (.yaml, .yml or .json)
        file: PathBuf,
    },

    /// Validate a schema document and save it into the store
    Save {
        /// Schema document (.yaml, .yml or .json)
        file: PathBuf,
    },

    /// Fill a saved schema with values and validate the result
    Fill {
        /// Schema id
        id: String,

        /// JSON file mapping field ids to values
        #[arg(long)]
        values: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let store = JsonFileStore::new(&cli.store);
    tracing::debug!(store = %cli.store.display(), "using schema store");

    match cli.command {
        Command::List => list(&store),
        Command::Show { id } => show(&store, &id),
        Command::New { name, out } => new(&name, out.as_deref()),
        Command::Check { file } => check(&file),
        Command::Save { file } => save(&store, &file),
        Command::Fill { id, values } => fill(&store, &id, &values),
    }
}

fn list(store: &JsonFileStore) -> Result<()> {
    let schemas = store.list().context("Failed to read the schema store")?;
    if schemas.is_empty() {
        println!("No schemas saved yet.");
        return Ok(());
    }
    for schema in schemas {
        println!(
            "{}  {}  (created {}, {} fields)",
            schema.id,
            schema.name,
            schema.created_at.format("%Y-%m-%d"),
            schema.fields.len()
        );
    }
    Ok(())
}

fn show(store: &JsonFileStore, id: &str) -> Result<()> {
    let schema = load_saved(store, id)?;
    print!("{}", serde_yaml::to_string(&schema)?);
    Ok(())
}

fn new(name: &str, out: Option<&Path>) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Please enter a form name.");
    }
    let draft = FormSchema::draft(name);
    let yaml = serde_yaml::to_string(&draft)?;
    match out {
        Some(path) => {
            fs::write(path, yaml)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote draft '{}' to {}", draft.name, path.display());
        }
        None => print!("{}", yaml),
    }
    Ok(())
}

fn check(file: &Path) -> Result<()> {
    // JSON documents additionally go through the embedded JSON Schema for
    // machine-readable errors; YAML goes straight to the typed parser.
    if !is_yaml(file) {
        let contents = fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let document: serde_json::Value = serde_json::from_str(&contents)?;
        if let Err(errors) = validate_form_document(&document) {
            for error in &errors {
                eprintln!("  {}", error);
            }
            bail!("{} failed document validation", file.display());
        }
    }

    let schema = load_document(file)?;
    println!(
        "OK: '{}' with {} fields",
        schema.name,
        schema.fields.len()
    );
    Ok(())
}

fn save(store: &JsonFileStore, file: &Path) -> Result<()> {
    let schema = load_document(file)?;
    let (id, name) = (schema.id.clone(), schema.name.clone());
    store
        .upsert(schema)
        .context("Failed to save into the schema store")?;
    println!("Saved '{}' as {}", name, id);
    Ok(())
}

fn fill(store: &JsonFileStore, id: &str, values_file: &Path) -> Result<()> {
    let schema = load_saved(store, id)?;

    let contents = fs::read_to_string(values_file)
        .with_context(|| format!("Failed to read {}", values_file.display()))?;
    let values: ValueBag = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse values from {}", values_file.display()))?;

    let mut session = FillSession::new(schema);
    for (field_id, value) in values.iter() {
        session.set_value(field_id, value.clone());
    }

    match session.submit() {
        Ok(final_values) => {
            println!("Form is valid.");
            println!("{}", serde_json::to_string_pretty(final_values)?);
            Ok(())
        }
        Err(errors) => {
            for (field_id, message) in errors {
                eprintln!("  {}: {}", field_id, message);
            }
            bail!("Form has {} validation error(s)", errors.len());
        }
    }
}

fn load_saved(store: &JsonFileStore, id: &str) -> Result<FormSchema> {
    store
        .get_by_id(id)
        .context("Failed to read the schema store")?
        .with_context(|| format!("No schema with id '{}'", id))
}

fn load_document(path: &Path) -> Result<FormSchema> {
    let schema = if is_yaml(path) {
        FormSchema::from_yaml_file(path)
    } else {
        FormSchema::from_json_file(path)
    };
    schema.with_context(|| format!("Invalid schema document {}", path.display()))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
