//! CLI entry point for the Mercury metadata and file helpers.
//!
//! Reads JSON (or WebDAV XML) from a file or stdin, writes JSON to stdout.
//! Logs go to stderr.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::{fmt, EnvFilter};

use mercury_core::vocab::jsonld;
use mercury_core::MercuryConfig;
use mercury_files::webdav::{basenames, list_directory};
use mercury_files::{unique_destination_paths, unique_file_names};
use mercury_linkeddata::search::{file_system_search, parse_hits};
use mercury_linkeddata::validate::validate_properties;
use mercury_linkeddata::{
    empty_linked_data, from_json_ld, new_entity, to_json_ld, to_json_ld_entity, PropertyValue,
    Vocabulary,
};

#[derive(Parser)]
#[command(name = "mercury")]
#[command(about = "Metadata materialization and file helpers for Fairspace collections")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: mercury).
    #[arg(short, long, default_value = "mercury", global = true)]
    config: String,

    /// Expanded JSON-LD vocabulary file (overrides `vocabulary_path`).
    #[arg(long, global = true)]
    vocabulary: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List the properties of a subject from an expanded JSON-LD graph.
    Materialize {
        /// Subject IRI.
        #[arg(long)]
        subject: String,
        /// Graph file (default: stdin).
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Materialize a subject and validate its properties.
    Validate {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Build the JSON-LD fragment setting one predicate.
    Fragment {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        predicate: String,
        /// JSON array of values, e.g. `[{"value": "x"}, {"id": "http://.."}]`.
        #[arg(long)]
        values: Option<String>,
    },
    /// Build one JSON-LD node from a `{predicate: [values]}` object.
    Entity {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// List the empty properties of a new entity of a class.
    Empty {
        /// Class IRI.
        #[arg(long = "type")]
        type_iri: String,
    },
    /// Mint an IRI and empty properties for a new entity of a class.
    New {
        #[arg(long = "type")]
        type_iri: String,
    },
    /// List a directory from a `PROPFIND` response.
    List {
        /// Multistatus XML file (default: stdin).
        #[arg(long)]
        listing: Option<PathBuf>,
        /// Directory path the listing was requested for.
        #[arg(long, default_value = "/")]
        directory: String,
    },
    /// Resolve name conflicts for files entering a directory.
    UniqueNames {
        /// Names already present in the target directory.
        #[arg(long, num_args = 0..)]
        existing: Vec<String>,
        /// `PROPFIND` response of the target directory; adds its names.
        #[arg(long)]
        listing: Option<PathBuf>,
        /// Incoming file names, or source paths when `--target` is set.
        #[arg(long, num_args = 1.., required = true)]
        incoming: Vec<String>,
        /// Target directory; map source paths to destination paths.
        #[arg(long)]
        target: Option<String>,
    },
    /// Print the file system text search request: endpoint, Accept header
    /// and SPARQL query.
    SearchQuery {
        #[arg(long)]
        text: String,
        /// Only match below this path.
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Read SPARQL JSON results of a search query into hits.
    SearchResults {
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = MercuryConfig::load(&cli.config)?;

    let output = match &cli.command {
        Command::Materialize { subject, input } => {
            let vocabulary = load_vocabulary(&cli, &config)?;
            let graph = parse_graph(&read_input(input.as_deref())?)?;
            serde_json::to_value(from_json_ld(&graph, subject, &vocabulary))?
        }
        Command::Validate { subject, input } => {
            let vocabulary = load_vocabulary(&cli, &config)?;
            let graph = parse_graph(&read_input(input.as_deref())?)?;
            let mut properties = from_json_ld(&graph, subject, &vocabulary);
            let valid = validate_properties(&mut properties);
            json!({ "valid": valid, "properties": properties })
        }
        Command::Fragment {
            subject,
            predicate,
            values,
        } => {
            let vocabulary = load_vocabulary(&cli, &config)?;
            let values: Option<Vec<PropertyValue>> = values
                .as_deref()
                .map(serde_json::from_str)
                .transpose()
                .context("--values must be a JSON array of values")?;
            let fragment = to_json_ld(
                Some(subject.as_str()),
                Some(predicate.as_str()),
                values.as_deref(),
                &vocabulary,
            );
            fragment.unwrap_or(Value::Null)
        }
        Command::Entity { subject, input } => {
            let vocabulary = load_vocabulary(&cli, &config)?;
            let changes: BTreeMap<String, Vec<PropertyValue>> =
                serde_json::from_str(&read_input(input.as_deref())?)
                    .context("Expected an object of predicate to value list")?;
            let changes: Vec<_> = changes.into_iter().collect();
            to_json_ld_entity(Some(subject.as_str()), &changes, &vocabulary).unwrap_or(Value::Null)
        }
        Command::Empty { type_iri } => {
            let vocabulary = load_vocabulary(&cli, &config)?;
            let shape = vocabulary.shape_for_type(type_iri);
            if shape.is_none() {
                tracing::warn!(type_iri = %type_iri, "No shape targets this class");
            }
            serde_json::to_value(empty_linked_data(Some(&vocabulary), shape))?
        }
        Command::New { type_iri } => {
            let vocabulary = load_vocabulary(&cli, &config)?;
            serde_json::to_value(new_entity(&vocabulary, type_iri, &config.iri_base)?)?
        }
        Command::List { listing, directory } => {
            let xml = read_input(listing.as_deref())?;
            serde_json::to_value(list_directory(&xml, directory)?)?
        }
        Command::UniqueNames {
            existing,
            listing,
            incoming,
            target,
        } => {
            let mut taken = existing.clone();
            if let Some(path) = listing {
                let xml = read_input(Some(path.as_path()))?;
                let entries = list_directory(&xml, target.as_deref().unwrap_or("/"))?;
                taken.extend(basenames(&entries));
            }
            let mapping = match target {
                Some(dir) => unique_destination_paths(incoming, dir, taken),
                None => unique_file_names(taken, incoming),
            };
            serde_json::to_value(mapping)?
        }
        Command::SearchQuery { text, prefix } => {
            serde_json::to_value(file_system_search(text, prefix.as_deref(), &config.search))?
        }
        Command::SearchResults { input } => {
            serde_json::to_value(parse_hits(&read_input(input.as_deref())?)?)?
        }
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Read a file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => Ok(std::io::read_to_string(std::io::stdin())?),
    }
}

fn load_vocabulary(cli: &Cli, config: &MercuryConfig) -> anyhow::Result<Vocabulary> {
    let path = cli
        .vocabulary
        .clone()
        .or_else(|| config.vocabulary_path.as_ref().map(PathBuf::from))
        .ok_or_else(|| {
            anyhow::anyhow!("No vocabulary: pass --vocabulary or set vocabulary_path in config")
        })?;

    let vocabulary = Vocabulary::from_json_str(&read_input(Some(path.as_path()))?)
        .with_context(|| format!("Invalid vocabulary in {}", path.display()))?;
    tracing::info!(path = %path.display(), nodes = vocabulary.len(), "Loaded vocabulary");
    Ok(vocabulary)
}

/// Accept an expanded JSON-LD array, a `{"@graph": [..]}` document or a
/// single node.
fn parse_graph(input: &str) -> anyhow::Result<Vec<Value>> {
    let doc: Value = serde_json::from_str(input).context("Graph input is not JSON")?;
    match doc {
        Value::Array(nodes) => Ok(nodes),
        Value::Object(mut doc) => match doc.remove("@graph") {
            Some(Value::Array(nodes)) => Ok(nodes),
            Some(_) => anyhow::bail!("@graph must be an array"),
            None if doc.contains_key(jsonld::ID) => Ok(vec![Value::Object(doc)]),
            None => anyhow::bail!("Graph input has neither @graph nor @id"),
        },
        _ => anyhow::bail!("Graph input must be a JSON array or object"),
    }
}
