use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use engram::dictionary::Dictionary;
use engram::doc::Document;
use engram::graph::project_graph;
use engram::roots::{outline, render_outline};
use engram::serialize::{ExportError, ImportError, export_document, import_document, import_document_strict};
use engram::stability::score_layer;
use engram::validator::validation_report;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("import failed: {0}")]
    Import(#[from] ImportError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("layer not found: {0}")]
    LayerNotFound(String),
}

#[derive(Parser, Debug)]
#[command(name = "engram", about = "Inspect and check engram documents")]
struct Cli {
    /// Newline-separated word list used for the dictionary bonus.
    #[arg(long, env = "ENGRAM_DICTIONARY", global = true)]
    dictionary: Option<PathBuf>,

    /// Reject documents with dangling ladders or mismatched ids.
    #[arg(long, env = "ENGRAM_STRICT", default_value_t = false, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every layer's chain and the document's structure.
    Validate {
        #[arg(default_value = "-", help = "Document path, or - for stdin")]
        input: String,
    },
    /// Print a layer's stability score and status.
    Score {
        #[arg(default_value = "-", help = "Document path, or - for stdin")]
        input: String,
        /// Layer to score; the root layer when absent.
        #[arg(long)]
        layer: Option<String>,
    },
    /// Print the projected 3D graph as JSON.
    Graph {
        #[arg(default_value = "-", help = "Document path, or - for stdin")]
        input: String,
    },
    /// Print the nested outline of words.
    Roots {
        #[arg(default_value = "-", help = "Document path, or - for stdin")]
        input: String,
    },
    /// Re-export the document with rebuilt cell indexes.
    Normalize {
        #[arg(default_value = "-", help = "Document path, or - for stdin")]
        input: String,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Validate { input } => {
            let doc = load(input, cli.strict)?;
            print!("{}", validation_report(&doc));
        }
        Command::Score { input, layer } => {
            let doc = load(input, cli.strict)?;
            let layer_id = layer.clone().unwrap_or_else(|| doc.root_layer_id.clone());
            if doc.layer(&layer_id).is_none() {
                return Err(CliError::LayerNotFound(layer_id));
            }
            let dictionary = match &cli.dictionary {
                Some(path) => read_dictionary(path)?,
                None => Dictionary::new(),
            };
            tracing::debug!(words = dictionary.len(), "dictionary loaded");
            let report = score_layer(&doc, &layer_id, &dictionary);
            println!("{} {}", report.score, report.status);
        }
        Command::Graph { input } => {
            let doc = load(input, cli.strict)?;
            println!("{}", serde_json::to_string_pretty(&project_graph(&doc))?);
        }
        Command::Roots { input } => {
            let doc = load(input, cli.strict)?;
            print!("{}", render_outline(&outline(&doc)));
        }
        Command::Normalize { input } => {
            let doc = load(input, cli.strict)?;
            println!("{}", export_document(&doc)?);
        }
    }
    Ok(())
}

fn read_input(path: &str) -> Result<String, CliError> {
    let result = if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        std::fs::read_to_string(path)
    };
    result.map_err(|source| CliError::Read { path: path.to_owned(), source })
}

fn read_dictionary(path: &Path) -> Result<Dictionary, CliError> {
    Dictionary::from_file(path).map_err(|source| CliError::Read { path: path.display().to_string(), source })
}

fn load(path: &str, strict: bool) -> Result<Document, CliError> {
    let json = read_input(path)?;
    let doc = if strict { import_document_strict(&json)? } else { import_document(&json)? };
    tracing::info!(layers = doc.layer_count(), root = %doc.root_layer_id, "document loaded");
    Ok(doc)
}
