//! docsift command-line interface.
//!
//! Without a subcommand the binary validates the documents directory, runs an
//! initial scan and serves the MCP protocol on stdio. The other subcommands run
//! a single operation and print its JSON result to stdout. Logs always go to
//! stderr.

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand, ValueEnum};
use docsift::IndexConfig;
use docsift::service::{DocumentService, Operation};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "docsift",
    version,
    about = "Index a directory of documents and search it over MCP",
    after_help = "Examples:\n  docsift                        # Serve ./documents over MCP stdio\n  docsift --dir /path/docs       # Use a custom directory\n  docsift search invoice -n 5    # One-shot search"
)]
struct Cli {
    /// Directory containing documents to process (default: ./documents)
    #[arg(short = 'd', long = "dir", global = true)]
    dir: Option<PathBuf>,

    /// Configuration file (.toml, .yaml, .yml or .json)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Scan once, then serve MCP on stdio (default)
    Serve,
    /// Scan the directory and print the indexed documents
    Scan,
    /// Search the indexed documents
    Search {
        query: String,
        /// Maximum number of results to return
        #[arg(short = 'n', long)]
        max_results: Option<usize>,
    },
    /// List indexed documents
    List,
    /// Print corpus statistics
    Stats,
    /// Print the full content of a document
    Content { filename: String },
    /// Call a tool by name with JSON arguments
    Call {
        tool: String,
        /// JSON object with the tool arguments
        #[arg(long)]
        args: Option<String>,
    },
    /// Print the tool descriptors
    Tools,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    #[value(name = "DEBUG")]
    Debug,
    #[value(name = "INFO")]
    Info,
    #[value(name = "WARNING")]
    Warning,
    #[value(name = "ERROR")]
    Error,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));

    // stdout carries the MCP protocol
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// `--config`, else a discovered `docsift.toml`, else defaults; `--dir` wins.
fn load_config(cli: &Cli) -> Result<IndexConfig> {
    let mut config = match &cli.config {
        Some(path) => IndexConfig::from_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => IndexConfig::discover()
            .context("Failed to load discovered config file")?
            .unwrap_or_default(),
    };

    if let Some(dir) = &cli.dir {
        config.documents_dir = dir.clone();
    }

    Ok(config)
}

fn parse_arguments(raw: Option<&str>) -> Result<Option<Map<String, Value>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match serde_json::from_str::<Value>(raw).context("Tool arguments are not valid JSON")? {
        Value::Object(map) => Ok(Some(map)),
        other => bail!("Tool arguments must be a JSON object, got {}", other),
    }
}

fn print_json(value: &Value) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(value)?);

    if value.get("error").is_some() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn execute(service: &DocumentService, operation: Operation) -> Value {
    service.execute(&operation).unwrap_or_else(|error| error.to_value())
}

async fn serve(service: DocumentService) -> Result<ExitCode> {
    tracing::info!("Starting docsift MCP server");
    tracing::info!("Documents directory: {}", service.index().root().display());

    let index = Arc::clone(service.index());
    let documents = tokio::task::spawn_blocking(move || index.scan())
        .await
        .context("Initial scan task failed")??;
    tracing::info!("Initial scan completed: {} documents processed", documents.len());

    docsift::mcp::start_mcp_server(service)
        .await
        .map_err(|e| anyhow!("MCP server failed: {}", e))?;

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let config = load_config(&cli)?;
    let documents_dir = config.documents_dir.clone();
    let service = DocumentService::from_config(config)
        .with_context(|| format!("Cannot use documents directory {}", documents_dir.display()))?;

    let command = cli.command.unwrap_or(Command::Serve);

    let operation = match command {
        Command::Serve => return serve(service).await,
        Command::Tools => return print_json(&serde_json::to_value(service.tools())?),
        Command::Scan => Operation::Scan,
        Command::Search { query, max_results } => Operation::search(query, max_results),
        Command::List => Operation::List,
        Command::Stats => Operation::Stats,
        Command::Content { filename } => Operation::get_content(filename),
        Command::Call { tool, args } => {
            let arguments = parse_arguments(args.as_deref())?;
            if tool != Operation::Scan.name() {
                service.index().scan()?;
            }
            return print_json(&service.call(&tool, arguments.as_ref()));
        }
    };

    if operation != Operation::Scan {
        service.index().scan()?;
    }

    print_json(&execute(&service, operation))
}
