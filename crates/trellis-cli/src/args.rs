use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Graph-contextual semantic retrieval.
#[derive(Debug, Parser)]
#[command(name = "trellis")]
#[command(version)]
#[command(about = "Semantic fragment search with document, author, and related context")]
#[command(propagate_version = true)]
pub struct Cli {
    /// TOML configuration file. Missing sections take defaults.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// SQLite database file. Overrides `storage.db_path`.
    #[arg(long, global = true, value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `trellis_retrieval=trace`.
    /// Overrides `TRELLIS_LOG` and the config file.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one query and print the structured response
    Query(QueryArgs),
    /// Serve line-delimited JSON tool requests on stdin/stdout
    Serve,
    /// Print the tool descriptor
    Describe,
    /// Load a JSON corpus into the database and embed its fragments
    Import(ImportArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Query(_) => "query",
            Command::Serve => "serve",
            Command::Describe => "describe",
            Command::Import(_) => "import",
        }
    }
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Query text
    pub text: String,

    /// Maximum results (clamped to the configured maximum)
    #[arg(long, short = 'n', value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Skip graph expansion
    #[arg(long)]
    pub no_expand: bool,

    /// Pretty-print the JSON response
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Corpus file: `{ "authors": [...], "documents": [...], "fragments": [...] }`
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,
}
