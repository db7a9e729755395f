mod commands;
mod host;
mod net;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "graphql-workbench")]
#[command(about = "GraphQL query workbench: diagnostics, completion, hover and execution", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Introspect an endpoint, check the query and execute it when valid
    Run {
        /// GraphQL endpoint URL
        #[arg(long)]
        endpoint: String,

        /// Query document file (defaults to a bare __typename query)
        #[arg(long, value_name = "FILE")]
        query: Option<PathBuf>,

        /// Variables JSON file
        #[arg(long, value_name = "FILE")]
        variables: Option<PathBuf>,

        /// HTTP headers to include, "Header-Name: Header-Value"
        #[arg(long = "header", short = 'H', value_name = "HEADER")]
        headers: Vec<String>,
    },

    /// Check a query against a local schema file, offline
    Check {
        /// Schema SDL file
        #[arg(long, value_name = "FILE")]
        schema: PathBuf,

        /// Query document file (reads stdin if not specified)
        #[arg(long, value_name = "FILE")]
        query: Option<PathBuf>,
    },

    /// Download an endpoint's schema via introspection
    Introspect {
        /// GraphQL endpoint URL
        #[arg(long)]
        endpoint: String,

        /// Output file path (writes to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "sdl")]
        format: commands::introspect::SchemaFormat,

        /// HTTP headers to include, "Header-Name: Header-Value"
        #[arg(long = "header", short = 'H', value_name = "HEADER")]
        headers: Vec<String>,
    },

    /// Print completion items at an editor position (1-based line/column)
    Complete {
        /// Schema SDL file
        #[arg(long, value_name = "FILE")]
        schema: PathBuf,

        /// Query document file
        #[arg(long, value_name = "FILE")]
        query: PathBuf,

        /// 1-based line number
        #[arg(long)]
        line: u32,

        /// 1-based column
        #[arg(long)]
        column: u32,

        /// Complete inside the variables JSON document instead of the query
        #[arg(long)]
        variables_doc: bool,
    },

    /// Print hover contents at an editor position (1-based line/column)
    Hover {
        /// Schema SDL file
        #[arg(long, value_name = "FILE")]
        schema: PathBuf,

        /// Query document file
        #[arg(long, value_name = "FILE")]
        query: PathBuf,

        /// 1-based line number
        #[arg(long)]
        line: u32,

        /// 1-based column
        #[arg(long)]
        column: u32,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, anyhow::Error> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            endpoint,
            query,
            variables,
            headers,
        } => commands::run::run(endpoint, query, variables, headers).await,
        Commands::Check { schema, query } => commands::check::run(schema, query).await,
        Commands::Introspect {
            endpoint,
            output,
            format,
            headers,
        } => commands::introspect::run(endpoint, output, format, headers).await,
        Commands::Complete {
            schema,
            query,
            line,
            column,
            variables_doc,
        } => commands::complete::run(schema, query, line, column, variables_doc).await,
        Commands::Hover {
            schema,
            query,
            line,
            column,
        } => commands::hover::run(schema, query, line, column).await,
    }
}

/// Initialize tracing/logging based on the RUST_LOG env var.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}
