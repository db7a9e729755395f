//! The `introspect` subcommand: dump a remote schema.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use workbench_introspect::introspection_to_sdl;

use crate::net::client_with_headers;

/// Schema output format.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum SchemaFormat {
    /// SDL (Schema Definition Language) format
    #[default]
    Sdl,
    /// JSON introspection format
    Json,
}

#[tracing::instrument(skip(headers))]
pub async fn run(
    endpoint: String,
    output: Option<PathBuf>,
    format: SchemaFormat,
    headers: Vec<String>,
) -> Result<ExitCode> {
    let client = client_with_headers(&headers)?;

    let text = match format {
        SchemaFormat::Sdl => {
            let reply = client
                .introspect(&endpoint)
                .await
                .context("introspection failed")?;
            introspection_to_sdl(&reply)
        }
        SchemaFormat::Json => {
            let raw = client
                .introspect_raw(&endpoint)
                .await
                .context("introspection failed")?;
            serde_json::to_string_pretty(&raw).context("failed to render response")?
        }
    };

    match output {
        Some(path) => {
            let mut file = std::fs::File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            writeln!(file, "{text}")
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{} schema written to {}", "✓".green(), path.display());
        }
        None => println!("{text}"),
    }

    Ok(ExitCode::SUCCESS)
}
