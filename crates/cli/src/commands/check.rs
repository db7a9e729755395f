//! The `check` subcommand: offline diagnostics with an exit code.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use workbench_engine::ApolloEngine;
use workbench_session::diagnose;

use crate::commands::{load_schema_file, read_to_string};

pub async fn run(schema: PathBuf, query: Option<PathBuf>) -> Result<ExitCode> {
    let schema = load_schema_file(&schema)?;
    let (source, label) = match &query {
        Some(path) => (read_to_string(path)?, path.display().to_string()),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read query from stdin")?;
            (buffer, "<stdin>".to_string())
        }
    };

    let outcome = diagnose(&ApolloEngine::new(), &source, Some(&schema)).await?;

    if outcome.valid {
        println!("{} {label}", "✓".green());
        return Ok(ExitCode::SUCCESS);
    }

    for marker in &outcome.markers {
        println!(
            "{} {label}:{}:{} {}",
            "✗".red(),
            marker.start_line_number,
            marker.start_column,
            marker.message
        );
    }
    println!(
        "{}",
        format!("{} problem(s) found", outcome.markers.len()).red()
    );
    Ok(ExitCode::FAILURE)
}
