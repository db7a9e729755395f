//! The `hover` subcommand: hover contents at an editor position.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use workbench_engine::ApolloEngine;
use workbench_session::{HoverBridge, HoverProvider, ProviderContext};
use workbench_types::EditorPosition;

use crate::commands::{load_schema_file, read_to_string};

pub async fn run(schema: PathBuf, query: PathBuf, line: u32, column: u32) -> Result<ExitCode> {
    let schema = load_schema_file(&schema)?;
    let query_source = read_to_string(&query)?;

    let ctx = ProviderContext {
        source: &query_source,
        query_source: &query_source,
        schema: Some(&schema),
    };
    let contents = HoverBridge::new(Arc::new(ApolloEngine::new()))
        .hover(ctx, EditorPosition::new(line, column))
        .await;

    if contents.is_empty() {
        println!("{}", "no hover information".dimmed());
        return Ok(ExitCode::SUCCESS);
    }

    for entry in &contents.contents {
        println!("{}", entry.value);
    }
    Ok(ExitCode::SUCCESS)
}
