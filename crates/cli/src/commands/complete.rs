//! The `complete` subcommand: completion items at an editor position.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use workbench_engine::ApolloEngine;
use workbench_session::{
    CompletionBridge, CompletionProvider, ProviderContext, VariablesCompletionProvider,
};
use workbench_types::EditorPosition;

use crate::commands::{load_schema_file, read_to_string};

pub async fn run(
    schema: PathBuf,
    query: PathBuf,
    line: u32,
    column: u32,
    variables_doc: bool,
) -> Result<ExitCode> {
    let schema = load_schema_file(&schema)?;
    let query_source = read_to_string(&query)?;
    let position = EditorPosition::new(line, column);

    let items = if variables_doc {
        // The variables provider reads the query model, not the JSON text.
        let ctx = ProviderContext {
            source: "",
            query_source: &query_source,
            schema: Some(&schema),
        };
        VariablesCompletionProvider::new().completions(ctx, position).await
    } else {
        let ctx = ProviderContext {
            source: &query_source,
            query_source: &query_source,
            schema: Some(&schema),
        };
        CompletionBridge::new(Arc::new(ApolloEngine::new()))
            .completions(ctx, position)
            .await
    };

    if items.is_empty() {
        println!("{}", "no completions".dimmed());
        return Ok(ExitCode::SUCCESS);
    }

    for item in &items {
        if item.label == item.insert_text {
            println!("{}", item.insert_text);
        } else {
            println!("{} {}", item.insert_text, format!("({})", item.label).dimmed());
        }
    }
    Ok(ExitCode::SUCCESS)
}
