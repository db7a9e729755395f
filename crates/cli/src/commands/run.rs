//! The `run` subcommand: introspect, diagnose, execute, print.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use workbench_engine::ApolloEngine;
use workbench_session::{Session, SessionState};

use crate::commands::read_to_string;
use crate::host::TerminalHost;
use crate::net::{client_with_headers, HttpRunner, IntrospectLoader};

/// Query used when no document is supplied.
const DEFAULT_QUERY: &str = "{ __typename }";

pub async fn run(
    endpoint: String,
    query: Option<PathBuf>,
    variables: Option<PathBuf>,
    headers: Vec<String>,
) -> Result<ExitCode> {
    let client = client_with_headers(&headers)?;
    let query_text = match &query {
        Some(path) => read_to_string(path)?,
        None => DEFAULT_QUERY.to_string(),
    };

    let mut session = Session::new(
        endpoint,
        Arc::new(ApolloEngine::new()),
        Arc::new(TerminalHost::new()),
        Arc::new(HttpRunner::new(client.clone())),
    );

    println!("{}", "Introspecting endpoint...".dimmed());
    session.load_schema(&IntrospectLoader::new(client)).await?;
    debug_assert_eq!(session.state(), SessionState::SchemaLoaded);

    if let Some(path) = &variables {
        session.on_variables_change(read_to_string(path)?);
    }
    session.on_query_change(query_text).await;

    let results = session.results_model().get_value();
    if results.is_empty() {
        println!("{}", "Query has problems; not executed.".yellow());
        return Ok(ExitCode::FAILURE);
    }

    println!("{results}");
    if session.last_run_failed() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
