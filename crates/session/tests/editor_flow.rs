//! End-to-end session flow over the real engine: load a schema, edit the
//! query, observe markers, execution and provider responses.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use workbench_engine::ApolloEngine;
use workbench_session::{
    EditorHost, LanguageId, OperationRunner, SchemaLoader, Session, SessionState,
};
use workbench_test_utils::{extract_cursor, FILM_SCHEMA, NAMED_QUERY};
use workbench_types::{EditorPosition, Marker};

struct RecordingHost {
    markers: Mutex<Vec<Vec<Marker>>>,
}

impl EditorHost for RecordingHost {
    fn set_model_markers(&self, _uri: &str, _owner: &str, markers: Vec<Marker>) {
        self.markers.lock().unwrap().push(markers);
    }
}

struct RecordingRunner {
    requests: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl OperationRunner for RecordingRunner {
    async fn run(
        &self,
        _endpoint: &str,
        query: &str,
        variables: &str,
    ) -> anyhow::Result<serde_json::Value> {
        self.requests
            .lock()
            .unwrap()
            .push((query.to_string(), variables.to_string()));
        Ok(serde_json::json!({ "data": { "allFilms": [{ "title": "A New Hope" }] } }))
    }
}

struct FixtureLoader;

#[async_trait]
impl SchemaLoader for FixtureLoader {
    async fn load(&self, _endpoint: &str) -> anyhow::Result<String> {
        Ok(FILM_SCHEMA.to_string())
    }
}

fn new_session() -> (Session, Arc<RecordingHost>, Arc<RecordingRunner>) {
    let host = Arc::new(RecordingHost {
        markers: Mutex::new(Vec::new()),
    });
    let runner = Arc::new(RecordingRunner {
        requests: Mutex::new(Vec::new()),
    });
    let session = Session::new(
        "https://example.test/graphql",
        Arc::new(ApolloEngine::new()),
        host.clone(),
        runner.clone(),
    );
    (session, host, runner)
}

#[tokio::test]
async fn full_editing_cycle() {
    let (mut session, host, runner) = new_session();
    assert_eq!(session.state(), SessionState::Uninitialized);

    session.load_schema(&FixtureLoader).await.unwrap();
    assert_eq!(session.state(), SessionState::SchemaLoaded);

    let variables = r#"{ "filmSkip": 1, "speciesSkip": 2 }"#;
    session.on_variables_change(variables);
    session.on_query_change(NAMED_QUERY).await;

    // A valid query publishes an empty marker set and runs once, with the
    // variables document text forwarded verbatim.
    let markers = host.markers.lock().unwrap();
    assert_eq!(markers.len(), 1);
    assert!(markers[0].is_empty());
    let requests = runner.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, NAMED_QUERY);
    assert_eq!(requests[0].1, variables);
    assert!(session.results_model().get_value().contains("A New Hope"));
}

#[tokio::test]
async fn breaking_the_query_swaps_markers_in() {
    let (mut session, host, runner) = new_session();
    session.load_schema(&FixtureLoader).await.unwrap();

    session.on_query_change(NAMED_QUERY).await;
    session.on_query_change("query { allFilms { nope } }").await;

    let markers = host.markers.lock().unwrap();
    assert_eq!(markers.len(), 2);
    assert!(markers[0].is_empty());
    assert_eq!(markers[1].len(), 1);
    assert!(markers[1][0].message.contains("nope"));
    // Only the valid revision executed.
    assert_eq!(runner.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn query_completions_through_the_session() {
    let (mut session, _host, _runner) = new_session();
    session.load_schema(&FixtureLoader).await.unwrap();

    let (source, cursor) = extract_cursor("query {\n  allFilms {\n    *\n  }\n}");
    session.on_query_change(source).await;

    let items = session
        .completions(LanguageId::GraphQL, cursor.to_editor())
        .await;
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    assert!(labels.contains(&"title"));
    assert!(labels.contains(&"director"));
}

#[tokio::test]
async fn hover_through_the_session() {
    let (mut session, _host, _runner) = new_session();
    session.load_schema(&FixtureLoader).await.unwrap();

    let (source, cursor) = extract_cursor("query {\n  allFilms {\n    ti*tle\n  }\n}");
    session.on_query_change(source).await;

    // Hover keeps the raw column: editor column equals engine character.
    let position = EditorPosition::new(cursor.line + 1, cursor.character);
    let contents = session.hover(LanguageId::GraphQL, position).await;
    assert!(!contents.is_empty());
    assert!(contents.contents[0].value.contains("**Field:** `title`"));
}

#[tokio::test]
async fn variables_completions_through_the_session() {
    let (mut session, _host, _runner) = new_session();
    session.load_schema(&FixtureLoader).await.unwrap();
    session.on_query_change(NAMED_QUERY).await;

    let items = session
        .completions(LanguageId::Json, EditorPosition::new(1, 2))
        .await;
    let inserts: Vec<&str> = items.iter().map(|i| i.insert_text.as_str()).collect();
    assert_eq!(inserts, vec!["filmSkip", "speciesSkip"]);
}
