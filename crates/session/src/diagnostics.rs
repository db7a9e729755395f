//! Diagnostics computation and marker publication.

use workbench_engine::{AnalysisEngine, EngineError, SharedSchema};
use workbench_types::{Diagnostic, Marker};

use crate::host::{EditorHost, TextModel};

/// Owner key under which the session publishes markers.
pub const MARKER_OWNER: &str = "graphql";

/// The result of one diagnostics pass over a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnoseOutcome {
    /// Whether the document is ready to execute.
    ///
    /// Holds `valid == diagnostics.is_empty()` by construction.
    pub valid: bool,
    /// Engine-convention diagnostics.
    pub diagnostics: Vec<Diagnostic>,
    /// The same findings in editor convention, ready to publish.
    pub markers: Vec<Marker>,
}

/// Runs the engine over a document.
///
/// Without a schema the engine degrades to syntax-only checking; the
/// outcome shape is the same.
pub async fn diagnose(
    engine: &dyn AnalysisEngine,
    source: &str,
    schema: Option<&SharedSchema>,
) -> Result<DiagnoseOutcome, EngineError> {
    let diagnostics = engine.diagnostics(source, schema).await?;
    let markers = diagnostics.iter().map(Marker::from).collect();

    Ok(DiagnoseOutcome {
        valid: diagnostics.is_empty(),
        diagnostics,
        markers,
    })
}

/// Publishes an outcome to the host, replacing the model's full marker set.
pub fn publish(host: &dyn EditorHost, model: &TextModel, outcome: &DiagnoseOutcome) {
    tracing::debug!(
        uri = model.uri(),
        markers = outcome.markers.len(),
        valid = outcome.valid,
        "publishing markers"
    );
    host.set_model_markers(model.uri(), MARKER_OWNER, outcome.markers.clone());
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use workbench_test_utils::{film_schema, ScriptedEngine};
    use workbench_types::{Diagnostic, EngineRange, Marker};

    use super::*;
    use crate::host::LanguageId;

    struct RecordingHost {
        calls: Mutex<Vec<(String, String, Vec<Marker>)>>,
    }

    impl RecordingHost {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl EditorHost for RecordingHost {
        fn set_model_markers(&self, uri: &str, owner: &str, markers: Vec<Marker>) {
            self.calls
                .lock()
                .unwrap()
                .push((uri.to_string(), owner.to_string(), markers));
        }
    }

    #[tokio::test]
    async fn valid_exactly_when_no_diagnostics() {
        let schema = film_schema();

        let clean = ScriptedEngine::new();
        let outcome = diagnose(&clean, "query { allFilms { title } }", Some(&schema))
            .await
            .unwrap();
        assert!(outcome.valid);
        assert!(outcome.markers.is_empty());

        let noisy = ScriptedEngine::new().push_diagnostics(vec![Diagnostic::error(
            "bad field",
            EngineRange::default(),
        )]);
        let outcome = diagnose(&noisy, "query { nope }", Some(&schema)).await.unwrap();
        assert!(!outcome.valid);
        assert_eq!(outcome.valid, outcome.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn markers_are_editor_convention() {
        let engine = ScriptedEngine::new().push_diagnostics(vec![Diagnostic::error(
            "bad field",
            EngineRange::default(),
        )]);
        let outcome = diagnose(&engine, "query { nope }", None).await.unwrap();

        // Every bound gains 1 going from engine to editor convention.
        assert_eq!(outcome.markers[0].start_line_number, 1);
        assert_eq!(outcome.markers[0].start_column, 1);
    }

    #[tokio::test]
    async fn publish_replaces_the_full_marker_set() {
        let host = RecordingHost::new();
        let model = TextModel::new("inmemory://q.graphql", LanguageId::GraphQL, "query { a }");
        let engine = ScriptedEngine::new()
            .push_diagnostics(vec![Diagnostic::error("first", EngineRange::default())])
            .push_diagnostics(Vec::new());

        let first = diagnose(&engine, model.get_value(), None).await.unwrap();
        publish(&host, &model, &first);
        let second = diagnose(&engine, model.get_value(), None).await.unwrap();
        publish(&host, &model, &second);

        let calls = host.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1, MARKER_OWNER);
        assert_eq!(calls[0].2.len(), 1);
        // The second publication clears the earlier marker.
        assert!(calls[1].2.is_empty());
    }
}
