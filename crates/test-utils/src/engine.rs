//! A scripted [`AnalysisEngine`] for session-level tests.

use std::sync::Mutex;

use async_trait::async_trait;
use workbench_engine::{AnalysisEngine, CancelToken, EngineError, SharedSchema, Suggestion};
use workbench_types::{Diagnostic, EnginePosition};

/// An engine that replays canned responses and records the positions it
/// was asked about.
///
/// Diagnostics responses are consumed in order, the last one repeating;
/// hover and completion responses are fixed.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    diagnostics: Mutex<Vec<Vec<Diagnostic>>>,
    hover: Option<String>,
    completions: Vec<Suggestion>,
    pub seen_positions: Mutex<Vec<EnginePosition>>,
}

impl ScriptedEngine {
    /// An engine that reports no diagnostics and has nothing to say.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a diagnostics response.
    pub fn push_diagnostics(self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics.lock().unwrap().push(diagnostics);
        self
    }

    /// Sets the fixed hover response.
    pub fn with_hover(mut self, contents: impl Into<String>) -> Self {
        self.hover = Some(contents.into());
        self
    }

    /// Sets the fixed completion response.
    pub fn with_completions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.completions = suggestions;
        self
    }
}

#[async_trait]
impl AnalysisEngine for ScriptedEngine {
    async fn diagnostics(
        &self,
        _source: &str,
        _schema: Option<&SharedSchema>,
    ) -> Result<Vec<Diagnostic>, EngineError> {
        let mut queue = self.diagnostics.lock().unwrap();
        if queue.len() > 1 {
            Ok(queue.remove(0))
        } else {
            Ok(queue.first().cloned().unwrap_or_default())
        }
    }

    async fn hover(
        &self,
        _schema: &SharedSchema,
        _source: &str,
        position: EnginePosition,
        _cancel: Option<&CancelToken>,
    ) -> Result<Option<String>, EngineError> {
        self.seen_positions.lock().unwrap().push(position);
        Ok(self.hover.clone())
    }

    async fn completions(
        &self,
        _schema: &SharedSchema,
        _source: &str,
        position: EnginePosition,
        _cancel: Option<&CancelToken>,
    ) -> Result<Vec<Suggestion>, EngineError> {
        self.seen_positions.lock().unwrap().push(position);
        Ok(self.completions.clone())
    }
}
