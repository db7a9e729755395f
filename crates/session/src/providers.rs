//! Provider interfaces and the engine-backed bridges.
//!
//! Providers are registered on the session per language id and receive a
//! [`ProviderContext`] instead of reaching for globals, so one process can
//! host several sessions.

use std::sync::Arc;

use async_trait::async_trait;
use workbench_engine::{AnalysisEngine, SharedSchema};
use workbench_types::{
    CompletionItem, CompletionKind, EditorPosition, HoverContents, PositionMode,
};

/// Read-only session state handed to a provider per request.
#[derive(Clone, Copy)]
pub struct ProviderContext<'a> {
    /// Text of the model the request targets.
    pub source: &'a str,
    /// Text of the query model, for providers attached to other models.
    pub query_source: &'a str,
    /// The active schema, absent until introspection succeeds.
    pub schema: Option<&'a SharedSchema>,
}

/// Completion provider contract. Positions arrive in editor convention.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Items for the given position; empty when there is nothing to offer.
    async fn completions(
        &self,
        ctx: ProviderContext<'_>,
        position: EditorPosition,
    ) -> Vec<CompletionItem>;
}

/// Hover provider contract. Positions arrive in editor convention.
#[async_trait]
pub trait HoverProvider: Send + Sync {
    /// Hover contents for the given position; empty when there is nothing
    /// to describe.
    async fn hover(&self, ctx: ProviderContext<'_>, position: EditorPosition) -> HoverContents;
}

/// Adapts engine completions to the editor contract.
///
/// Converts the position under [`PositionMode::Completion`] and maps each
/// suggestion to an item whose insert text is its label; no de-duplication,
/// ranking or filtering happens here.
pub struct CompletionBridge {
    engine: Arc<dyn AnalysisEngine>,
}

impl CompletionBridge {
    /// Wraps an engine.
    #[must_use]
    pub fn new(engine: Arc<dyn AnalysisEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl CompletionProvider for CompletionBridge {
    async fn completions(
        &self,
        ctx: ProviderContext<'_>,
        position: EditorPosition,
    ) -> Vec<CompletionItem> {
        let Some(schema) = ctx.schema else {
            return Vec::new();
        };
        let engine_position = position.to_engine(PositionMode::Completion);

        match self
            .engine
            .completions(schema, ctx.source, engine_position, None)
            .await
        {
            Ok(suggestions) => suggestions
                .into_iter()
                .map(|s| CompletionItem::new(s.label.clone(), s.label, CompletionKind::Field))
                .collect(),
            Err(error) => {
                // Fatal to this request only.
                tracing::warn!(%error, "completion request failed");
                Vec::new()
            }
        }
    }
}

/// Adapts engine hover to the editor contract.
pub struct HoverBridge {
    engine: Arc<dyn AnalysisEngine>,
}

impl HoverBridge {
    /// Wraps an engine.
    #[must_use]
    pub fn new(engine: Arc<dyn AnalysisEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl HoverProvider for HoverBridge {
    async fn hover(&self, ctx: ProviderContext<'_>, position: EditorPosition) -> HoverContents {
        let Some(schema) = ctx.schema else {
            return HoverContents::empty();
        };
        let engine_position = position.to_engine(PositionMode::Hover);

        match self
            .engine
            .hover(schema, ctx.source, engine_position, None)
            .await
        {
            Ok(Some(contents)) => HoverContents::single(contents),
            Ok(None) => HoverContents::empty(),
            Err(error) => {
                tracing::warn!(%error, "hover request failed");
                HoverContents::empty()
            }
        }
    }
}
