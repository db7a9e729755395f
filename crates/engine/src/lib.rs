//! Analysis engine boundary for graphql-workbench.
//!
//! The session layer talks to the language engine exclusively through the
//! [`AnalysisEngine`] trait: diagnostics over a source text, hover content
//! for a position, and completion suggestions for a position. The default
//! implementation, [`ApolloEngine`], is built on apollo-rs.
//!
//! Positions crossing this boundary are always in engine convention
//! (0-based line, mode-adjusted character); the session layer owns the
//! conversion from editor coordinates.

mod apollo;
mod cursor;
mod line_index;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;
use async_trait::async_trait;
use workbench_types::{Diagnostic, EnginePosition};

pub use apollo::ApolloEngine;
pub use line_index::LineIndex;

/// A validated schema shared across the session.
///
/// Schemas are immutable once built; a reload replaces the whole `Arc`.
pub type SharedSchema = Arc<Valid<Schema>>;

/// Errors produced at the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The schema SDL failed to parse or validate.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// The request was cancelled before it completed.
    #[error("request cancelled")]
    Cancelled,

    /// An unexpected engine failure.
    #[error("engine error: {0}")]
    Internal(String),
}

/// Cooperative cancellation handle for in-flight engine requests.
///
/// A caller keeps one end, hands the other to the engine, and flips it when
/// the request becomes obsolete. Engines may check it between phases of
/// work; checking is best-effort.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the non-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the request as cancelled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// A completion suggestion as the engine produces it.
///
/// The session layer maps suggestions into editor completion items; the
/// engine only reports what exists at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The name presented and inserted.
    pub label: String,
    /// Type or signature information, when known.
    pub detail: Option<String>,
    /// Whether the schema marks this element `@deprecated`.
    pub deprecated: bool,
}

impl Suggestion {
    /// Creates a suggestion with no detail.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
            deprecated: false,
        }
    }

    /// Attaches detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Parses and validates SDL into a shared schema.
///
/// `path` is a label used in error reporting only; nothing is read from
/// disk here.
pub fn build_schema(sdl: &str, path: &str) -> Result<SharedSchema, EngineError> {
    match Schema::parse_and_validate(sdl, path) {
        Ok(schema) => Ok(Arc::new(schema)),
        Err(with_errors) => {
            let message = with_errors
                .errors
                .iter()
                .map(|d| d.error.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            Err(EngineError::InvalidSchema(message))
        }
    }
}

/// The language analysis contract.
///
/// All methods take the source text directly rather than a document handle
/// so engines stay stateless; caching is an engine-internal concern.
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    /// Computes diagnostics for a query document.
    ///
    /// Without a schema only syntax errors are reported; with one, full
    /// validation against it. An unparseable document yields diagnostics,
    /// not an error.
    async fn diagnostics(
        &self,
        source: &str,
        schema: Option<&SharedSchema>,
    ) -> Result<Vec<Diagnostic>, EngineError>;

    /// Computes hover content for a position, or `None` when there is
    /// nothing to describe there.
    async fn hover(
        &self,
        schema: &SharedSchema,
        source: &str,
        position: EnginePosition,
        cancel: Option<&CancelToken>,
    ) -> Result<Option<String>, EngineError>;

    /// Computes completion suggestions for a position.
    async fn completions(
        &self,
        schema: &SharedSchema,
        source: &str,
        position: EnginePosition,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<Suggestion>, EngineError>;
}
