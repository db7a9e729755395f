//! The session controller.
//!
//! Owns the three text models, the schema, and the provider registrations,
//! and orchestrates the change-driven diagnose/publish/run cycle.

use std::sync::Arc;

use anyhow::Context as _;
use async_trait::async_trait;
use workbench_engine::{build_schema, AnalysisEngine, SharedSchema};
use workbench_facts::extract;
use workbench_types::{CompletionItem, EditorPosition, HoverContents};

use crate::diagnostics::{self, DiagnoseOutcome};
use crate::host::{EditorHost, LanguageId, TextModel};
use crate::providers::{
    CompletionBridge, CompletionProvider, HoverBridge, HoverProvider, ProviderContext,
};
use crate::variables::{variables_json_schema, VariablesCompletionProvider};

/// Fetches a schema as SDL for a session.
#[async_trait]
pub trait SchemaLoader: Send + Sync {
    /// Returns the endpoint's schema as SDL text.
    async fn load(&self, endpoint: &str) -> anyhow::Result<String>;
}

/// Executes an operation for a session.
#[async_trait]
pub trait OperationRunner: Send + Sync {
    /// Runs `query` with the variables document text, returning the
    /// server's `{data, errors}` payload.
    async fn run(
        &self,
        endpoint: &str,
        query: &str,
        variables: &str,
    ) -> anyhow::Result<serde_json::Value>;
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No schema yet; schema-dependent features degrade to empty responses.
    Uninitialized,
    /// A schema is loaded and providers are registered.
    SchemaLoaded,
}

/// One editing session: a query document, its variables document and a
/// results document, wired to an engine, a host and a runner.
pub struct Session {
    endpoint: String,
    engine: Arc<dyn AnalysisEngine>,
    host: Arc<dyn EditorHost>,
    runner: Arc<dyn OperationRunner>,
    schema: Option<SharedSchema>,
    query: TextModel,
    variables: TextModel,
    results: TextModel,
    completion_providers: Vec<(LanguageId, Arc<dyn CompletionProvider>)>,
    hover_providers: Vec<(LanguageId, Arc<dyn HoverProvider>)>,
    /// Bumped on every query change; [`apply_outcome`](Self::apply_outcome)
    /// discards outcomes stamped with an older generation.
    generation: u64,
    last_run_failed: bool,
}

impl Session {
    /// Creates a schema-less session over empty documents.
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        engine: Arc<dyn AnalysisEngine>,
        host: Arc<dyn EditorHost>,
        runner: Arc<dyn OperationRunner>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            engine,
            host,
            runner,
            schema: None,
            query: TextModel::new("inmemory://query.graphql", LanguageId::GraphQL, ""),
            variables: TextModel::new("inmemory://variables.json", LanguageId::Json, "{}"),
            results: TextModel::new("inmemory://results.json", LanguageId::Json, ""),
            completion_providers: Vec::new(),
            hover_providers: Vec::new(),
            generation: 0,
            last_run_failed: false,
        }
    }

    /// The session's lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        match self.schema {
            Some(_) => SessionState::SchemaLoaded,
            None => SessionState::Uninitialized,
        }
    }

    /// The active schema, when one is loaded.
    #[must_use]
    pub const fn schema(&self) -> Option<&SharedSchema> {
        self.schema.as_ref()
    }

    /// The query document.
    #[must_use]
    pub const fn query_model(&self) -> &TextModel {
        &self.query
    }

    /// The variables document.
    #[must_use]
    pub const fn variables_model(&self) -> &TextModel {
        &self.variables
    }

    /// The results document.
    #[must_use]
    pub const fn results_model(&self) -> &TextModel {
        &self.results
    }

    /// The change generation of the query document.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Registers a completion provider for a language.
    pub fn register_completion_provider(
        &mut self,
        language: LanguageId,
        provider: Arc<dyn CompletionProvider>,
    ) {
        self.completion_providers.push((language, provider));
    }

    /// Registers a hover provider for a language.
    pub fn register_hover_provider(
        &mut self,
        language: LanguageId,
        provider: Arc<dyn HoverProvider>,
    ) {
        self.hover_providers.push((language, provider));
    }

    /// Loads the schema through `loader` and registers the default
    /// providers.
    ///
    /// On failure the session stays schema-less; there is no automatic
    /// retry, and schema-dependent features keep degrading to empty
    /// responses.
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint))]
    pub async fn load_schema(&mut self, loader: &dyn SchemaLoader) -> anyhow::Result<()> {
        let sdl = loader
            .load(&self.endpoint)
            .await
            .context("failed to fetch schema")?;
        let schema = build_schema(&sdl, "introspected.graphql").context("invalid schema")?;

        tracing::info!(types = schema.types.len(), "schema loaded");
        let first_load = self.schema.is_none();
        self.schema = Some(schema);

        // A later introspection replaces the schema; the default providers
        // are registered once, on the first transition out of
        // `Uninitialized`.
        if first_load {
            self.register_completion_provider(
                LanguageId::GraphQL,
                Arc::new(CompletionBridge::new(self.engine.clone())),
            );
            self.register_hover_provider(
                LanguageId::GraphQL,
                Arc::new(HoverBridge::new(self.engine.clone())),
            );
            self.register_completion_provider(
                LanguageId::Json,
                Arc::new(VariablesCompletionProvider::new()),
            );
        }
        self.configure_variables_schema();

        Ok(())
    }

    /// Derives the variables JSON schema from the current query facts and
    /// hands it to the host's JSON tooling.
    ///
    /// Called on schema load and again on every query change, so the
    /// contract tracks the declared variables as the user edits.
    fn configure_variables_schema(&self) {
        // An empty or unparseable query still gets a (vacuous) contract.
        let facts = extract(self.schema.as_deref(), self.query.get_value()).unwrap_or_default();
        self.host
            .set_json_diagnostics_schema(self.variables.uri(), variables_json_schema(&facts));
    }

    /// Replaces the query text, re-diagnoses it and, when the document is
    /// valid and the outcome still fresh, runs the operation.
    ///
    /// Engine failures are fatal to this pass only; the session stays
    /// usable and the previous markers stay in place.
    #[tracing::instrument(skip_all, fields(version = self.query.version() + 1))]
    pub async fn on_query_change(&mut self, text: impl Into<String> + Send) {
        self.query.set_value(text);
        self.generation += 1;
        let generation = self.generation;
        self.configure_variables_schema();

        let outcome = match diagnostics::diagnose(
            self.engine.as_ref(),
            self.query.get_value(),
            self.schema.as_ref(),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::warn!(%error, "diagnostics pass failed");
                return;
            }
        };

        self.apply_outcome(generation, &outcome).await;
    }

    /// Replaces the variables text.
    pub fn on_variables_change(&mut self, text: impl Into<String>) {
        self.variables.set_value(text);
    }

    /// Publishes a diagnostics outcome and, when it is valid, runs the
    /// operation.
    ///
    /// `generation` is the query generation the outcome was computed for;
    /// an outcome superseded by a newer query revision is dropped without
    /// touching markers or results. Hosts that schedule diagnostics
    /// themselves pair [`generation`](Self::generation) with this check.
    pub async fn apply_outcome(&mut self, generation: u64, outcome: &DiagnoseOutcome) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "discarding stale outcome");
            return;
        }
        diagnostics::publish(self.host.as_ref(), &self.query, outcome);
        if outcome.valid {
            self.run_operation().await;
        }
    }

    /// Executes the current operation and replaces the results document.
    ///
    /// Network failure surfaces into the results document, never out of
    /// this method.
    #[tracing::instrument(skip_all)]
    pub async fn run_operation(&mut self) {
        let result = self
            .runner
            .run(
                &self.endpoint,
                self.query.get_value(),
                self.variables.get_value(),
            )
            .await;

        let rendered = match result {
            Ok(value) => {
                self.last_run_failed = false;
                render_response(&value)
            }
            Err(error) => {
                tracing::warn!(%error, "operation failed");
                self.last_run_failed = true;
                format!("Request failed: {error:#}")
            }
        };
        self.results.set_value(rendered);
    }

    /// Whether the most recent execution failed at the transport level.
    ///
    /// The failure text lands in the results document either way; callers
    /// that need an exit status read this instead of sniffing the text.
    #[must_use]
    pub const fn last_run_failed(&self) -> bool {
        self.last_run_failed
    }

    /// Completion items for a model, routed by its language id.
    pub async fn completions(
        &self,
        language: LanguageId,
        position: EditorPosition,
    ) -> Vec<CompletionItem> {
        let ctx = self.provider_context(language);
        let mut items = Vec::new();
        for (registered, provider) in &self.completion_providers {
            if *registered == language {
                items.extend(provider.completions(ctx, position).await);
            }
        }
        items
    }

    /// Hover contents for a model, routed by its language id.
    pub async fn hover(&self, language: LanguageId, position: EditorPosition) -> HoverContents {
        let ctx = self.provider_context(language);
        for (registered, provider) in &self.hover_providers {
            if *registered == language {
                let contents = provider.hover(ctx, position).await;
                if !contents.is_empty() {
                    return contents;
                }
            }
        }
        HoverContents::empty()
    }

    fn provider_context(&self, language: LanguageId) -> ProviderContext<'_> {
        let source = match language {
            LanguageId::GraphQL => self.query.get_value(),
            LanguageId::Json => self.variables.get_value(),
        };
        ProviderContext {
            source,
            query_source: self.query.get_value(),
            schema: self.schema.as_ref(),
        }
    }
}

/// Renders an execution response for the results document: the `data`
/// payload when present, else `errors`, else the whole response.
fn render_response(value: &serde_json::Value) -> String {
    let payload = match value.get("data") {
        Some(data) if !data.is_null() => data,
        _ => value.get("errors").unwrap_or(value),
    };
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}
