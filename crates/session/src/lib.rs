//! Editor session layer for graphql-workbench.
//!
//! Connects an editor host (three text models: query, variables, results)
//! to the analysis engine and the network layer:
//!
//! - [`diagnostics`] computes engine diagnostics and publishes them as
//!   editor markers, replacing the model's full marker set each time.
//! - [`providers`] defines the completion/hover provider contracts and the
//!   engine-backed bridges that adapt coordinates between the editor's
//!   1-based and the engine's 0-based conventions.
//! - [`variables`] completes declared variable names inside the variables
//!   JSON document and derives its JSON-schema contract.
//! - [`Session`] owns the models and the schema and drives the
//!   change-diagnose-run cycle.

pub mod diagnostics;
mod host;
mod providers;
mod session;
pub mod variables;

pub use diagnostics::{diagnose, publish, DiagnoseOutcome, MARKER_OWNER};
pub use host::{EditorHost, LanguageId, TextModel};
pub use providers::{
    CompletionBridge, CompletionProvider, HoverBridge, HoverProvider, ProviderContext,
};
pub use session::{OperationRunner, SchemaLoader, Session, SessionState};
pub use variables::{variables_json_schema, VariablesCompletionProvider};
