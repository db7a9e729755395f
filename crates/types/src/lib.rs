//! Foundation types for graphql-workbench.
//!
//! This crate has zero dependencies and defines the vocabulary shared by the
//! extraction, engine, and session layers: the two coordinate conventions and
//! the adapter between them, engine diagnostics, editor markers, and the
//! completion/hover payload shapes.

mod completion;
mod diagnostic;
mod position;
mod severity;

pub use completion::{CompletionItem, CompletionKind, HoverContents, HoverEntry};
pub use diagnostic::{Diagnostic, Marker};
pub use position::{EditorPosition, EnginePosition, EngineRange, PositionMode};
pub use severity::{MarkerSeverity, Severity};
