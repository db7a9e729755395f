//! Shared test infrastructure for the graphql-workbench crates.

// Test utilities are less strict than production code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

pub mod cursor;
pub mod engine;
pub mod fixtures;

pub use cursor::extract_cursor;
pub use engine::ScriptedEngine;
pub use fixtures::{film_schema, FILM_SCHEMA, NAMED_QUERY};
