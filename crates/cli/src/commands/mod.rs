//! Subcommand implementations.

pub mod check;
pub mod complete;
pub mod hover;
pub mod introspect;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use workbench_engine::{build_schema, SharedSchema};

/// Reads a file into a string with a path-carrying error.
pub fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Loads and validates a schema SDL file.
pub fn load_schema_file(path: &Path) -> Result<SharedSchema> {
    let sdl = read_to_string(path)?;
    build_schema(&sdl, &path.display().to_string())
        .with_context(|| format!("invalid schema in {}", path.display()))
}
