//! Diagnostics (engine convention) and editor markers (editor convention).

use crate::position::EngineRange;
use crate::severity::{MarkerSeverity, Severity};

/// A diagnostic as produced by the analysis engine.
///
/// Positions are in the engine convention (0-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub range: EngineRange,
}

impl Diagnostic {
    #[must_use]
    pub fn error(message: impl Into<String>, range: EngineRange) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            range,
        }
    }
}

/// A marker ready for publication to the editor widget.
///
/// All bounds are in the editor convention (1-based lines and columns).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub start_line_number: u32,
    pub start_column: u32,
    pub end_line_number: u32,
    pub end_column: u32,
    pub message: String,
    pub severity: MarkerSeverity,
}

impl From<&Diagnostic> for Marker {
    /// Shift every line and character bound up by one and map the severity to
    /// an error marker, matching how the editor surfaces engine diagnostics.
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            start_line_number: diagnostic.range.start.line + 1,
            start_column: diagnostic.range.start.character + 1,
            end_line_number: diagnostic.range.end.line + 1,
            end_column: diagnostic.range.end.character + 1,
            message: diagnostic.message.clone(),
            severity: MarkerSeverity::Error,
        }
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}:{} {}: {}",
            self.start_line_number,
            self.start_column,
            self.end_line_number,
            self.end_column,
            self.severity,
            self.message
        )
    }
}
