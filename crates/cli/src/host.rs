//! Terminal implementation of the editor-host contract.

use colored::Colorize;
use workbench_session::EditorHost;
use workbench_types::Marker;

/// Prints published markers to the terminal in place of squiggly lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalHost;

impl TerminalHost {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EditorHost for TerminalHost {
    fn set_model_markers(&self, uri: &str, _owner: &str, markers: Vec<Marker>) {
        if markers.is_empty() {
            println!("{} {uri}", "✓".green());
            return;
        }
        for marker in &markers {
            println!(
                "{} {uri}:{}:{} {}",
                "✗".red(),
                marker.start_line_number,
                marker.start_column,
                marker.message
            );
        }
    }
}
