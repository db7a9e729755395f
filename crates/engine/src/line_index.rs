//! Line index for position/offset conversion.

use workbench_types::EnginePosition;

/// Maps engine-convention positions to byte offsets in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Create a new line index from source text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Byte offset for a position, clamped to the end of its line.
    ///
    /// Returns `None` when the line does not exist in the text.
    #[must_use]
    pub fn offset(&self, position: EnginePosition) -> Option<usize> {
        let line = position.line as usize;
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.len, |next| next.saturating_sub(1));
        Some((start + position.character as usize).min(end))
    }

    /// Number of lines in the indexed text.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
