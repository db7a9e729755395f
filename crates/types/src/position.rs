//! Coordinate conventions and conversions between them.
//!
//! Two conventions coexist in this system:
//!
//! - the *editor convention*: 1-based line numbers and 1-based columns, as
//!   used by the editing widget and its marker API;
//! - the *engine convention*: 0-based lines and 0-based character offsets, as
//!   used by the analysis engine.
//!
//! Conversion is mandatory at every boundary crossing. Off-by-one mistakes
//! here silently corrupt every downstream request, so all conversions live in
//! this module and nowhere else.

/// Position in the analysis engine's coordinate space (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EnginePosition {
    /// Line number (0-indexed)
    pub line: u32,
    /// Character offset within the line (0-indexed)
    pub character: u32,
}

/// Position in the editor's coordinate space (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorPosition {
    /// Line number (1-indexed, first line is 1)
    pub line_number: u32,
    /// Column (1-indexed, first column is 1)
    pub column: u32,
}

/// Which character-offset adjustment applies when translating an editor
/// position into an engine position.
///
/// Completion looks one character behind the cursor so the engine resolves
/// the token currently being typed; hover resolves the character under the
/// cursor itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionMode {
    Hover,
    Completion,
}

impl EnginePosition {
    /// Create a new engine-convention position.
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Translate into the editor convention (1-based on both axes).
    #[must_use]
    pub const fn to_editor(self) -> EditorPosition {
        EditorPosition {
            line_number: self.line + 1,
            column: self.character + 1,
        }
    }
}

impl EditorPosition {
    /// Create a new editor-convention position.
    #[must_use]
    pub const fn new(line_number: u32, column: u32) -> Self {
        Self {
            line_number,
            column,
        }
    }

    /// Translate into the engine convention.
    ///
    /// Lines always shift down by one. The character offset depends on the
    /// request kind: hover keeps the raw column, completion subtracts one to
    /// land on the token behind the cursor.
    #[must_use]
    pub const fn to_engine(self, mode: PositionMode) -> EnginePosition {
        EnginePosition {
            line: self.line_number.saturating_sub(1),
            character: match mode {
                PositionMode::Hover => self.column,
                PositionMode::Completion => self.column.saturating_sub(1),
            },
        }
    }
}

impl PartialOrd for EnginePosition {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnginePosition {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.character.cmp(&other.character),
            ord => ord,
        }
    }
}

impl std::fmt::Display for EnginePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

impl std::fmt::Display for EditorPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line_number, self.column)
    }
}

/// Range in the engine's coordinate space.
///
/// `start` is inclusive, `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EngineRange {
    pub start: EnginePosition,
    pub end: EnginePosition,
}

impl EngineRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(start: EnginePosition, end: EnginePosition) -> Self {
        Self { start, end }
    }

    /// Create a zero-width range at a specific position.
    #[must_use]
    pub const fn at(position: EnginePosition) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Returns `true` if this is a zero-width range.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.line == self.end.line && self.start.character == self.end.character
    }

    /// Check if this range contains a position.
    #[must_use]
    pub fn contains(&self, position: EnginePosition) -> bool {
        position >= self.start && position < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_always_shifts_by_one() {
        let editor = EditorPosition::new(1, 1);
        assert_eq!(editor.to_engine(PositionMode::Hover).line, 0);
        assert_eq!(editor.to_engine(PositionMode::Completion).line, 0);

        let editor = EditorPosition::new(42, 7);
        assert_eq!(editor.to_engine(PositionMode::Hover).line, 41);
        assert_eq!(editor.to_engine(PositionMode::Completion).line, 41);
    }

    #[test]
    fn hover_keeps_the_raw_column() {
        let editor = EditorPosition::new(3, 9);
        let engine = editor.to_engine(PositionMode::Hover);
        assert_eq!(engine, EnginePosition::new(2, 9));
    }

    #[test]
    fn completion_looks_one_character_behind() {
        let editor = EditorPosition::new(3, 9);
        let engine = editor.to_engine(PositionMode::Completion);
        assert_eq!(engine, EnginePosition::new(2, 8));
    }

    #[test]
    fn boundary_columns_do_not_underflow() {
        // Column 1 is the first valid editor column; column 0 never occurs in
        // practice but must not wrap around.
        assert_eq!(
            EditorPosition::new(1, 1).to_engine(PositionMode::Completion),
            EnginePosition::new(0, 0)
        );
        assert_eq!(
            EditorPosition::new(1, 0).to_engine(PositionMode::Completion),
            EnginePosition::new(0, 0)
        );
        assert_eq!(
            EditorPosition::new(0, 1).to_engine(PositionMode::Hover),
            EnginePosition::new(0, 1)
        );
    }

    #[test]
    fn to_editor_adds_one_on_both_axes() {
        assert_eq!(
            EnginePosition::new(0, 0).to_editor(),
            EditorPosition::new(1, 1)
        );
        assert_eq!(
            EnginePosition::new(5, 11).to_editor(),
            EditorPosition::new(6, 12)
        );
    }

    #[test]
    fn round_trip_is_stable_under_completion_mode() {
        for line in [0_u32, 1, 2, 80] {
            for character in [0_u32, 1, 5, 120] {
                let p = EnginePosition::new(line, character);
                let editor = p.to_editor();
                let round_tripped = editor.to_engine(PositionMode::Completion).to_editor();
                assert_eq!(round_tripped, editor);
            }
        }
    }

    #[test]
    fn engine_position_ordering() {
        let p1 = EnginePosition::new(0, 5);
        let p2 = EnginePosition::new(0, 10);
        let p3 = EnginePosition::new(1, 0);

        assert!(p1 < p2);
        assert!(p2 < p3);
        assert!(p1 < p3);
    }

    #[test]
    fn range_contains() {
        let range = EngineRange::new(EnginePosition::new(1, 0), EnginePosition::new(3, 0));
        assert!(range.contains(EnginePosition::new(1, 5)));
        assert!(range.contains(EnginePosition::new(2, 0)));
        assert!(!range.contains(EnginePosition::new(0, 5)));
        assert!(!range.contains(EnginePosition::new(3, 0))); // end is exclusive
    }

    #[test]
    fn range_at_is_empty() {
        let range = EngineRange::at(EnginePosition::new(4, 2));
        assert!(range.is_empty());
        assert!(!range.contains(EnginePosition::new(4, 2)));
    }
}
