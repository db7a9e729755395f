//! Completion and hover payloads in the editor's shape.

/// Kind of a completion item, mirroring the editor widget's item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Field,
    Variable,
    Type,
    Fragment,
    EnumValue,
    Argument,
}

/// A completion item ready for the editor widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: String,
    pub insert_text: String,
    pub kind: CompletionKind,
}

impl CompletionItem {
    #[must_use]
    pub fn new(label: impl Into<String>, insert_text: impl Into<String>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            insert_text: insert_text.into(),
            kind,
        }
    }
}

/// One entry of a hover tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverEntry {
    pub value: String,
}

/// Hover response in the editor's shape.
///
/// An empty `contents` sequence means the editor shows no tooltip; hover
/// never fails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HoverContents {
    pub contents: Vec<HoverEntry>,
}

impl HoverContents {
    /// A hover response that shows nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            contents: Vec::new(),
        }
    }

    /// A hover response with a single text entry.
    #[must_use]
    pub fn single(value: impl Into<String>) -> Self {
        Self {
            contents: vec![HoverEntry {
                value: value.into(),
            }],
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
