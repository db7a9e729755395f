//! Cursor position extraction for feature tests.
//!
//! Mark the cursor with a `*` character; the marker is removed and the
//! position of the character it preceded is returned in engine convention
//! (0-based line and character).

use workbench_types::EnginePosition;

/// Extracts the `*`-marked cursor position from a source snippet.
///
/// # Panics
///
/// Panics when the snippet contains no `*` marker; tests that call this
/// always embed one.
pub fn extract_cursor(marked: &str) -> (String, EnginePosition) {
    let offset = marked.find('*').expect("snippet contains a * cursor marker");
    let before = &marked[..offset];

    let line = before.matches('\n').count() as u32;
    let character = before
        .rsplit('\n')
        .next()
        .unwrap_or(before)
        .chars()
        .count() as u32;

    let mut source = String::with_capacity(marked.len() - 1);
    source.push_str(before);
    source.push_str(&marked[offset + 1..]);

    (source, EnginePosition::new(line, character))
}
