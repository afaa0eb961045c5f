//! Line diff engine built on the Myers algorithm from `similar`.

use similar::{Algorithm, ChangeTag, TextDiff};

use crate::DiffLine;

/// Entry point for line diff generation.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiffEngine;

impl DiffEngine {
    /// Construct a new diff engine instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compute the line-level edit script between two texts.
    ///
    /// Lines are numbered per side starting at 1. The output carries no word
    /// diffs and no collapsible markers yet.
    #[must_use]
    pub fn diff_lines(&self, old: &str, new: &str) -> Vec<DiffLine> {
        let old_lines = split_lines(old);
        let new_lines = split_lines(new);

        let diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_slices(old_lines.as_slice(), new_lines.as_slice());

        let mut lines = Vec::with_capacity(old_lines.len().max(new_lines.len()));
        let mut old_line = 0;
        let mut new_line = 0;

        for change in diff.iter_all_changes() {
            let content = change.value();
            match change.tag() {
                ChangeTag::Equal => {
                    old_line += 1;
                    new_line += 1;
                    lines.push(DiffLine::unchanged(content, old_line, new_line));
                }
                ChangeTag::Delete => {
                    old_line += 1;
                    lines.push(DiffLine::removed(content, old_line));
                }
                ChangeTag::Insert => {
                    new_line += 1;
                    lines.push(DiffLine::added(content, new_line));
                }
            }
        }

        tracing::debug!(
            old_lines = old_lines.len(),
            new_lines = new_lines.len(),
            diff_lines = lines.len(),
            "computed line diff"
        );
        lines
    }
}

/// Compute the line-level edit script with a default engine.
#[must_use]
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffLine> {
    DiffEngine::new().diff_lines(old, new)
}

/// Split text on `\n`, dropping the empty segment left by a final newline.
///
/// An empty text has no lines.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
}
