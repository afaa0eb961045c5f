//! Render rows for unified and split diff views.

use serde::{Deserialize, Serialize};

use crate::navigation::CollapsedState;
use crate::{DiffDocument, DiffLine, LineKind};

/// Layout used to present a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// One column with removed and added lines interleaved.
    #[default]
    Unified,
    /// Original on the left, modified on the right.
    Split,
}

/// One row of a unified view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewRow<'a> {
    /// A visible line.
    Line {
        /// Index into the document lines.
        index: usize,
        /// The line itself.
        line: &'a DiffLine,
    },
    /// Placeholder for a collapsed section.
    Collapsed {
        /// Index of the first hidden line.
        start: usize,
        /// Number of hidden lines.
        count: usize,
    },
}

/// One row of a split view column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideRow<'a> {
    /// A visible line with the number it carries on this side.
    Line {
        /// Index into the document lines.
        index: usize,
        /// Line number on this side.
        number: usize,
        /// The line itself.
        line: &'a DiffLine,
    },
    /// Placeholder for a collapsed section.
    Collapsed {
        /// Index of the first hidden line.
        start: usize,
        /// Number of hidden lines.
        count: usize,
    },
}

/// Both columns of a split view. Columns are independent and may differ in
/// length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitView<'a> {
    /// Removed and unchanged lines.
    pub left: Vec<SideRow<'a>>,
    /// Added and unchanged lines.
    pub right: Vec<SideRow<'a>>,
}

/// Placeholder text for a collapsed section of `count` lines.
#[must_use]
pub fn placeholder_label(count: usize) -> String {
    if count == 1 {
        "1 unchanged line".to_string()
    } else {
        format!("{count} unchanged lines")
    }
}

/// Rows of the unified view under `state`.
#[must_use]
pub fn unified_rows<'a>(document: &'a DiffDocument, state: &CollapsedState) -> Vec<ViewRow<'a>> {
    let mut rows = Vec::with_capacity(document.lines.len());
    let mut index = 0;
    while let Some(line) = document.lines.get(index) {
        match collapsed_count(line, index, state) {
            Some(count) => {
                rows.push(ViewRow::Collapsed {
                    start: index,
                    count,
                });
                index += count;
            }
            None => {
                rows.push(ViewRow::Line { index, line });
                index += 1;
            }
        }
    }
    rows
}

/// Rows of the split view under `state`.
#[must_use]
pub fn split_rows<'a>(document: &'a DiffDocument, state: &CollapsedState) -> SplitView<'a> {
    let mut view = SplitView::default();
    let mut index = 0;
    while let Some(line) = document.lines.get(index) {
        if let Some(count) = collapsed_count(line, index, state) {
            let placeholder = SideRow::Collapsed {
                start: index,
                count,
            };
            view.left.push(placeholder);
            view.right.push(placeholder);
            index += count;
            continue;
        }

        if line.kind() != LineKind::Added {
            if let Some(number) = line.old_line_number() {
                view.left.push(SideRow::Line {
                    index,
                    number,
                    line,
                });
            }
        }
        if line.kind() != LineKind::Removed {
            if let Some(number) = line.new_line_number() {
                view.right.push(SideRow::Line {
                    index,
                    number,
                    line,
                });
            }
        }
        index += 1;
    }
    view
}

fn collapsed_count(line: &DiffLine, index: usize, state: &CollapsedState) -> Option<usize> {
    line.collapsible_count()
        .filter(|count| *count > 0 && state.is_collapsed(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffOptions;
    use crate::format::format_document;

    fn document() -> DiffDocument {
        let old: Vec<String> = (1..=12).map(|n| format!("line {n}")).collect();
        let mut new = old.clone();
        new[0] = "changed".to_string();
        format_document(&old.join("\n"), &new.join("\n"), "doc.md", false, &DiffOptions::default())
    }

    #[test]
    fn collapsed_section_becomes_one_row() {
        let document = document();
        let state = CollapsedState::all_collapsed(&document.lines);
        let rows = unified_rows(&document, &state);

        // removed, added, 3 context lines, placeholder, 3 trailing context lines
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[5], ViewRow::Collapsed { start: 5, count: 5 });
        assert_eq!(rows[6], ViewRow::Line { index: 10, line: &document.lines[10] });
    }

    #[test]
    fn expanded_state_shows_every_line() {
        let document = document();
        let rows = unified_rows(&document, &CollapsedState::new());
        assert_eq!(rows.len(), document.lines.len());
        assert!(rows.iter().all(|row| matches!(row, ViewRow::Line { .. })));
    }

    #[test]
    fn split_columns_are_independent() {
        let document = document();
        let view = split_rows(&document, &CollapsedState::new());

        assert_eq!(view.left.len(), 12);
        assert_eq!(view.right.len(), 12);
        assert!(matches!(
            view.left[0],
            SideRow::Line { index: 0, number: 1, line } if line.kind() == LineKind::Removed
        ));
        assert!(matches!(
            view.right[0],
            SideRow::Line { index: 1, number: 1, line } if line.kind() == LineKind::Added
        ));
    }

    #[test]
    fn split_view_shares_placeholders() {
        let document = document();
        let state = CollapsedState::all_collapsed(&document.lines);
        let view = split_rows(&document, &state);
        assert_eq!(view.left[4], view.right[4]);
        assert_eq!(view.left[4], SideRow::Collapsed { start: 5, count: 5 });
        assert_eq!(view.left.len(), 8);
        assert_eq!(view.right.len(), 8);
    }

    #[test]
    fn placeholder_label_pluralizes() {
        assert_eq!(placeholder_label(1), "1 unchanged line");
        assert_eq!(placeholder_label(14), "14 unchanged lines");
    }
}
