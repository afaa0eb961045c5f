//! View state for a single comparison.

use crate::navigation::{CollapsedState, NavigationCursor, NavigationIndex};
use crate::view::{split_rows, unified_rows, SplitView, ViewMode, ViewRow};
use crate::DiffDocument;

/// A document together with its collapsed sections, navigation cursor and
/// view mode.
///
/// Every collapsible section starts collapsed. The navigation index is
/// rebuilt whenever the collapsed state changes.
#[derive(Debug, Clone)]
pub struct ComparisonSession {
    document: DiffDocument,
    collapsed: CollapsedState,
    index: NavigationIndex,
    cursor: NavigationCursor,
    view_mode: ViewMode,
}

impl ComparisonSession {
    /// Open a session over `document` in the unified view.
    #[must_use]
    pub fn new(document: DiffDocument) -> Self {
        Self::with_view_mode(document, ViewMode::default())
    }

    /// Open a session over `document` in `view_mode`.
    #[must_use]
    pub fn with_view_mode(document: DiffDocument, view_mode: ViewMode) -> Self {
        let collapsed = CollapsedState::all_collapsed(&document.lines);
        let index = NavigationIndex::build(&document.lines, &collapsed);
        Self {
            document,
            collapsed,
            index,
            cursor: NavigationCursor::new(),
            view_mode,
        }
    }

    /// The compared document.
    #[must_use]
    pub const fn document(&self) -> &DiffDocument {
        &self.document
    }

    /// Current collapsed state.
    #[must_use]
    pub const fn collapsed(&self) -> &CollapsedState {
        &self.collapsed
    }

    /// Current navigation index.
    #[must_use]
    pub const fn navigation(&self) -> &NavigationIndex {
        &self.index
    }

    /// Current view mode.
    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Flip the section starting at line `start`.
    ///
    /// Returns the new collapsed flag, or `None` when no section starts there.
    pub fn toggle_section(&mut self, start: usize) -> Option<bool> {
        self.document.lines.get(start)?.collapsible_count()?;
        let collapsed = self.collapsed.toggle(start);
        self.rebuild();
        Some(collapsed)
    }

    /// Expand every section.
    pub fn expand_all(&mut self) {
        self.collapsed.expand_all();
        self.rebuild();
    }

    /// Move to the next change, wrapping around. Returns its line index.
    pub fn next_change(&mut self) -> Option<usize> {
        self.cursor.next(self.index.len());
        self.current_change()
    }

    /// Move to the previous change, wrapping around. Returns its line index.
    pub fn previous_change(&mut self) -> Option<usize> {
        self.cursor.previous(self.index.len());
        self.current_change()
    }

    /// Line index of the selected change.
    #[must_use]
    pub fn current_change(&self) -> Option<usize> {
        self.cursor.selected(&self.index)
    }

    /// `"k/N"` for the selected change, `"0/0"` when there are none.
    #[must_use]
    pub fn position_label(&self) -> String {
        self.cursor.label(self.index.len())
    }

    /// Switch layouts. All sections are collapsed again.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
        self.collapsed = CollapsedState::all_collapsed(&self.document.lines);
        self.rebuild();
    }

    /// Swap in a new document, resetting all view state except the layout.
    pub fn replace_document(&mut self, document: DiffDocument) {
        *self = Self::with_view_mode(document, self.view_mode);
        tracing::debug!(
            file = %self.document.file_name,
            changes = self.index.len(),
            "replaced session document"
        );
    }

    /// Unified rows under the current state.
    #[must_use]
    pub fn unified_rows(&self) -> Vec<ViewRow<'_>> {
        unified_rows(&self.document, &self.collapsed)
    }

    /// Split rows under the current state.
    #[must_use]
    pub fn split_rows(&self) -> SplitView<'_> {
        split_rows(&self.document, &self.collapsed)
    }

    fn rebuild(&mut self) {
        self.index = NavigationIndex::build(&self.document.lines, &self.collapsed);
        self.cursor.clamp(self.index.len());
    }
}
