//! Visible change positions and circular traversal over them.

use std::collections::BTreeMap;

use crate::collapse::collapsible_regions;
use crate::DiffLine;

/// Collapsed flag per collapsible start index. Missing entries are expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapsedState {
    sections: BTreeMap<usize, bool>,
}

impl CollapsedState {
    /// State with every section expanded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State with every collapsible start in `lines` collapsed.
    #[must_use]
    pub fn all_collapsed(lines: &[DiffLine]) -> Self {
        collapsible_regions(lines)
            .into_iter()
            .map(|region| (region.start, true))
            .collect()
    }

    /// Whether the section starting at `start` is collapsed.
    #[must_use]
    pub fn is_collapsed(&self, start: usize) -> bool {
        self.sections.get(&start).copied().unwrap_or(false)
    }

    /// Set the flag for the section starting at `start`.
    pub fn set(&mut self, start: usize, collapsed: bool) {
        self.sections.insert(start, collapsed);
    }

    /// Flip the flag for `start`, returning the new value.
    pub fn toggle(&mut self, start: usize) -> bool {
        let collapsed = !self.is_collapsed(start);
        self.set(start, collapsed);
        collapsed
    }

    /// Expand every section.
    pub fn expand_all(&mut self) {
        self.sections.clear();
    }

    /// Starts of collapsed sections in ascending order.
    pub fn collapsed_starts(&self) -> impl Iterator<Item = usize> + '_ {
        self.sections
            .iter()
            .filter_map(|(&start, &collapsed)| collapsed.then_some(start))
    }
}

impl FromIterator<(usize, bool)> for CollapsedState {
    fn from_iter<I: IntoIterator<Item = (usize, bool)>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}

/// Indices of visible added and removed lines, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationIndex {
    positions: Vec<usize>,
}

impl NavigationIndex {
    /// Build the index for `lines` under `state`.
    ///
    /// A collapsed start hides itself and the following `count - 1` lines.
    /// Starts that are not collapsible in `lines` are ignored.
    #[must_use]
    pub fn build(lines: &[DiffLine], state: &CollapsedState) -> Self {
        let hidden: Vec<(usize, usize)> = collapsible_regions(lines)
            .into_iter()
            .filter(|region| state.is_collapsed(region.start))
            .map(|region| (region.start, region.end()))
            .collect();

        let positions = lines
            .iter()
            .enumerate()
            .filter(|(index, line)| {
                line.is_change()
                    && !hidden
                        .iter()
                        .any(|&(start, end)| (start..end).contains(index))
            })
            .map(|(index, _)| index)
            .collect();

        Self { positions }
    }

    /// Line indices in traversal order.
    #[must_use]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Number of navigable changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether there is nothing to navigate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Line index at cursor position `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<usize> {
        self.positions.get(position).copied()
    }

    /// Cursor position of line `index`, if it is navigable.
    #[must_use]
    pub fn position_of(&self, index: usize) -> Option<usize> {
        self.positions.binary_search(&index).ok()
    }
}

/// Build a [`NavigationIndex`].
#[must_use]
pub fn build_navigation_index(lines: &[DiffLine], state: &CollapsedState) -> NavigationIndex {
    NavigationIndex::build(lines, state)
}

/// Position within a [`NavigationIndex`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationCursor {
    position: usize,
}

impl NavigationCursor {
    /// Cursor at the first change.
    #[must_use]
    pub const fn new() -> Self {
        Self { position: 0 }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Advance, wrapping from the last position to the first.
    pub fn next(&mut self, len: usize) -> usize {
        if len > 0 {
            self.position = (self.position + 1) % len;
        }
        self.position
    }

    /// Step back, wrapping from the first position to the last.
    pub fn previous(&mut self, len: usize) -> usize {
        if len > 0 {
            self.position = self.position.checked_sub(1).unwrap_or(len - 1).min(len - 1);
        }
        self.position
    }

    /// Pull the cursor back into range after the index shrank.
    pub fn clamp(&mut self, len: usize) {
        self.position = self.position.min(len.saturating_sub(1));
    }

    /// Line index the cursor points at.
    #[must_use]
    pub fn selected(&self, index: &NavigationIndex) -> Option<usize> {
        index.get(self.position)
    }

    /// Human readable position, `"k/N"` or `"0/0"` when empty.
    #[must_use]
    pub fn label(&self, len: usize) -> String {
        if len == 0 {
            "0/0".to_string()
        } else {
            format!("{}/{}", self.position + 1, len)
        }
    }
}
