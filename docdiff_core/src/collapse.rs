//! Marking of long unchanged runs that a viewer may fold away.

use crate::DiffLine;

/// Default number of unchanged lines kept visible on each side of a change.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// A collapsible region located by its first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapsibleRegion {
    /// Index of the first hidden line.
    pub start: usize,
    /// Number of hidden lines.
    pub count: usize,
}

impl CollapsibleRegion {
    /// One past the last hidden line.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.count
    }

    /// Whether `index` falls inside the region.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end()
    }
}

/// Mark the interior of every unchanged run longer than `2 * context_lines`.
///
/// Existing markers are cleared first so the function can be re-run with a
/// different context size.
pub fn mark_collapsible(lines: &mut [DiffLine], context_lines: usize) {
    for line in lines.iter_mut() {
        set_count(line, None);
    }

    let mut marked = 0;
    let mut run_start = None;
    for index in 0..=lines.len() {
        let unchanged = lines.get(index).is_some_and(|line| !line.is_change());
        match (unchanged, run_start) {
            (true, None) => run_start = Some(index),
            (false, Some(start)) => {
                if close_run(lines, start, index - 1, context_lines) {
                    marked += 1;
                }
                run_start = None;
            }
            _ => {}
        }
    }

    tracing::debug!(context_lines, regions = marked, "marked collapsible sections");
}

/// Regions currently marked on `lines`, in document order.
#[must_use]
pub fn collapsible_regions(lines: &[DiffLine]) -> Vec<CollapsibleRegion> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(start, line)| {
            line.collapsible_count()
                .map(|count| CollapsibleRegion { start, count })
        })
        .collect()
}

fn close_run(lines: &mut [DiffLine], run_start: usize, run_end: usize, context: usize) -> bool {
    let run_len = run_end - run_start + 1;
    if run_len <= context.saturating_mul(2) {
        return false;
    }

    let region_start = run_start + context;
    let region_end = run_end - context;
    set_count(&mut lines[region_start], Some(region_end - region_start + 1));
    true
}

fn set_count(line: &mut DiffLine, count: Option<usize>) {
    if let DiffLine::Unchanged {
        collapsible_count, ..
    } = line
    {
        *collapsible_count = count;
    }
}
