//! Assembly of a [`DiffDocument`] from two texts.

use crate::collapse::mark_collapsible;
use crate::config::DiffOptions;
use crate::diff::DiffEngine;
use crate::normalize::normalize;
use crate::pairing::pair_and_word_diff;
use crate::{DiffDocument, SourceDocument};

/// Runs the full text pipeline with a fixed set of options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter {
    engine: DiffEngine,
    options: DiffOptions,
}

impl Formatter {
    /// Create a formatter using `options`.
    #[must_use]
    pub const fn new(options: DiffOptions) -> Self {
        Self {
            engine: DiffEngine::new(),
            options,
        }
    }

    /// Options this formatter was built with.
    #[must_use]
    pub const fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Normalize (for raster sources), diff, pair and collapse.
    #[must_use]
    pub fn format(&self, old: &str, new: &str, file_name: &str, is_raster: bool) -> DiffDocument {
        let normalized;
        let (old, new) = if is_raster || self.options.force_normalize {
            normalized = (normalize(old), normalize(new));
            (normalized.0.as_str(), normalized.1.as_str())
        } else {
            (old, new)
        };

        let lines = self.engine.diff_lines(old, new);
        let mut lines = pair_and_word_diff(lines, self.options.pairing);
        mark_collapsible(&mut lines, self.options.context_lines);

        let document = DiffDocument::new(file_name, lines);
        tracing::debug!(
            file = file_name,
            is_raster,
            additions = document.summary.additions,
            deletions = document.summary.deletions,
            "formatted document"
        );
        document
    }

    /// Compare two acquired documents.
    ///
    /// The comparison is raster sourced only when both sides are PDFs; the
    /// result is named after the modified document.
    #[must_use]
    pub fn compare(&self, original: &SourceDocument, modified: &SourceDocument) -> DiffDocument {
        let is_raster = original.kind.is_raster() && modified.kind.is_raster();
        self.format(&original.text, &modified.text, &modified.name, is_raster)
    }
}

/// Build a [`DiffDocument`] with the given options.
#[must_use]
pub fn format_document(
    old: &str,
    new: &str,
    file_name: &str,
    is_raster: bool,
    options: &DiffOptions,
) -> DiffDocument {
    Formatter::new(*options).format(old, new, file_name, is_raster)
}

/// Compare two acquired documents with the given options.
#[must_use]
pub fn compare(
    original: &SourceDocument,
    modified: &SourceDocument,
    options: &DiffOptions,
) -> DiffDocument {
    Formatter::new(*options).compare(original, modified)
}
