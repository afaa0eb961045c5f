use std::path::Path;

use docdiff_api::DocumentKind;

mod registry;
mod types;

pub use registry::ExtractorRegistry;
pub use types::{ExtractorCapabilities, ExtractorError, ExtractorResult, ExtractorSummary};

/// Trait implemented by text sources (Markdown reader, PDF text tools, ...).
pub trait TextExtractor: Send + Sync {
    /// Stable identifier used for lookup and logging.
    fn id(&self) -> &'static str;

    /// Human-friendly label for UI surfaces.
    fn label(&self) -> &'static str;

    /// Capabilities advertised by the extractor.
    fn capabilities(&self) -> ExtractorCapabilities;

    /// Document kinds this extractor can turn into text.
    fn kinds(&self) -> &'static [DocumentKind];

    /// Produce the full text of the document at `path`.
    ///
    /// # Errors
    ///
    /// Implementors should surface unreadable, undecodable or empty inputs and
    /// any failure of an external backend.
    fn extract(&self, path: &Path) -> ExtractorResult<String>;
}
