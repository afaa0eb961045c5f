mod markdown;
mod pdftotext;

pub use markdown::MarkdownExtractor;
pub use pdftotext::PdftotextExtractor;

use docdiff_extract_api::ExtractorRegistry;

/// Build an extractor registry populated with docdiff's default sources.
#[must_use]
pub fn default_registry() -> ExtractorRegistry {
    let mut registry = ExtractorRegistry::new();
    registry.register(MarkdownExtractor);
    registry.register(PdftotextExtractor::default());
    registry
}
