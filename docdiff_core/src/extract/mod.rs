//! Document acquisition entry points.

mod service;

pub use docdiff_extract_api::{
    ExtractorCapabilities, ExtractorError, ExtractorRegistry, ExtractorResult, ExtractorSummary,
    TextExtractor,
};
pub use docdiff_extractors::{default_registry, MarkdownExtractor, PdftotextExtractor};

pub use service::ExtractionService;
