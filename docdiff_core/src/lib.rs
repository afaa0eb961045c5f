//! Core library for docdiff's document comparison workflow.
//!
//! The crate is layered around three primary responsibilities:
//! - the text diff pipeline (normalize, line diff, word pairing, collapsing)
//! - presentation state (navigation, view rows, sessions, HTML export)
//! - document acquisition through pluggable text extractors
//!
//! Raster page comparison and paragraph similarity live alongside as
//! standalone utilities.

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    missing_docs
)]
#![cfg_attr(
    not(test),
    deny(
        clippy::dbg_macro,
        clippy::expect_used,
        clippy::panic,
        clippy::print_stderr,
        clippy::print_stdout,
        clippy::todo,
        clippy::unwrap_used
    )
)]

/// Line collapsing for long unchanged runs.
pub mod collapse;
/// Diff configuration.
pub mod config;
/// Line diff engine.
pub mod diff;
/// Static HTML export.
pub mod export;
/// Document acquisition through text extractors.
pub mod extract;
/// Document assembly.
pub mod format;
/// Change navigation over collapsed views.
pub mod navigation;
/// Normalization of extracted PDF text.
pub mod normalize;
/// Replace-pair detection and word-level diffs.
pub mod pairing;
/// Pixel comparison of rendered pages.
pub mod raster;
/// View state for one comparison.
pub mod session;
/// Paragraph similarity scoring.
pub mod similarity;
/// Render rows for unified and split views.
pub mod view;

pub use docdiff_api::{
    DiffDocument, DiffLine, DiffSummary, DocumentKind, LineKind, ParagraphMatch, PixelDiffStats,
    SimilarityReport, SourceDocument, SpanKind, WordSpan,
};

pub use config::DiffOptions;
pub use format::{compare, format_document, Formatter};
pub use pairing::PairingStrategy;
pub use session::ComparisonSession;

/// Common result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input is not a document docdiff can compare.
    #[error("unsupported input {path}: {reason}")]
    UnsupportedInput {
        /// Path of the rejected input.
        path: String,
        /// Why the input was rejected.
        reason: String,
    },
    /// No extractor handles the detected document kind.
    #[error("no text extractor registered for {kind} documents")]
    ExtractorNotRegistered {
        /// Kind that could not be routed.
        kind: DocumentKind,
    },
    /// Extractor failed to produce text.
    #[error("extractor '{extractor}' failed: {source}")]
    Extraction {
        /// Identifier of the failing extractor.
        extractor: String,
        /// Error reported by the extractor.
        #[source]
        source: docdiff_extract_api::ExtractorError,
    },
    /// Filesystem interaction failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Filesystem path involved in the failed operation.
        path: String,
        /// Source I/O error returned by the standard library.
        #[source]
        source: std::io::Error,
    },
    /// Configuration could not be parsed.
    #[error("invalid configuration: {source}")]
    Config {
        /// Parse error reported by the TOML decoder.
        #[from]
        source: toml::de::Error,
    },
    /// Image could not be decoded or encoded.
    #[error("image error: {source}")]
    Image {
        /// Underlying image codec error.
        #[from]
        source: image::ImageError,
    },
}
