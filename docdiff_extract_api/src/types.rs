use serde::{Deserialize, Serialize};

use docdiff_api::DocumentKind;

/// Capabilities advertised by an extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExtractorCapabilities {
    /// Whether the produced text comes from a laid-out (raster) source and
    /// carries irregular spacing.
    ///
    /// Informational only; normalization is decided from the kinds of the
    /// documents being compared.
    pub raster_source: bool,
    /// Whether extraction spawns an external process.
    pub external_process: bool,
}

impl ExtractorCapabilities {
    /// Construct a capabilities struct with explicit flags.
    #[must_use]
    pub const fn new(raster_source: bool, external_process: bool) -> Self {
        Self {
            raster_source,
            external_process,
        }
    }
}

/// Summary information about a registered extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorSummary {
    /// Stable identifier for the extractor.
    pub id: String,
    /// Human-friendly label for display.
    pub label: String,
    /// Kinds handled by the extractor.
    pub kinds: Vec<DocumentKind>,
    /// Capability flags.
    pub capabilities: ExtractorCapabilities,
}

/// Errors surfaced by extractors.
#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    /// Input bytes are not valid text.
    #[error("{path} is not valid UTF-8 text")]
    InvalidText {
        /// Path of the offending input.
        path: String,
    },
    /// Generic failure surfaced by the extractor.
    #[error("{message}")]
    Failure {
        /// Human-readable error message.
        message: String,
    },
}

impl ExtractorError {
    /// Helper to construct a failure from any displayable message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }
}

/// Convenience result alias for extractor operations.
pub type ExtractorResult<T> = std::result::Result<T, ExtractorError>;
