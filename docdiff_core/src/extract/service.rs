use std::path::Path;
use std::sync::Arc;

use super::{ExtractorError, ExtractorRegistry, ExtractorSummary, TextExtractor};
use crate::{DocumentKind, Error, Result, SourceDocument};

const UNSUPPORTED_REASON: &str = "Only PDF and Markdown files are supported";

/// Loads documents from disk through the registered extractors.
#[derive(Clone)]
pub struct ExtractionService {
    registry: Arc<ExtractorRegistry>,
}

impl ExtractionService {
    /// Create a service backed by the provided registry.
    #[must_use]
    pub fn new(registry: ExtractorRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Access the underlying registry.
    #[must_use]
    pub fn registry(&self) -> Arc<ExtractorRegistry> {
        Arc::clone(&self.registry)
    }

    /// List summaries for all registered extractors.
    #[must_use]
    pub fn summaries(&self) -> Vec<ExtractorSummary> {
        self.registry.summaries()
    }

    /// Detect the kind of `path`, extract its text and wrap it as a
    /// [`SourceDocument`] named after the file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedInput`] for unknown extensions or
    /// undecodable text, [`Error::ExtractorNotRegistered`] when no extractor
    /// handles the kind, and [`Error::Extraction`] for other extractor
    /// failures.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<SourceDocument> {
        let path = path.as_ref();
        let kind = DocumentKind::from_path(path).ok_or_else(|| Error::UnsupportedInput {
            path: path.display().to_string(),
            reason: UNSUPPORTED_REASON.to_string(),
        })?;
        self.load_as(path, kind)
    }

    /// Extract `path` as a document of the given kind, skipping detection.
    ///
    /// # Errors
    ///
    /// Same as [`ExtractionService::load`], minus kind detection.
    pub fn load_as(&self, path: impl AsRef<Path>, kind: DocumentKind) -> Result<SourceDocument> {
        let path = path.as_ref();
        let extractor = self.extractor(kind)?;
        let text = extractor
            .extract(path)
            .map_err(|source| Self::extraction_error(path, extractor.id(), source))?;

        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
        tracing::info!(
            path = %path.display(),
            %kind,
            extractor = extractor.id(),
            bytes = text.len(),
            "loaded document"
        );
        Ok(SourceDocument::new(name, kind, text))
    }

    fn extractor(&self, kind: DocumentKind) -> Result<Arc<dyn TextExtractor>> {
        self.registry
            .for_kind(kind)
            .ok_or(Error::ExtractorNotRegistered { kind })
    }

    fn extraction_error(path: &Path, extractor: &str, source: ExtractorError) -> Error {
        match source {
            ExtractorError::InvalidText { .. } => Error::UnsupportedInput {
                path: path.display().to_string(),
                reason: source.to_string(),
            },
            source => Error::Extraction {
                extractor: extractor.to_string(),
                source,
            },
        }
    }
}

impl std::fmt::Debug for ExtractionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut extractor_ids: Vec<&str> = self.registry.ids().collect();
        extractor_ids.sort_unstable();
        f.debug_struct("ExtractionService")
            .field("extractors", &extractor_ids)
            .finish()
    }
}
