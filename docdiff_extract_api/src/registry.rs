//! Extractor registry keeps track of the available text sources per document kind.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use docdiff_api::DocumentKind;

use super::{ExtractorCapabilities, ExtractorSummary, TextExtractor};

/// In-memory registry for text extractors.
///
/// Each document kind is routed to the most recently registered extractor
/// that claims it.
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<&'static str, Arc<dyn TextExtractor>>,
    routes: BTreeMap<DocumentKind, &'static str>,
}

impl ExtractorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extractor keyed by its `TextExtractor::id`.
    pub fn register<E>(&mut self, extractor: E)
    where
        E: TextExtractor + 'static,
    {
        self.register_arc(Arc::new(extractor));
    }

    /// Register an already shared extractor.
    pub fn register_arc(&mut self, extractor: Arc<dyn TextExtractor>) {
        let id = extractor.id();
        for kind in extractor.kinds() {
            self.routes.insert(*kind, id);
        }
        self.extractors.insert(id, extractor);
    }

    /// Retrieve an extractor by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn TextExtractor>> {
        self.extractors.get(id).cloned()
    }

    /// Retrieve the extractor routed for a document kind.
    #[must_use]
    pub fn for_kind(&self, kind: DocumentKind) -> Option<Arc<dyn TextExtractor>> {
        self.routes.get(&kind).and_then(|id| self.get(id))
    }

    /// Capabilities of a registered extractor.
    #[must_use]
    pub fn capabilities(&self, id: &str) -> Option<ExtractorCapabilities> {
        self.extractors
            .get(id)
            .map(|extractor| extractor.capabilities())
    }

    /// Returns the list of registered extractor identifiers.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.extractors.keys().copied()
    }

    /// Summaries for all registered extractors, sorted by id.
    #[must_use]
    pub fn summaries(&self) -> Vec<ExtractorSummary> {
        let mut summaries: Vec<ExtractorSummary> = self
            .extractors
            .values()
            .map(|extractor| ExtractorSummary {
                id: extractor.id().to_string(),
                label: extractor.label().to_string(),
                kinds: extractor.kinds().to_vec(),
                capabilities: extractor.capabilities(),
            })
            .collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}
