
use tracing::{debug, info};

use super::augmenter::{WebAugmenter, WebOutcome};
use crate::Result;
use crate::config::RetrievalConfig;
use crate::embeddings::Embedder;
use crate::index::VectorIndex;
use crate::store::{RetrievedDocument, Source};
use crate::web::WebSearch;

/// Ranked context documents for one query
#[derive(Debug, Clone, PartialEq)]
pub struct Retrieval {
    /// Local and web documents, highest score first
    pub documents: Vec<RetrievedDocument>,
    /// Whether at least one web document made it into `documents`
    pub used_web_search: bool,
    /// Outcome of the web step, `None` when local results were sufficient
    pub web: Option<WebOutcome>,
}

impl Retrieval {
    #[inline]
    pub fn count(&self, source: Source) -> usize {
        self.documents
            .iter()
            .filter(|doc| doc.source() == source)
            .count()
    }
}

/// Whether local results are too weak to answer without the web
#[inline]
pub fn needs_web_search(local: &[RetrievedDocument], threshold: f64, enabled: bool) -> bool {
    if !enabled {
        return false;
    }
    local
        .iter()
        .map(|doc| f64::from(doc.score))
        .reduce(f64::max)
        .is_none_or(|best| best < threshold)
}

/// Runs local search, the confidence check, optional web augmentation and the merge
#[derive(Debug, Clone)]
pub struct RetrievalOrchestrator<W> {
    augmenter: WebAugmenter<W>,
    config: RetrievalConfig,
}

impl<W: WebSearch> RetrievalOrchestrator<W> {
    #[inline]
    pub fn new(engine: W, config: RetrievalConfig) -> Self {
        Self {
            augmenter: WebAugmenter::new(engine),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    #[inline]
    pub fn augmenter(&self) -> &WebAugmenter<W> {
        &self.augmenter
    }

    /// Retrieve context for `query` using the configured web search setting
    #[inline]
    pub fn retrieve<E: Embedder>(
        &self,
        index: &mut VectorIndex<E>,
        query: &str,
    ) -> Result<Retrieval> {
        self.retrieve_with(index, query, self.config.use_web_search)
    }

    /// Retrieve context for `query`, overriding whether web search may be used
    pub fn retrieve_with<E: Embedder>(
        &self,
        index: &mut VectorIndex<E>,
        query: &str,
        use_web_search: bool,
    ) -> Result<Retrieval> {
        let local: Vec<RetrievedDocument> = index
            .search(query, self.config.top_k)?
            .into_iter()
            .filter_map(|result| {
                index
                    .document(result.position)
                    .map(|doc| RetrievedDocument::local(doc, result.similarity_score))
            })
            .collect();

        debug!(
            "Local retrieval found {} documents (best score {:?})",
            local.len(),
            local.first().map(|doc| doc.score)
        );

        let web = needs_web_search(&local, self.config.confidence_threshold, use_web_search)
            .then(|| {
                info!("Local knowledge insufficient, performing web search");
                self.augmenter
                    .search(index, query, self.config.web_results)
            });

        let web_documents = web.as_ref().map_or(&[][..], WebOutcome::documents);
        let used_web_search = !web_documents.is_empty();

        let mut documents = local;
        documents.extend_from_slice(web_documents);
        documents.sort_by(|a, b| b.score.total_cmp(&a.score));

        Ok(Retrieval {
            documents,
            used_web_search,
            web,
        })
    }
}
