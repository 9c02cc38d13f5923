
use tracing::{debug, info, warn};

use crate::embeddings::Embedder;
use crate::index::VectorIndex;
use crate::store::{DocumentId, Evidence, NewDocument, RetrievedDocument};
use crate::web::{SearchHit, WebSearch};

/// Relevance lost per rank position of a web hit
const RANK_DECAY: f32 = 0.1;

/// Record of a pseudo-document written to the index during augmentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionEvent {
    pub document_id: usize,
    pub query: String,
    pub url: String,
}

/// Web documents found for a query, plus the index insertions they caused
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Augmentation {
    pub documents: Vec<RetrievedDocument>,
    pub insertions: Vec<InsertionEvent>,
}

/// Result of a web augmentation attempt
#[derive(Debug, Clone, PartialEq)]
pub enum WebOutcome {
    Completed(Augmentation),
    /// The search provider failed; no web documents are available
    Unavailable { reason: String },
}

impl WebOutcome {
    #[inline]
    pub fn documents(&self) -> &[RetrievedDocument] {
        match self {
            Self::Completed(augmentation) => &augmentation.documents,
            Self::Unavailable { .. } => &[],
        }
    }

    #[inline]
    pub fn insertions(&self) -> &[InsertionEvent] {
        match self {
            Self::Completed(augmentation) => &augmentation.insertions,
            Self::Unavailable { .. } => &[],
        }
    }

    #[inline]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Relevance assigned to the web hit at 0-based `rank`
#[inline]
pub fn rank_score(rank: usize) -> f32 {
    (rank as f32).mul_add(-RANK_DECAY, 1.0)
}

/// Turns web search hits into context documents and grows the index with them
#[derive(Debug, Clone)]
pub struct WebAugmenter<W> {
    engine: W,
}

impl<W: WebSearch> WebAugmenter<W> {
    #[inline]
    pub fn new(engine: W) -> Self {
        Self { engine }
    }

    #[inline]
    pub fn engine(&self) -> &W {
        &self.engine
    }

    /// Search the web for `query` and ingest the results.
    ///
    /// Each hit whose page yields text is returned with its full content and
    /// also added to `index` as a title+snippet pseudo-document, unless the
    /// same question and URL are already stored.
    pub fn search<E: Embedder>(
        &self,
        index: &mut VectorIndex<E>,
        query: &str,
        num_results: usize,
    ) -> WebOutcome {
        let hits = match self.engine.search(query, num_results) {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Web search unavailable, continuing with local results: {:#}", e);
                return WebOutcome::Unavailable {
                    reason: format!("{:#}", e),
                };
            }
        };

        info!("Web search returned {} hits for '{}'", hits.len(), query);

        let mut augmentation = Augmentation::default();

        for (rank, hit) in hits.into_iter().take(num_results).enumerate() {
            let content = match self.engine.fetch_content(&hit.url) {
                Ok(content) if !content.trim().is_empty() => content,
                Ok(_) => {
                    warn!("Skipping {}: page has no readable content", hit.url);
                    continue;
                }
                Err(e) => {
                    warn!("Skipping {}: {:#}", hit.url, e);
                    continue;
                }
            };

            if let Some(event) = ingest(index, query, &hit) {
                augmentation.insertions.push(event);
            }

            augmentation.documents.push(RetrievedDocument {
                id: DocumentId::Web(format!("web_{}", rank)),
                score: rank_score(rank),
                evidence: Evidence::Web {
                    title: hit.title,
                    snippet: hit.snippet,
                    url: hit.url,
                    content,
                },
            });
        }

        debug!(
            "Augmentation kept {} web documents and inserted {}",
            augmentation.documents.len(),
            augmentation.insertions.len()
        );

        WebOutcome::Completed(augmentation)
    }
}

/// Pseudo-document stored for a web hit so later queries can find it locally
#[inline]
pub fn pseudo_document(query: &str, hit: &SearchHit) -> NewDocument {
    NewDocument::new(query, format!("{}. {}", hit.title, hit.snippet)).with_url(hit.url.clone())
}

fn ingest<E: Embedder>(
    index: &mut VectorIndex<E>,
    query: &str,
    hit: &SearchHit,
) -> Option<InsertionEvent> {
    if let Some(existing) = index.store().find_by_source(query, &hit.url) {
        debug!(
            "Pseudo-document for {} already stored as {}",
            hit.url, existing.id
        );
        return None;
    }

    match index.add(pseudo_document(query, hit)) {
        Ok(document_id) => Some(InsertionEvent {
            document_id,
            query: query.to_string(),
            url: hit.url.clone(),
        }),
        Err(e) => {
            warn!("Could not add web result {} to the index: {}", hit.url, e);
            None
        }
    }
}
