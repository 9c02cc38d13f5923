// Vector index module
// Couples the document store with a flat inner-product index over normalized embeddings

pub mod flat;


use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::embeddings::{Embedder, normalize};
use crate::store::{Document, DocumentStore, NewDocument};
use crate::{RagError, Result};

pub use flat::{FlatIndex, SearchResult};

/// Searchable knowledge base.
///
/// Row `i` of the flat index always holds the embedding of document `i`, and
/// both sides only grow through [`VectorIndex::build`] and [`VectorIndex::add`].
#[derive(Debug)]
pub struct VectorIndex<E> {
    embedder: E,
    store: DocumentStore,
    vectors: Option<FlatIndex>,
}

impl<E: Embedder> VectorIndex<E> {
    /// Create an index that has not been built yet
    #[inline]
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            store: DocumentStore::new(),
            vectors: None,
        }
    }

    /// Create an initialized index with no documents
    #[inline]
    pub fn empty(embedder: E, dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(RagError::IndexBuild(
                "Embedding dimension must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            embedder,
            store: DocumentStore::new(),
            vectors: Some(FlatIndex::new(dimension)),
        })
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.vectors.is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    #[inline]
    pub fn dimension(&self) -> Option<usize> {
        self.vectors.as_ref().map(FlatIndex::dimension)
    }

    /// Number of stored vectors, which always equals [`Self::len`]
    #[inline]
    pub fn vector_count(&self) -> usize {
        self.vectors.as_ref().map_or(0, FlatIndex::len)
    }

    #[inline]
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    #[inline]
    pub fn document(&self, id: usize) -> Option<&Document> {
        self.store.get(id)
    }

    #[inline]
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Embed all documents and replace the current store and index.
    ///
    /// The previous contents are kept if anything fails.
    #[inline]
    pub fn build(&mut self, documents: Vec<NewDocument>) -> Result<()> {
        if documents.is_empty() {
            return Err(RagError::IndexBuild(
                "Cannot build an index from an empty document set".to_string(),
            ));
        }

        info!("Building search index from {} documents", documents.len());

        let mut store = DocumentStore::new();
        for document in documents {
            store.push(document);
        }
        let texts: Vec<String> = store.iter().map(|doc| doc.content.clone()).collect();

        let bar = progress_bar(texts.len());
        let batch_size = self.embedder.batch_size().max(1);
        let mut vectors: Option<FlatIndex> = None;

        for batch in texts.chunks(batch_size) {
            let embeddings = self.embedder.embed_batch(batch).map_err(|e| {
                RagError::IndexBuild(format!("Failed to embed documents: {:#}", e))
            })?;

            if embeddings.len() != batch.len() {
                return Err(RagError::IndexBuild(format!(
                    "Embedder returned {} vectors for {} documents",
                    embeddings.len(),
                    batch.len()
                )));
            }

            for embedding in embeddings {
                let row = vectors.as_ref().map_or(0, FlatIndex::len);
                let normalized = normalize(embedding).ok_or_else(|| {
                    RagError::IndexBuild(format!("Document {} has a zero-norm embedding", row))
                })?;
                let index = vectors.get_or_insert_with(|| FlatIndex::new(normalized.len()));
                index.add(&normalized).map_err(|e| {
                    RagError::IndexBuild(format!("Document {} could not be indexed: {}", row, e))
                })?;
            }

            bar.inc(batch.len() as u64);
        }
        bar.finish_and_clear();

        let vectors = vectors.ok_or_else(|| {
            RagError::IndexBuild("Embedder produced no vectors".to_string())
        })?;

        info!(
            "Index built with {} vectors of dimension {}",
            vectors.len(),
            vectors.dimension()
        );

        self.store = store;
        self.vectors = Some(vectors);
        Ok(())
    }

    /// Embed one document and append it to the store and the index.
    ///
    /// Returns the id assigned to the document. Nothing is mutated on failure.
    #[inline]
    pub fn add(&mut self, document: NewDocument) -> Result<usize> {
        let vectors = self.vectors.as_mut().ok_or(RagError::IndexNotInitialized)?;

        let content = document.content();
        let embedding = self
            .embedder
            .embed(&content)
            .map_err(|e| RagError::Embedding(format!("Failed to embed document: {:#}", e)))?;
        let normalized = normalize(embedding).ok_or_else(|| {
            RagError::Embedding("Document embedding has zero norm".to_string())
        })?;
        vectors.add(&normalized)?;
        let id = self.store.push(document);
        debug!("Added document {} to index ({} total)", id, self.store.len());

        Ok(id)
    }

    /// Return up to `top_k` documents most similar to `query`, best first
    #[inline]
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        let vectors = self.vectors.as_ref().ok_or(RagError::IndexNotInitialized)?;

        if top_k == 0 || vectors.is_empty() {
            return Ok(Vec::new());
        }

        let embedding = self
            .embedder
            .embed(query)
            .map_err(|e| RagError::Retrieval(format!("Failed to embed query: {:#}", e)))?;
        let normalized = normalize(embedding)
            .ok_or_else(|| RagError::Retrieval("Query embedding has zero norm".to_string()))?;

        let results = vectors.search(&normalized, top_k)?;
        debug!(
            "Search returned {} results (best score {:?})",
            results.len(),
            results.first().map(|r| r.similarity_score)
        );

        Ok(results)
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    if console::user_attended_stderr() {
        ProgressBar::new(len as u64).with_style(
            ProgressStyle::with_template("{spinner} [{pos}/{len}] Embedding documents {wide_bar}")
                .expect("style template is valid"),
        )
    } else {
        ProgressBar::hidden()
    }
}
