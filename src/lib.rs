use thiserror::Error;

pub type Result<T> = std::result::Result<T, RagError>;

#[derive(Error, Debug)]
pub enum RagError {
    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Dataset load error: {0}")]
    DatasetLoad(String),

    #[error("Index build error: {0}")]
    IndexBuild(String),

    #[error("Index not initialized. Build the index before searching or adding documents")]
    IndexNotInitialized,

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Web search error: {0}")]
    WebSearch(String),

    #[error("Content fetch error: {0}")]
    ContentFetch(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub mod assistant;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod embeddings;
pub mod generation;
pub mod index;
pub mod prompt;
pub mod retrieval;
pub mod store;
pub mod web;

#[cfg(test)]
pub(crate) mod test_support;
