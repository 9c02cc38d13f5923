//! Exact inner-product index over unit vectors.
//!
//! Vectors are stored row-major in one contiguous buffer. Search is
//! exhaustive, so with normalized inputs the scores are exact cosine
//! similarities.


use crate::embeddings::dot;
use crate::{RagError, Result};

/// Similarity of one stored vector to a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Row of the matching vector, which is also the document id
    pub position: usize,
    pub similarity_score: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<f32>,
}

impl FlatIndex {
    #[inline]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vectors.len().checked_div(self.dimension).unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    #[inline]
    pub fn check_dimension(&self, vector: &[f32]) -> Result<()> {
        if vector.len() == self.dimension {
            Ok(())
        } else {
            Err(RagError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            })
        }
    }

    #[inline]
    pub fn add(&mut self, vector: &[f32]) -> Result<()> {
        self.check_dimension(vector)?;
        self.vectors.extend_from_slice(vector);
        Ok(())
    }

    /// Return the `top_k` best matches, highest score first.
    ///
    /// Equal scores keep insertion order.
    #[inline]
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        self.check_dimension(query)?;
        if top_k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let mut results: Vec<SearchResult> = self
            .vectors
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(position, vector)| SearchResult {
                position,
                similarity_score: dot(query, vector),
            })
            .collect();

        results.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        results.truncate(top_k);
        Ok(results)
    }
}
