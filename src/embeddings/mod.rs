// Embeddings module
// Text embedding providers and vector normalization

pub mod ollama;

#[cfg(test)]
mod tests;

use anyhow::Result;

pub use ollama::OllamaClient;

/// A service that turns text into fixed-dimension vectors
pub trait Embedder {
    /// Embed a single text
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed several texts, returning one vector per input in the same order
    #[inline]
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    /// Preferred number of texts per `embed_batch` call
    #[inline]
    fn batch_size(&self) -> usize {
        32
    }
}

impl<T: Embedder + ?Sized> Embedder for &T {
    #[inline]
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed(text)
    }

    #[inline]
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }

    #[inline]
    fn batch_size(&self) -> usize {
        (**self).batch_size()
    }
}

/// Scale a vector to unit L2 norm.
///
/// Returns `None` for zero-length, zero-norm or non-finite vectors, which have
/// no direction and cannot take part in cosine similarity.
#[inline]
pub fn normalize(mut vector: Vec<f32>) -> Option<Vec<f32>> {
    let norm = l2_norm(&vector);
    if vector.is_empty() || norm == 0.0 || !norm.is_finite() {
        return None;
    }

    for value in &mut vector {
        *value /= norm;
    }
    Some(vector)
}

#[inline]
pub fn l2_norm(vector: &[f32]) -> f32 {
    vector.iter().map(|v| v * v).sum::<f32>().sqrt()
}

/// Inner product of two equal-length vectors
#[inline]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
