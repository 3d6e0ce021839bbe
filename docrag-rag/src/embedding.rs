//! Embedding provider trait and a deterministic local implementation.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that generates vector embeddings from text input.
///
/// Implementations wrap specific embedding backends behind a unified async
/// interface. The default [`embed_batch`](Embedder::embed_batch)
/// implementation calls [`embed`](Embedder::embed) sequentially; backends
/// that support native batching should override it.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}

/// Default dimensionality for [`HashEmbedder`].
pub const DEFAULT_DIMENSIONS: usize = 256;

/// A deterministic character-n-gram hashing embedder.
///
/// Each lowercased word contributes its 3-grams (and the word itself), hashed
/// into a fixed-size vector which is then L2-normalized. Requires no model
/// files or network access, so retrieval works fully offline; swap in a real
/// [`Embedder`] backend for semantic quality.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    /// Create an embedder with the given output dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

/// FNV-1a hash, stable across platforms and runs.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimensions];

        for word in text.split_whitespace() {
            let word = word.to_lowercase();
            let slot = (fnv1a(word.as_bytes()) as usize) % self.dimensions;
            vector[slot] += 1.0;

            let chars: Vec<char> = word.chars().collect();
            for gram in chars.windows(3) {
                let gram: String = gram.iter().collect();
                let slot = (fnv1a(gram.as_bytes()) as usize) % self.dimensions;
                vector[slot] += 1.0;
            }
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embedding_is_deterministic() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed("primary survey airway").await.unwrap();
        let b = embedder.embed("primary survey airway").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn embedding_has_configured_dimensions_and_unit_norm() {
        let embedder = HashEmbedder::new(64);
        let v = embedder.embed("hello world").await.unwrap();
        assert_eq!(v.len(), 64);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn empty_text_embeds_to_zero_vector() {
        let embedder = HashEmbedder::new(16);
        let v = embedder.embed("").await.unwrap();
        assert!(v.iter().all(|x| *x == 0.0));
    }

    #[tokio::test]
    async fn similar_texts_score_higher_than_unrelated() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed("chest trauma management").await.unwrap();
        let b = embedder.embed("management of chest trauma").await.unwrap();
        let c = embedder.embed("quarterly revenue forecast").await.unwrap();

        let dot = |x: &[f32], y: &[f32]| -> f32 { x.iter().zip(y).map(|(a, b)| a * b).sum() };
        assert!(dot(&a, &b) > dot(&a, &c));
    }
}
