//! Persistent vector store backed by a JSON snapshot on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::document::{Chunk, ScoredChunk};
use crate::embedding::Embedder;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

const BACKEND: &str = "persistent";

/// A chunk together with its embedding, as persisted on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredChunk {
    chunk: Chunk,
    embedding: Vec<f32>,
}

/// A [`VectorStore`] that keeps chunks in memory and snapshots them to a
/// JSON file after every add.
///
/// The collection file lives at `<dir>/<collection>.json` and is created on
/// first use; an existing snapshot is reloaded on open, so the store survives
/// process restarts. Embeddings are produced by the configured [`Embedder`]
/// at add time and at query time.
///
/// # Example
///
/// ```rust,ignore
/// use docrag_rag::{HashEmbedder, PersistentVectorStore};
///
/// let store = PersistentVectorStore::open(
///     "vector_store",
///     "docs",
///     Arc::new(HashEmbedder::default()),
/// ).await?;
/// ```
pub struct PersistentVectorStore {
    embedder: Arc<dyn Embedder>,
    entries: RwLock<HashMap<String, StoredChunk>>,
    snapshot_path: PathBuf,
}

impl PersistentVectorStore {
    /// Open (or create) the named collection under `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::VectorStoreError`] if the directory cannot be
    /// created or an existing snapshot cannot be read or parsed.
    pub async fn open(
        dir: impl AsRef<Path>,
        collection: &str,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await.map_err(|e| store_error(format!(
            "failed to create store directory '{}': {e}",
            dir.display()
        )))?;

        let snapshot_path = dir.join(format!("{collection}.json"));
        let entries = if snapshot_path.exists() {
            let bytes = tokio::fs::read(&snapshot_path).await.map_err(|e| {
                store_error(format!("failed to read snapshot '{}': {e}", snapshot_path.display()))
            })?;
            let stored: Vec<StoredChunk> = serde_json::from_slice(&bytes).map_err(|e| {
                store_error(format!("failed to parse snapshot '{}': {e}", snapshot_path.display()))
            })?;
            info!(collection, chunks = stored.len(), "loaded vector store snapshot");
            stored.into_iter().map(|s| (s.chunk.id.clone(), s)).collect()
        } else {
            info!(collection, "created new vector store collection");
            HashMap::new()
        };

        Ok(Self { embedder, entries: RwLock::new(entries), snapshot_path })
    }

    /// Write the current entries to the snapshot file.
    async fn save(&self, entries: &HashMap<String, StoredChunk>) -> Result<()> {
        let stored: Vec<&StoredChunk> = entries.values().collect();
        let json = serde_json::to_vec(&stored)
            .map_err(|e| store_error(format!("failed to serialize snapshot: {e}")))?;
        tokio::fs::write(&self.snapshot_path, json).await.map_err(|e| {
            store_error(format!("failed to write snapshot '{}': {e}", self.snapshot_path.display()))
        })
    }
}

fn store_error(message: String) -> RagError {
    RagError::VectorStoreError { backend: BACKEND.to_string(), message }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStore for PersistentVectorStore {
    async fn add(&self, chunks: &[Chunk]) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let mut entries = self.entries.write().await;
        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            entries.insert(chunk.id.clone(), StoredChunk { chunk: chunk.clone(), embedding });
        }
        self.save(&entries).await?;
        debug!(added = chunks.len(), total = entries.len(), "added chunks to vector store");
        Ok(())
    }

    async fn query(&self, query_text: &str, n_results: usize) -> Result<Vec<ScoredChunk>> {
        let query_embedding = self.embedder.embed(query_text).await?;

        let entries = self.entries.read().await;
        let mut scored: Vec<ScoredChunk> = entries
            .values()
            .map(|stored| ScoredChunk {
                chunk: stored.chunk.clone(),
                score: cosine_similarity(&stored.embedding, &query_embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(n_results);
        Ok(scored)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.entries.read().await.len())
    }
}
