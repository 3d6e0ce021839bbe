//! Vector store trait for indexing and querying chunks by text similarity.

use async_trait::async_trait;

use crate::document::{Chunk, ScoredChunk};
use crate::error::Result;

/// A storage backend holding chunks and their embeddings.
///
/// The store owns the embedding step: callers hand over plain text chunks and
/// query strings, and the backend is free to embed and search however it
/// likes. One [`add`](VectorStore::add) batch and one
/// [`query`](VectorStore::query) are each atomic from the caller's point of
/// view; no further synchronization is layered on top.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Add a batch of chunks to the store.
    ///
    /// Chunk ids are assumed unique; re-adding an id overwrites the entry.
    async fn add(&self, chunks: &[Chunk]) -> Result<()>;

    /// Return the `n_results` chunks most relevant to `query_text`,
    /// ordered by descending similarity score.
    async fn query(&self, query_text: &str, n_results: usize) -> Result<Vec<ScoredChunk>>;

    /// Return the number of chunks currently stored.
    async fn count(&self) -> Result<usize>;
}
