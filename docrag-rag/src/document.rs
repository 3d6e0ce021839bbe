//! Data types for indexed chunks and search results.

use serde::{Deserialize, Serialize};

/// A bounded substring of a source document, the unit of indexing and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk.
    pub id: String,
    /// The text content of the chunk. Never empty once stored.
    pub text: String,
    /// File name of the originating document.
    pub source: String,
    /// Position of this chunk within the source document.
    pub index: usize,
}

/// A retrieved [`Chunk`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}
