//! Word-count chunking with overlap.

use crate::error::{RagError, Result};

/// Splits text into overlapping chunks by word count.
///
/// Consecutive chunks overlap by exactly `overlap` words; the final chunk
/// may be shorter than `chunk_size`. Construction fails if
/// `overlap >= chunk_size`, which would otherwise make the window step zero.
///
/// # Example
///
/// ```rust
/// use docrag_rag::chunking::WordChunker;
///
/// let chunker = WordChunker::new(4, 1).unwrap();
/// let chunks = chunker.split("one two three four five six");
/// assert_eq!(chunks[0], "one two three four");
/// assert_eq!(chunks[1], "four five six");
/// ```
#[derive(Debug, Clone)]
pub struct WordChunker {
    chunk_size: usize,
    overlap: usize,
}

/// Default chunk size in words, matching the ingestion defaults.
pub const DEFAULT_CHUNK_SIZE: usize = 900;

/// Default overlap in words between consecutive chunks.
pub const DEFAULT_OVERLAP: usize = 150;

impl WordChunker {
    /// Create a new `WordChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ChunkingError`] if `overlap >= chunk_size` or
    /// `chunk_size == 0`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagError::ChunkingError("chunk_size must be greater than zero".into()));
        }
        if overlap >= chunk_size {
            return Err(RagError::ChunkingError(format!(
                "overlap ({overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, overlap })
    }

    /// Split `text` into overlapping word-count chunks.
    ///
    /// Returns an empty `Vec` for text with no words. A text shorter than
    /// one chunk yields a single chunk containing every word.
    pub fn split(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let step = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;
        while start < words.len() {
            let end = (start + self.chunk_size).min(words.len());
            chunks.push(words[start..end].join(" "));
            if end == words.len() {
                break;
            }
            start += step;
        }
        chunks
    }
}

impl Default for WordChunker {
    fn default() -> Self {
        Self { chunk_size: DEFAULT_CHUNK_SIZE, overlap: DEFAULT_OVERLAP }
    }
}
