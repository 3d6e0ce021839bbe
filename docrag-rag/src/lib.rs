//! PDF ingestion, chunking, and vector retrieval for the docrag backend.
//!
//! The crate is a thin composition of small pieces:
//!
//! - [`WordChunker`] — overlapping word-count chunking
//! - [`extract_text`] — PDF text extraction
//! - [`Embedder`] / [`HashEmbedder`] — text embeddings (pluggable)
//! - [`VectorStore`] / [`PersistentVectorStore`] — add / query / count over
//!   a disk-backed collection
//! - [`ingest_folder`] — the folder → chunks → store batch pipeline

pub mod chunking;
pub mod document;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod store;
pub mod vectorstore;

pub use chunking::WordChunker;
pub use document::{Chunk, ScoredChunk};
pub use embedding::{Embedder, HashEmbedder};
pub use error::{RagError, Result};
pub use extract::extract_text;
pub use ingest::{ingest_folder, IngestReport};
pub use store::PersistentVectorStore;
pub use vectorstore::VectorStore;
