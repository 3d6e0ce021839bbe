//! Error types for the `docrag-rag` crate.

use thiserror::Error;

/// Errors that can occur during ingestion and retrieval.
#[derive(Debug, Error)]
pub enum RagError {
    /// An error occurred during document chunking.
    #[error("Chunking error: {0}")]
    ChunkingError(String),

    /// Text extraction from a document failed.
    #[error("Extraction error ({source_file}): {message}")]
    ExtractionError {
        /// The document that failed to extract.
        source_file: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStoreError {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// The ingestion folder does not exist.
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
