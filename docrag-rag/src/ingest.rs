//! Folder ingestion pipeline: PDFs → chunks → vector store.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::chunking::WordChunker;
use crate::document::Chunk;
use crate::error::{RagError, Result};
use crate::extract::extract_text;
use crate::vectorstore::VectorStore;

/// Counts reported after an ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestReport {
    /// Chunks added by this run.
    pub added_chunks: usize,
    /// Chunks now present in the store in total.
    pub total_chunks: usize,
}

/// Ingest every PDF in `folder` into the vector store.
///
/// Files are processed in lexical filename order. Non-PDF files (extension
/// checked case-insensitively) are ignored. A file whose extraction fails or
/// yields only whitespace is skipped with a warning; one bad file never
/// aborts the run. Each file's chunks carry a fresh uuid, the source file
/// name, and the chunk's index, and are added in a single batch call.
///
/// # Errors
///
/// Returns [`RagError::FolderNotFound`] if `folder` is not a directory.
/// Store [`count`](VectorStore::count) failures also surface as errors.
pub async fn ingest_folder(
    store: &dyn VectorStore,
    chunker: &WordChunker,
    folder: impl AsRef<Path>,
) -> Result<IngestReport> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(RagError::FolderNotFound(folder.display().to_string()));
    }

    let mut names: Vec<String> = std::fs::read_dir(folder)
        .map_err(|e| RagError::FolderNotFound(format!("{}: {e}", folder.display())))?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.to_lowercase().ends_with(".pdf"))
        .collect();
    names.sort();

    let mut added = 0;
    for name in &names {
        let path = folder.join(name);

        let text = match extract_text(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!(file = %name, error = %e, "skipping file: extraction failed");
                continue;
            }
        };
        if text.trim().is_empty() {
            warn!(file = %name, "skipping file: no extractable text");
            continue;
        }

        let chunks: Vec<Chunk> = chunker
            .split(&text)
            .into_iter()
            .enumerate()
            .map(|(index, text)| Chunk {
                id: Uuid::new_v4().to_string(),
                text,
                source: name.clone(),
                index,
            })
            .collect();

        match store.add(&chunks).await {
            Ok(()) => {
                info!(file = %name, chunks = chunks.len(), "ingested file");
                added += chunks.len();
            }
            Err(e) => {
                warn!(file = %name, error = %e, "skipping file: store add failed");
            }
        }
    }

    let total = store.count().await?;
    info!(added_chunks = added, total_chunks = total, "ingestion run complete");
    Ok(IngestReport { added_chunks: added, total_chunks: total })
}
