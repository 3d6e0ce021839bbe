//! The answer engine: retrieve context, prompt the model, never raise.

use std::sync::Arc;

use docrag_model::{ChatClient, ChatMessage, LlmConfig};
use docrag_rag::{Result, ScoredChunk, VectorStore};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Fixed answer returned when the store has nothing relevant.
pub const NO_CONTEXT_ANSWER: &str = "No relevant context found in indexed PDFs.";

/// Maximum characters of chunk text shown in a context preview entry.
const PREVIEW_CHARS: usize = 700;

/// Inclusive clamp range for the requested top-k.
const TOP_K_MIN: usize = 1;
const TOP_K_MAX: usize = 10;

const ANSWER_TEMPERATURE: f32 = 0.1;
const ANSWER_MAX_TOKENS: u32 = 400;

const SYSTEM_PROMPT: &str = "You are a document question-answering assistant.\n\
    You MUST use ONLY the provided context to answer.\n\
    If the answer is not clearly in the context, reply: \"Not found in context.\"\n\
    Do NOT hallucinate or invent facts.\n\
    If the question asks for a list, respond in bullet points.\n\
    Keep answers concise.\n";

/// The payload returned for every ask request.
///
/// Failures of the chat call are embedded in `answer` rather than surfaced
/// as an HTTP error; callers inspect the text, not a status code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// The model's answer, a fixed sentinel, or an embedded error string.
    pub answer: String,
    /// Human-readable previews of the chunks supplied as context.
    pub context_preview: Vec<String>,
}

/// Answers questions from vector-store context via the remote chat endpoint.
pub struct AnswerEngine {
    store: Arc<dyn VectorStore>,
    /// Built once from config; a missing endpoint/key is kept as the error
    /// message to report at call time instead of degrading silently.
    chat: std::result::Result<ChatClient, String>,
}

/// Truncate to at most `max` characters on a scalar-value boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Render one retrieved chunk as a context preview line.
fn preview_line(result: &ScoredChunk) -> String {
    format!(
        "- ({}, chunk {}) {}",
        result.chunk.source,
        result.chunk.index,
        truncate_chars(&result.chunk.text, PREVIEW_CHARS)
    )
}

impl AnswerEngine {
    /// Create an engine over the given store and chat endpoint settings.
    pub fn new(store: Arc<dyn VectorStore>, llm: &LlmConfig) -> Self {
        let chat = ChatClient::new(llm).map_err(|e| e.to_string());
        if let Err(message) = &chat {
            warn!(%message, "chat endpoint not usable; ask requests will report the error");
        }
        Self { store, chat }
    }

    /// Answer `question` from the `top_k` most relevant chunks.
    ///
    /// `top_k` is clamped to `[1, 10]`. An empty query result returns the
    /// fixed no-context answer without calling the model. Chat failures are
    /// embedded in the answer text.
    ///
    /// # Errors
    ///
    /// Only vector store failures propagate; everything downstream of a
    /// successful query is reported in-band.
    pub async fn ask(&self, question: &str, top_k: usize) -> Result<AskResponse> {
        let top_k = top_k.clamp(TOP_K_MIN, TOP_K_MAX);
        let results = self.store.query(question, top_k).await?;

        if results.is_empty() {
            info!(top_k, "no relevant context for question");
            return Ok(AskResponse {
                answer: NO_CONTEXT_ANSWER.to_string(),
                context_preview: Vec::new(),
            });
        }

        let previews: Vec<String> = results.iter().map(preview_line).collect();
        let context_block = previews.join("\n");

        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!("Question: {question}\n\nContext:\n{context_block}")),
        ];

        let answer = match &self.chat {
            Ok(client) => {
                match client.chat(&messages, ANSWER_TEMPERATURE, ANSWER_MAX_TOKENS).await {
                    Ok(answer) => answer,
                    Err(e) => {
                        warn!(error = %e, "chat call failed; embedding error in answer");
                        format!("Error calling LLM: {e}")
                    }
                }
            }
            Err(message) => format!("Error calling LLM: {message}"),
        };

        info!(context_chunks = previews.len(), "answered question");
        Ok(AskResponse { answer, context_preview: previews })
    }
}
