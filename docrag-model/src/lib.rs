//! Remote OpenAI-compatible chat client for the docrag backend.
//!
//! Exposes [`ChatClient`], a stateless request/response client with bounded
//! retry and exponential backoff, plus the [`ChatMessage`] wire types and
//! [`LlmConfig`] connection settings.

pub mod client;
pub mod config;
pub mod error;
pub mod message;

pub use client::{ChatClient, RetryPolicy};
pub use config::{LlmConfig, DEFAULT_MODEL};
pub use error::{ModelError, Result};
pub use message::{ChatMessage, Role};
