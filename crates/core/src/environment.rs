//! The agent-hosting runtime capability.
//!
//! The hosting runtime owns the message history, the reply sink, and the
//! vector store. Tools and the turn runner consume it through this narrow
//! trait; the CLI provides a console implementation for local runs.

use crate::error::Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    /// Retrieved documentation injected into the prompt.
    Documentation,
}

/// One message in the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        ChatMessage {
            role,
            content: content.into(),
        }
    }
}

/// A retrieved vector-store chunk. Kept as raw JSON: the hosting runtime's
/// chunk schema is not ours to pin down.
pub type DocChunk = Value;

/// The hosting runtime surface the agent consumes.
#[async_trait]
pub trait Environment: Send + Sync {
    /// Conversation history, oldest first.
    fn list_messages(&self) -> Vec<ChatMessage>;

    /// Fire-and-forget reply sink. Each tool invocation calls this exactly
    /// once with its final user-facing text.
    fn add_reply(&self, text: &str);

    /// Query the vector store for documentation chunks.
    async fn query_vector_store(&self, store_id: &str, query: &str)
        -> Result<Vec<DocChunk>, Error>;
}
