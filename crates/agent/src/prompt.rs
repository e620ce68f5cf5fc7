//! Prompt assembly: system prompt + history + retrieved docs + latest.

use sudostake_core::{ChatMessage, DocChunk, Environment, Role};
use tracing::warn;

pub const SYSTEM_PROMPT: &str =
    "You are SudoStake's AI Agent. Help users inspect or manage their vaults on NEAR.";

/// How many vector-store chunks ride along in the prompt.
pub const DOC_CHUNK_LIMIT: usize = 6;

/// Top-k documentation chunks for `query`. Retrieval problems degrade to
/// an empty set; the prompt is still assembled.
pub async fn top_doc_chunks(env: &dyn Environment, store_id: &str, query: &str) -> Vec<DocChunk> {
    if store_id.trim().is_empty() || query.trim().is_empty() {
        return vec![];
    }
    match env.query_vector_store(store_id, query).await {
        Ok(mut chunks) => {
            chunks.truncate(DOC_CHUNK_LIMIT);
            chunks
        }
        Err(err) => {
            warn!(store_id, error = %err, "vector store query failed");
            vec![]
        }
    }
}

/// Assemble the message list for one turn.
///
/// Documentation is injected as a JSON-serialized message right before the
/// latest user message so the LM sees it as fresh context, not history.
pub async fn assemble_prompt(env: &dyn Environment, store_id: &str) -> Vec<ChatMessage> {
    let messages = env.list_messages();
    let latest = messages.last().cloned();
    let query = latest.as_ref().map(|m| m.content.clone()).unwrap_or_default();
    let docs = top_doc_chunks(env, store_id, &query).await;

    let mut prompt = vec![ChatMessage::new(Role::System, SYSTEM_PROMPT)];
    if messages.len() > 1 {
        prompt.extend_from_slice(&messages[..messages.len() - 1]);
    }
    prompt.push(ChatMessage::new(
        Role::Documentation,
        serde_json::to_string(&docs).unwrap_or_else(|_| "[]".to_string()),
    ));
    if let Some(latest) = latest {
        prompt.push(latest);
    }
    prompt
}
