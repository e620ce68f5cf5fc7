//! Answer questions from the SudoStake documentation vector store.

use crate::ctx::ToolCtx;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use sudostake_core::error::ToolError;
use sudostake_core::{Role, Tool, ToolResult};
use tracing::info;

pub struct QueryDocsTool {
    ctx: Arc<ToolCtx>,
}

impl QueryDocsTool {
    pub fn new(ctx: Arc<ToolCtx>) -> Self {
        Self { ctx }
    }

    async fn run(&self) -> (bool, String) {
        let ctx = &self.ctx;
        let store_id = ctx.vector_store_id.trim();
        if store_id.is_empty() {
            return (
                false,
                "Vector store not initialised. Run /build_docs first.".to_string(),
            );
        }

        // The query is the latest user message.
        let query = ctx
            .env
            .list_messages()
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.trim().to_string())
            .unwrap_or_default();
        if query.is_empty() {
            return (false, "No query provided.".to_string());
        }

        let chunks = match ctx.env.query_vector_store(store_id, &query).await {
            Ok(chunks) => chunks,
            Err(err) => {
                return (
                    false,
                    format!("❌ Documentation lookup failed\n\n**Error:** {err}"),
                );
            }
        };
        info!(store_id, hits = chunks.len(), "docs tool queried vector store");

        if chunks.is_empty() {
            return (true, "No relevant documentation found.".to_string());
        }

        let mut lines = vec!["SudoStake Docs (top results):".to_string()];
        for (idx, chunk) in chunks.iter().enumerate() {
            lines.push(render_chunk(idx + 1, chunk));
        }
        (true, lines.join("\n"))
    }
}

fn render_chunk(index: usize, chunk: &Value) -> String {
    let text = chunk
        .get("chunk_text")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim();

    let first_line = text.lines().next().unwrap_or("");
    let title = if first_line.starts_with('#') {
        first_line.trim_start_matches(['#', ' ']).to_string()
    } else {
        first_line.chars().take(80).collect()
    };

    let mut snippet: String = text.chars().take(200).collect::<String>().replace('\n', " ");
    if text.chars().count() > 200 {
        snippet.push('…');
    }

    let mut meta = Vec::new();
    if let Some(distance) = chunk.get("distance").and_then(Value::as_f64) {
        meta.push(format!("distance={distance:.3}"));
    }
    if let Some(file_id) = chunk.get("file_id").and_then(Value::as_str) {
        meta.push(format!("file={}", file_id.chars().take(18).collect::<String>()));
    }
    let meta_str = if meta.is_empty() {
        String::new()
    } else {
        format!(" ({})", meta.join(", "))
    };

    format!("{index}. {title}{meta_str}\n   {snippet}")
}

#[async_trait]
impl Tool for QueryDocsTool {
    fn name(&self) -> &str {
        "query_sudostake_docs"
    }

    fn description(&self) -> &str {
        "Answer questions about SudoStake (vaults, staking, lending, fees) \
         from the indexed protocol documentation."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let (success, text) = self.run().await;
        Ok(self.ctx.deliver(success, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_markdown_title_and_truncated_snippet() {
        let body = format!("# Vault Fees\n{}", "x".repeat(300));
        let chunk = json!({"chunk_text": body, "distance": 0.1234, "file_id": "file-abcdef1234567890xx"});
        let rendered = render_chunk(1, &chunk);
        assert!(rendered.starts_with("1. Vault Fees (distance=0.123, file=file-abcdef123456"));
        assert!(rendered.ends_with('…'));
        assert_eq!(rendered.matches('\n').count(), 1);
    }

    #[test]
    fn plain_text_title_is_capped() {
        let chunk = json!({"chunk_text": "a".repeat(120)});
        let rendered = render_chunk(2, &chunk);
        let title_line = rendered.lines().next().unwrap();
        assert_eq!(title_line.len(), "2. ".len() + 80);
    }
}
