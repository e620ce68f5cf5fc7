//! Console environment for local runs.
//!
//! The production environment is provided by the hosting runtime; this one
//! keeps the history in memory, prints replies to stdout, and has no
//! vector store attached.

use async_trait::async_trait;
use std::sync::Mutex;
use sudostake_core::error::Error;
use sudostake_core::{ChatMessage, DocChunk, Environment, Role};

#[derive(Default)]
pub struct ConsoleEnvironment {
    messages: Mutex<Vec<ChatMessage>>,
}

impl ConsoleEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message to the history.
    pub fn push_user(&self, content: impl Into<String>) {
        self.messages
            .lock()
            .unwrap()
            .push(ChatMessage::new(Role::User, content));
    }
}

#[async_trait]
impl Environment for ConsoleEnvironment {
    fn list_messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().unwrap().clone()
    }

    fn add_reply(&self, text: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(ChatMessage::new(Role::Assistant, text));
        println!("{text}");
    }

    async fn query_vector_store(
        &self,
        _store_id: &str,
        _query: &str,
    ) -> Result<Vec<DocChunk>, Error> {
        Ok(vec![])
    }
}
