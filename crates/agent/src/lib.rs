//! The SudoStake agent turn runner.
//!
//! One turn works like the hosting runtime expects:
//!
//! 1. **Resolve the session** — headless when signing keys are present,
//!    view-only otherwise. View-only sessions still serve every read tool.
//! 2. **Assemble the prompt** — system prompt, prior history, retrieved
//!    documentation chunks, latest user message, in that order.
//! 3. **Hand tool definitions to the LM** and dispatch the tool calls it
//!    makes; every tool delivers exactly one reply through the
//!    environment's reply sink.

pub mod console;
pub mod prompt;
pub mod runtime;

pub use console::ConsoleEnvironment;
pub use prompt::{assemble_prompt, top_doc_chunks, SYSTEM_PROMPT};
pub use runtime::AgentRuntime;
