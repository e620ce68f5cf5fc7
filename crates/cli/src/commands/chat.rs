//! `sudostake-agent chat` — local tool console.
//!
//! The hosting runtime owns the language model; locally this command
//! dispatches tool calls directly. Input lines have the form
//! `tool_name {"vault_id": "..."}` (arguments optional). Replies print to
//! stdout through the console environment.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use sudostake_agent_runtime::{AgentRuntime, ConsoleEnvironment};
use sudostake_config::AgentConfig;
use sudostake_core::ToolCall;

pub async fn run(
    config_path: Option<&Path>,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    // load() applies env overrides and validates.
    let config = AgentConfig::load(config_path)?;

    let env = Arc::new(ConsoleEnvironment::new());
    // Transaction signing stays with the hosting runtime; local sessions
    // are view-only.
    let runtime = AgentRuntime::new(&config, env.clone(), None);

    println!("SudoStake agent — {} session on {}", mode(&runtime), config.network);
    println!("Available tools:");
    for def in runtime.tool_definitions() {
        println!("  {:<34} {}", def.name, def.description);
    }
    println!();

    if let Some(line) = message {
        dispatch_line(&runtime, &env, &line).await;
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() || line == "exit" || line == "quit" {
            break;
        }
        dispatch_line(&runtime, &env, line).await;
    }
    Ok(())
}

fn mode(runtime: &AgentRuntime) -> &'static str {
    match runtime.session().signing_mode {
        sudostake_core::SigningMode::Headless => "headless",
        sudostake_core::SigningMode::ViewOnly => "view-only",
    }
}

/// Parse `tool_name {json args}` and dispatch. The tool's reply reaches
/// stdout via the environment; only errors are printed here.
async fn dispatch_line(runtime: &AgentRuntime, env: &Arc<ConsoleEnvironment>, line: &str) {
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let arguments = if rest.is_empty() {
        serde_json::json!({})
    } else {
        match serde_json::from_str(rest) {
            Ok(value) => value,
            Err(err) => {
                eprintln!("invalid JSON arguments: {err}");
                return;
            }
        }
    };

    env.push_user(line);
    let call = ToolCall {
        id: "local".to_string(),
        name: name.to_string(),
        arguments,
    };
    if let Err(err) = runtime.dispatch(&call).await {
        eprintln!("{err}");
    }
}
