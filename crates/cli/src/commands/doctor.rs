//! `sudostake-agent doctor` — diagnose configuration and session health.

use std::path::Path;
use sudostake_config::AgentConfig;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 SudoStake Agent Doctor");
    println!("=========================\n");

    let mut issues = 0;

    // load() applies env overrides and validates.
    let config = match AgentConfig::load(config_path) {
        Ok(config) => {
            println!("  ✅ Config loaded and valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config failed to load: {e}");
            return Err(e.into());
        }
    };

    let profile = config.profile();
    println!("  ℹ️  Network: {}", profile.network);
    println!("  ℹ️  RPC: {}", profile.rpc_url);
    println!("  ℹ️  Factory: {}", profile.factory_id);
    println!("  ℹ️  Index API: {}", profile.index_api_base);

    if config.has_signing_keys() {
        println!(
            "  ✅ Signing keys configured for `{}`",
            config.account_id.as_deref().unwrap_or("unknown")
        );
    } else {
        println!("  ⚠️  No signing keys — state-changing tools will refuse");
        issues += 1;
    }

    if config.vector_store_id.trim().is_empty() {
        println!("  ⚠️  No vector store id — the docs tool is disabled");
        issues += 1;
    } else {
        println!("  ✅ Vector store configured");
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
