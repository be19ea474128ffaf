//! Finance assistant command

use anyhow::Result;
use finmate_core::{respond, AnalyticsConfig, ChatContext};

use super::{print_json, LedgerView};

pub fn cmd_chat(view: &LedgerView, config: &AnalyticsConfig, query: &str, json: bool) -> Result<()> {
    let ctx = ChatContext::new(&view.transactions, &view.limits, config);
    let reply = respond(query, &ctx);

    if json {
        return print_json(&serde_json::json!({ "query": query, "reply": reply }));
    }

    println!();
    println!("🤖 {}", reply);
    Ok(())
}
