// schema.rs — Print the select_active_intent tool definition.

use ig_intent::select_active_intent_tool;

pub fn execute() -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&select_active_intent_tool())?
    );
    Ok(())
}
