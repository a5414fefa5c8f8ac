// context.rs — Intent-context payload and the selection tool definition.
//
// A successful `select_active_intent` call does not execute anything; the
// gate answers with this XML-like document so the agent sees its scope,
// constraints and acceptance criteria before it starts mutating files.

use serde_json::json;

use crate::intent::Intent;

/// Escape the five reserved markup characters.
pub fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Render the `<intent_context>` document for a selected intent.
pub fn intent_context_xml(intent: &Intent) -> String {
    let mut lines = vec![
        "<intent_context>".to_string(),
        format!("  <id>{}</id>", escape_xml(&intent.id)),
        format!("  <name>{}</name>", escape_xml(&intent.name)),
        format!("  <status>{}</status>", escape_xml(&intent.status.to_string())),
        "  <owned_scope>".to_string(),
    ];
    lines.extend(
        intent
            .owned_scope
            .iter()
            .map(|p| format!("  <pattern>{}</pattern>", escape_xml(p))),
    );
    lines.push("  </owned_scope>".to_string());
    lines.push("  <constraints>".to_string());
    lines.extend(item_lines(&intent.constraints));
    lines.push("  </constraints>".to_string());
    lines.push("  <acceptance_criteria>".to_string());
    lines.extend(item_lines(&intent.acceptance_criteria));
    lines.push("  </acceptance_criteria>".to_string());
    lines.push("</intent_context>".to_string());
    lines.join("\n")
}

fn item_lines(items: &[String]) -> impl Iterator<Item = String> + '_ {
    items
        .iter()
        .map(|item| format!("  <item>{}</item>", escape_xml(item)))
}

/// Function-tool definition for `select_active_intent`, in the shape agent
/// runtimes register native tools.
pub fn select_active_intent_tool() -> serde_json::Value {
    json!({
        "type": "function",
        "function": {
            "name": "select_active_intent",
            "description": "Declare which active intent is being pursued before any other tool execution. Must be called with an intent_id present in .orchestration/active_intents.yaml.",
            "parameters": {
                "type": "object",
                "required": ["intent_id"],
                "properties": {
                    "intent_id": {
                        "type": "string",
                        "description": "Identifier of the intent to mark as active (e.g., INT-001)."
                    }
                },
                "additionalProperties": false
            }
        },
        "strict": true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentStatus;

    fn sample() -> Intent {
        Intent {
            id: "INT-001".to_string(),
            name: "Fix <auth> & \"login\"".to_string(),
            status: IntentStatus::InProgress,
            owned_scope: vec!["src/**".to_string()],
            constraints: vec!["Don't add deps".to_string()],
            acceptance_criteria: vec![],
        }
    }

    #[test]
    fn escapes_all_reserved_characters() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
    }

    #[test]
    fn context_contains_all_fields_escaped() {
        let xml = intent_context_xml(&sample());
        assert!(xml.starts_with("<intent_context>\n  <id>INT-001</id>"));
        assert!(xml.contains("<name>Fix &lt;auth&gt; &amp; &quot;login&quot;</name>"));
        assert!(xml.contains("<status>IN_PROGRESS</status>"));
        assert!(xml.contains("  <pattern>src/**</pattern>"));
        assert!(xml.contains("  <item>Don&apos;t add deps</item>"));
        assert!(xml.ends_with("</intent_context>"));
    }

    #[test]
    fn empty_lists_render_open_and_close_tags_only() {
        let xml = intent_context_xml(&sample());
        assert!(xml.contains("  <acceptance_criteria>\n  </acceptance_criteria>"));
    }

    #[test]
    fn tool_definition_requires_intent_id() {
        let tool = select_active_intent_tool();
        assert_eq!(tool["function"]["name"], "select_active_intent");
        assert_eq!(tool["function"]["parameters"]["required"][0], "intent_id");
    }
}
