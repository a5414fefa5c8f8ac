// intent.rs — Intent subcommands: list, show.

use clap::Subcommand;
use ig_gateway::GatewayConfig;
use ig_intent::{intent_context_xml, IntentStore};

#[derive(Subcommand)]
pub enum IntentCommands {
    /// List all intents in the intents file.
    List,
    /// Print the context document an agent receives on selecting an intent.
    Show {
        /// Intent ID (e.g., "INT-001").
        id: String,
    },
}

pub fn execute(cmd: &IntentCommands, config: &GatewayConfig) -> anyhow::Result<()> {
    let store = IntentStore::new(&config.intents_file);

    match cmd {
        IntentCommands::List => {
            let intents = store.list()?;
            if intents.is_empty() {
                println!("No intents in {}", store.path().display());
                return Ok(());
            }

            println!("{:<12} {:<12} {:<32} SCOPE", "ID", "STATUS", "NAME");
            println!("{}", "-".repeat(80));
            for intent in intents {
                println!(
                    "{:<12} {:<12} {:<32} {}",
                    intent.id,
                    intent.status.to_string(),
                    truncate(&intent.name, 32),
                    intent.owned_scope.join(", ")
                );
            }
        }

        IntentCommands::Show { id } => match store.lookup(id.trim())? {
            Some(intent) => println!("{}", intent_context_xml(&intent)),
            None => anyhow::bail!("Intent not found: {}", id),
        },
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{}...", cut)
    }
}
