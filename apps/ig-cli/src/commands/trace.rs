// trace.rs — Trace ledger subcommands: tail, verify.

use clap::Subcommand;
use ig_audit::{AuditError, TraceLedger};
use ig_gateway::GatewayConfig;

#[derive(Subcommand)]
pub enum TraceCommands {
    /// Show the most recent trace records.
    Tail {
        /// Number of records to show.
        #[arg(short, default_value = "10")]
        n: usize,
    },
    /// Check every ledger line is a well-formed trace record.
    Verify,
}

pub fn execute(cmd: &TraceCommands, config: &GatewayConfig) -> anyhow::Result<()> {
    let ledger = TraceLedger::new(
        &config.workspace_root,
        &config.trace_ledger,
        config.settings.trace.clone(),
    );

    if !ledger.path().exists() {
        println!("No trace ledger found at {}", ledger.path().display());
        return Ok(());
    }

    match cmd {
        TraceCommands::Tail { n } => {
            let records = ledger.read_all()?;
            let start = records.len().saturating_sub(*n);
            let recent = &records[start..];

            if recent.is_empty() {
                println!("No trace records.");
                return Ok(());
            }

            println!(
                "{:<20} {:<10} {:<18} {:<8} FILE",
                "TIMESTAMP", "INTENT", "CLASS", "LINES"
            );
            println!("{}", "-".repeat(80));

            for record in recent {
                for file in &record.files {
                    for conv in &file.conversations {
                        let lines = conv
                            .ranges
                            .first()
                            .map(|r| format!("{}-{}", r.start_line, r.end_line))
                            .unwrap_or_else(|| "-".to_string());
                        println!(
                            "{:<20} {:<10} {:<18} {:<8} {}",
                            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                            conv.intent_id,
                            conv.mutation_class,
                            lines,
                            file.relative_path,
                        );
                    }
                }
            }
        }

        TraceCommands::Verify => match ledger.verify() {
            Ok(count) => println!("Trace ledger verified: {} record(s).", count),
            Err(AuditError::InvalidRecord { line, reason }) => {
                println!("INVALID RECORD at line {}:", line);
                println!("  {}", reason);
                anyhow::bail!("Trace ledger verification failed");
            }
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}
