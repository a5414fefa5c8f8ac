//! # ig-cli
//!
//! Command-line interface for Intent Gate.
//!
//! Operator tooling around the governance gate:
//! - `ig intent list/show` — inspect the active intents and their context
//! - `ig trace tail/verify` — inspect the agent trace ledger
//! - `ig classify` — see how the gate would classify a tool call
//! - `ig verify` — run the project's tests and log failures
//! - `ig tool-schema` — print the `select_active_intent` tool definition

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ig_gateway::GatewayConfig;
use tracing_subscriber::EnvFilter;

/// Intent Gate CLI: inspect intents, traces and verification.
#[derive(Parser)]
#[command(name = "ig", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect active intents.
    Intent {
        #[command(subcommand)]
        command: commands::intent::IntentCommands,
    },
    /// Inspect the agent trace ledger.
    Trace {
        #[command(subcommand)]
        command: commands::trace::TraceCommands,
    },
    /// Classify a tool call as SAFE, DESTRUCTIVE or UNKNOWN.
    Classify {
        /// Tool name (e.g., "execute_command").
        tool: String,
        /// Shell command, for execute_command.
        #[arg(long)]
        command: Option<String>,
    },
    /// Run the verification command and log failures.
    Verify {
        /// Intent the verified change belongs to.
        #[arg(long)]
        intent: String,
        /// File the change touched.
        #[arg(long)]
        path: String,
    },
    /// Print the select_active_intent tool definition as JSON.
    ToolSchema,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("ig_gateway=info".parse()?)
                .add_directive("ig_verify=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = GatewayConfig::load(&project_root)?;
    tracing::debug!(root = %project_root.display(), "gate configuration loaded");

    match &cli.command {
        Commands::Intent { command } => commands::intent::execute(command, &config),
        Commands::Trace { command } => commands::trace::execute(command, &config),
        Commands::Classify { tool, command } => {
            commands::classify::execute(&config, tool, command.as_deref())
        }
        Commands::Verify { intent, path } => commands::verify::execute(&config, intent, path),
        Commands::ToolSchema => commands::schema::execute(),
    }
}
