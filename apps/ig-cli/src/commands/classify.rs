// classify.rs — Show how the gate would classify a tool call.

use ig_gateway::GatewayConfig;
use ig_policy::{Classification, Classifier, ToolInvocation};

pub fn execute(config: &GatewayConfig, tool: &str, command: Option<&str>) -> anyhow::Result<()> {
    let classifier = Classifier::with_extra_patterns(&config.settings.shell.extra_danger_patterns)?;

    let mut invocation = ToolInvocation::new(tool);
    if let Some(command) = command {
        invocation = invocation.with_arg("command", command);
    }

    let classification = classifier.classify_invocation(&invocation);
    println!("{}", classification);
    if classification == Classification::Destructive {
        println!("Requires an active intent and human approval.");
    }
    Ok(())
}
