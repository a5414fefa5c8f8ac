// verify.rs — Run the project's verification command.

use ig_gateway::GatewayConfig;
use ig_verify::VerifyRequest;

pub fn execute(config: &GatewayConfig, intent: &str, path: &str) -> anyhow::Result<()> {
    let runner = config.verification_runner();
    let result = runner.verify(&VerifyRequest {
        intent_id: intent.to_string(),
        path: path.to_string(),
    })?;

    print!("{}", result.output);
    if result.passed {
        println!("Verification passed.");
        return Ok(());
    }

    println!();
    println!("Remediation note appended to {}", runner.log_path().display());
    anyhow::bail!("Verification failed: `{}`", runner.command())
}
