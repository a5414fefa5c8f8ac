// vcs.rs — Best-effort git revision lookup.
//
// Not being in a repository, or git being absent, yields `None`; neither
// is an error for the ledger.

use std::path::Path;
use std::process::Command;

/// `git rev-parse HEAD` in `work_dir`, or `None` if it cannot be determined.
pub fn current_revision(work_dir: &Path) -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(work_dir)
        .output()
        .ok()?;
    if !output.status.success() {
        tracing::debug!(dir = %work_dir.display(), "no git revision available");
        return None;
    }
    let rev = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!rev.is_empty()).then_some(rev)
}
