// remediation.rs — Formatting of failed-verification notes.
//
// Each failed run becomes one section of the remediation log:
//
//   ## 2026-01-01T00:00:00.000Z
//   - Intent: INT-001
//   - File: src/a.ts
//   - Specification: TRP1-Week1-AI-Native-IDE
//   - Summary:
//
//   ```
//   <first 20 lines of output>
//   ```
//
//   - Guidance:
//   - ...
//
//   ---

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::VerifyError;

/// Captured output beyond this many characters is cut.
pub const MAX_OUTPUT_CHARS: usize = 4000;

pub const TRUNCATION_MARKER: &str = "\n...<truncated>";

/// Lines of output quoted in the log summary.
pub const SUMMARY_LINES: usize = 20;

/// Cap `text` at [`MAX_OUTPUT_CHARS`] characters, marking the cut.
pub fn truncate_output(text: &str) -> String {
    match text.char_indices().nth(MAX_OUTPUT_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Fenced block with the first [`SUMMARY_LINES`] lines of trimmed output.
pub fn format_summary(output: &str) -> String {
    let snippet: Vec<&str> = output.trim().split('\n').take(SUMMARY_LINES).collect();
    format!("```\n{}\n```", snippet.join("\n"))
}

pub fn build_guidance(path: &str, output: &str) -> Vec<String> {
    let mut bullets = vec![
        "- Revisit the acceptance_criteria in active_intents.yaml before retrying.".to_string(),
        "- Plan a smaller change set to isolate the failure signal.".to_string(),
        format!("- Verify impacted files (e.g., {path}) locally before the next mutation."),
    ];
    if output.to_lowercase().contains("timeout") {
        bullets.push("- Consider running targeted tests to avoid hitting timeouts.".to_string());
    }
    bullets
}

/// Render one log section.
pub fn format_log_entry(
    timestamp: &DateTime<Utc>,
    intent_id: &str,
    path: &str,
    specification_tag: &str,
    output: &str,
) -> String {
    format!(
        "## {ts}\n- Intent: {intent_id}\n- File: {path}\n- Specification: {specification_tag}\n- Summary:\n\n{summary}\n\n- Guidance:\n{guidance}\n\n---\n",
        ts = timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        summary = format_summary(output),
        guidance = build_guidance(path, output).join("\n"),
    )
}

/// Append `entry` to the log at `log_path`, creating it and its parent
/// directory when absent.
pub fn append_entry(log_path: &Path, entry: &str) -> Result<(), VerifyError> {
    let err = |source: std::io::Error| VerifyError::LogWriteFailed {
        path: log_path.to_path_buf(),
        source,
    };
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).map_err(err)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(err)?;
    file.write_all(entry.as_bytes()).map_err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn short_output_is_untouched() {
        assert_eq!(truncate_output("ok"), "ok");
        let exact = "a".repeat(MAX_OUTPUT_CHARS);
        assert_eq!(truncate_output(&exact), exact);
    }

    #[test]
    fn long_output_is_cut_with_marker() {
        let long = "é".repeat(MAX_OUTPUT_CHARS + 10);
        let cut = truncate_output(&long);
        assert!(cut.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            cut.chars().count(),
            MAX_OUTPUT_CHARS + TRUNCATION_MARKER.chars().count()
        );
    }

    #[test]
    fn summary_keeps_first_twenty_lines() {
        let output: Vec<String> = (1..=30).map(|i| format!("line {i}")).collect();
        let summary = format_summary(&format!("\n\n{}\n", output.join("\n")));
        assert!(summary.starts_with("```\nline 1\n"));
        assert!(summary.ends_with("line 20\n```"));
        assert!(!summary.contains("line 21"));
    }

    #[test]
    fn timeout_adds_a_fourth_bullet() {
        assert_eq!(build_guidance("a.ts", "1 failed").len(), 3);
        let bullets = build_guidance("a.ts", "Error: TIMEOUT of 2000ms exceeded");
        assert_eq!(bullets.len(), 4);
        assert!(bullets[3].contains("targeted tests"));
        assert!(bullets[2].contains("a.ts"));
    }

    #[test]
    fn entry_layout() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let entry = format_log_entry(&ts, "INT-001", "src/a.ts", "TAG", "boom");
        let expected = "## 2026-03-01T12:00:00.000Z\n\
            - Intent: INT-001\n\
            - File: src/a.ts\n\
            - Specification: TAG\n\
            - Summary:\n\
            \n\
            ```\nboom\n```\n\
            \n\
            - Guidance:\n\
            - Revisit the acceptance_criteria in active_intents.yaml before retrying.\n\
            - Plan a smaller change set to isolate the failure signal.\n\
            - Verify impacted files (e.g., src/a.ts) locally before the next mutation.\n\
            \n\
            ---\n";
        assert_eq!(entry, expected);
    }
}
