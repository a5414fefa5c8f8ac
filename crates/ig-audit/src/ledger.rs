// ledger.rs — Append-only JSONL trace ledger.
//
// One TraceRecord per line. JSONL keeps the ledger append-friendly and easy
// to inspect with standard tools (jq, grep, tail).
//
// Appends open the file in append mode and emit each record with a single
// `write_all` of `json + "\n"`. Existing lines are never read back or
// rewritten by the append path.
//
// Two things keep concurrent records from interleaving:
//
// - Each `TraceLedger` serializes its own appends with a mutex. Sessions
//   share one ledger behind an `Arc` (see `Gate`), so every session in a
//   gate goes through the same lock.
// - Separate `TraceLedger` values, or separate processes, pointed at the
//   same file do NOT share that mutex. They rely on the OS: with `O_APPEND`
//   each write lands at the current end of file, and a single small write
//   of one line is not split by other appenders on local filesystems.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::hasher;
use crate::record::{Contributor, TraceRecord};
use crate::vcs;

/// Provenance constants stamped into every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceSettings {
    /// Value of the `specification` related link.
    pub specification_tag: String,
    pub entity_type: String,
    pub model_identifier: String,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            specification_tag: "TRP1-Week1-AI-Native-IDE".to_string(),
            entity_type: "AI".to_string(),
            model_identifier: "openai-api".to_string(),
        }
    }
}

/// The four fields an accepted full-file write must carry to be traced.
#[derive(Debug, Clone, Copy)]
pub struct WriteTrace<'a> {
    pub path: &'a str,
    pub content: &'a str,
    pub intent_id: &'a str,
    pub mutation_class: &'a str,
}

/// Append-only trace ledger backed by a JSONL file.
///
/// `append` takes `&self`, so one ledger can be shared across sessions
/// behind an `Arc`. The file is reopened for every append instead of
/// holding a long-lived `BufWriter` like an audit log would: the ledger may
/// be rotated or deleted by operators between writes, and reopening picks
/// up the new file without restarting the gate.
///
/// The `write_lock` guards appends made through *this* value only.
#[derive(Debug)]
pub struct TraceLedger {
    workspace_root: PathBuf,
    path: PathBuf,
    settings: TraceSettings,
    write_lock: Mutex<()>,
}

impl TraceLedger {
    /// Ledger at `path`, resolved against `workspace_root` when relative.
    /// The git revision is looked up in `workspace_root`.
    pub fn new(
        workspace_root: impl AsRef<Path>,
        path: impl AsRef<Path>,
        settings: TraceSettings,
    ) -> Self {
        let workspace_root = workspace_root.as_ref().to_path_buf();
        let path = workspace_root.join(path);
        Self {
            workspace_root,
            path,
            settings,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &TraceSettings {
        &self.settings
    }

    /// Build a record for `write` and append it as one line.
    ///
    /// Creates the ledger directory if needed. Any other I/O failure is
    /// returned to the caller.
    pub fn append(&self, write: &WriteTrace<'_>) -> Result<TraceRecord, AuditError> {
        let record = TraceRecord::for_write(
            write.path,
            write.content,
            write.intent_id,
            write.mutation_class,
            Contributor {
                entity_type: self.settings.entity_type.clone(),
                model_identifier: self.settings.model_identifier.clone(),
            },
            &self.settings.specification_tag,
            vcs::current_revision(&self.workspace_root),
        );
        self.append_record(&record)?;
        tracing::info!(
            record_id = %record.record_id,
            path = write.path,
            intent_id = write.intent_id,
            mutation_class = write.mutation_class,
            "trace record appended"
        );
        Ok(record)
    }

    /// Append an already-built record.
    ///
    /// The line is fully serialized before the lock is taken, so a
    /// serialization error never leaves a partial line behind and the
    /// critical section covers only the filesystem calls.
    pub fn append_record(&self, record: &TraceRecord) -> Result<(), AuditError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| AuditError::LockPoisoned(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| AuditError::CreateDirFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| AuditError::OpenFailed {
                path: self.path.clone(),
                source,
            })?;
        // One write per record; never split a line across calls.
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// All records, oldest first. A ledger that does not exist yet is empty.
    pub fn read_all(&self) -> Result<Vec<TraceRecord>, AuditError> {
        let Some(reader) = self.open_reader()? else {
            return Ok(Vec::new());
        };
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }

    /// Check every line parses as a record and every range carries a
    /// well-formed `sha256:` hash. Returns the number of records checked,
    /// or the first offending line (1-based).
    pub fn verify(&self) -> Result<usize, AuditError> {
        let Some(reader) = self.open_reader()? else {
            return Ok(0);
        };
        let mut count = 0;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: TraceRecord =
                serde_json::from_str(&line).map_err(|e| AuditError::InvalidRecord {
                    line: idx + 1,
                    reason: e.to_string(),
                })?;
            if let Some(bad) = record
                .ranges()
                .find(|r| !hasher::is_content_hash(&r.content_hash))
            {
                return Err(AuditError::InvalidRecord {
                    line: idx + 1,
                    reason: format!("malformed content hash {:?}", bad.content_hash),
                });
            }
            count += 1;
        }
        Ok(count)
    }

    fn open_reader(&self) -> Result<Option<BufReader<File>>, AuditError> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(BufReader::new(file))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AuditError::OpenFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
