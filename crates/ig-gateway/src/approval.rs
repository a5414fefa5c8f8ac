// approval.rs — Human approval for destructive tool calls.
//
// The gate asks a yes/no question and blocks until it is answered. How the
// question reaches a human (terminal, IDE modal, chat) is up to the
// implementation.

use std::io::{BufRead, BufReader, Read, Write};
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("approval channel closed")]
    ChannelClosed,

    #[error("approval channel error: {0}")]
    Other(String),
}

/// Blocking yes/no decision from a human reviewer.
pub trait ApprovalChannel: Send + Sync {
    /// Present `prompt` and wait for the answer. `Ok(false)` is a veto.
    fn request_approval(&self, prompt: &str) -> Result<bool, ApprovalError>;
}

/// Approval over a line-oriented reader/writer pair.
pub struct TerminalApproval {
    reader: Mutex<BufReader<Box<dyn Read + Send>>>,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl TerminalApproval {
    pub fn new(reader: Box<dyn Read + Send>, writer: Box<dyn Write + Send>) -> Self {
        Self {
            reader: Mutex::new(BufReader::new(reader)),
            writer: Mutex::new(writer),
        }
    }

    /// Prompt on stderr, answer on stdin. Stdout is left to tool output.
    pub fn stdio() -> Self {
        Self::new(Box::new(std::io::stdin()), Box::new(std::io::stderr()))
    }

    /// Only an explicit yes approves.
    fn parse_answer(line: &str) -> bool {
        matches!(
            line.trim().to_lowercase().as_str(),
            "y" | "yes" | "a" | "approve"
        )
    }
}

impl ApprovalChannel for TerminalApproval {
    fn request_approval(&self, prompt: &str) -> Result<bool, ApprovalError> {
        {
            let mut writer = self
                .writer
                .lock()
                .map_err(|e| ApprovalError::Other(format!("writer lock poisoned: {}", e)))?;
            writeln!(writer, "{prompt}")?;
            write!(writer, "[y]es / [n]o: ")?;
            writer.flush()?;
        }

        let mut line = String::new();
        {
            let mut reader = self
                .reader
                .lock()
                .map_err(|e| ApprovalError::Other(format!("reader lock poisoned: {}", e)))?;
            if reader.read_line(&mut line)? == 0 {
                return Err(ApprovalError::ChannelClosed);
            }
        }
        Ok(Self::parse_answer(&line))
    }
}

/// Always answers the same way. For batch runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedApproval(pub bool);

impl FixedApproval {
    pub fn approve() -> Self {
        Self(true)
    }

    pub fn deny() -> Self {
        Self(false)
    }
}

impl ApprovalChannel for FixedApproval {
    fn request_approval(&self, _prompt: &str) -> Result<bool, ApprovalError> {
        Ok(self.0)
    }
}
