// executor.rs — The collaborator that actually performs a tool's effect.
//
// The gate never executes tools itself. Once a call has cleared every
// check it is handed, with its arguments untouched, to a ToolExecutor.

use ig_policy::ToolInvocation;

#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("tool {tool} failed: {message}")]
    Failed { tool: String, message: String },
}

/// Performs the real-world effect of a tool call and returns its result
/// text for the agent.
pub trait ToolExecutor {
    fn execute(&self, invocation: &ToolInvocation) -> Result<String, ExecutorError>;
}

impl<F> ToolExecutor for F
where
    F: Fn(&ToolInvocation) -> Result<String, ExecutorError>,
{
    fn execute(&self, invocation: &ToolInvocation) -> Result<String, ExecutorError> {
        self(invocation)
    }
}
