// ABOUTME: Remote command-execution operations trait.
// ABOUTME: Dispatches shell commands to an instance and awaits completion with a bound.

use crate::types::{CommandId, InstanceId};
use async_trait::async_trait;
use std::time::Duration;

/// Remote command-execution operations the engine depends on.
#[async_trait]
pub trait CommandOps: Send + Sync {
    /// Dispatch a command document to the instance. Returns immediately with
    /// a handle; the command runs asynchronously on the target.
    async fn dispatch(
        &self,
        instance: &InstanceId,
        document: &str,
        lines: &[String],
    ) -> Result<CommandHandle, CommandError>;

    /// Wait for a dispatched command to reach a terminal state.
    ///
    /// Implementations must respect `timeout` as an upper bound and return
    /// `CommandError::Timeout` when it elapses; a command that never reports
    /// completion must not hang the caller.
    async fn await_result(
        &self,
        handle: &CommandHandle,
        timeout: Duration,
    ) -> Result<RemoteCommandResult, CommandError>;
}

/// Handle to a dispatched command.
#[derive(Debug, Clone)]
pub struct CommandHandle {
    pub command: CommandId,
    pub instance: InstanceId,
}

/// Terminal status of a remote command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failed,
}

/// Result of a completed remote command.
#[derive(Debug, Clone)]
pub struct RemoteCommandResult {
    pub command: CommandId,
    pub instance: InstanceId,
    pub status: CommandStatus,
    pub stdout: String,
    pub stderr: String,
}

impl RemoteCommandResult {
    pub fn success(&self) -> bool {
        self.status == CommandStatus::Success
    }

    /// Last non-empty stdout line, the conventional slot for a reported
    /// artifact path.
    pub fn last_output_line(&self) -> Option<&str> {
        self.stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
    }
}

/// Errors from remote command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("command dispatch rejected for {instance}: {reason}")]
    DispatchRejected { instance: String, reason: String },

    #[error("command {command} timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error("command execution service error: {0}")]
    Service(String),
}
