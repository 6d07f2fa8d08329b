// ABOUTME: Unified action error with SNAFU pattern.
// ABOUTME: Wraps per-client errors behind one type with a kind for programmatic handling.

use crate::cloud::{CommandError, ComputeError, LoadBalancingError, ScalingError, StorageError};
use snafu::Snafu;

/// Unified failure reason carried by a failed action outcome.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ActionError {
    #[snafu(display("compute call failed: {source}"))]
    Compute { source: ComputeError },

    #[snafu(display("scaling call failed: {source}"))]
    Scaling { source: ScalingError },

    #[snafu(display("load balancer call failed: {source}"))]
    LoadBalancing { source: LoadBalancingError },

    #[snafu(display("remote command failed: {source}"))]
    Command { source: CommandError },

    #[snafu(display("object storage call failed: {source}"))]
    Storage { source: StorageError },

    #[snafu(display("remote command reported failure: {stderr}"))]
    RemoteFailure { stderr: String },

    #[snafu(display("post-change verification failed: {detail}"))]
    Verification { detail: String },

    #[snafu(display("{failed} of {attempted} sub-operations failed"))]
    Partial { attempted: usize, failed: usize },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionErrorKind {
    /// A cloud service rejected or could not complete a call.
    Client,
    /// A remote command did not finish inside the allotted wait.
    Timeout,
    /// A remote command finished with a failing status.
    RemoteFailure,
    /// A mutation did not take effect when re-read.
    Verification,
    /// Some elements of a fan-out failed while the rest succeeded.
    Partial,
}

impl ActionError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ActionErrorKind {
        match self {
            ActionError::Command {
                source: CommandError::Timeout { .. },
            } => ActionErrorKind::Timeout,
            ActionError::Compute { .. }
            | ActionError::Scaling { .. }
            | ActionError::LoadBalancing { .. }
            | ActionError::Command { .. }
            | ActionError::Storage { .. } => ActionErrorKind::Client,
            ActionError::RemoteFailure { .. } => ActionErrorKind::RemoteFailure,
            ActionError::Verification { .. } => ActionErrorKind::Verification,
            ActionError::Partial { .. } => ActionErrorKind::Partial,
        }
    }
}

impl From<ComputeError> for ActionError {
    fn from(source: ComputeError) -> Self {
        ActionError::Compute { source }
    }
}

impl From<ScalingError> for ActionError {
    fn from(source: ScalingError) -> Self {
        ActionError::Scaling { source }
    }
}

impl From<LoadBalancingError> for ActionError {
    fn from(source: LoadBalancingError) -> Self {
        ActionError::LoadBalancing { source }
    }
}

impl From<CommandError> for ActionError {
    fn from(source: CommandError) -> Self {
        ActionError::Command { source }
    }
}

impl From<StorageError> for ActionError {
    fn from(source: StorageError) -> Self {
        ActionError::Storage { source }
    }
}
