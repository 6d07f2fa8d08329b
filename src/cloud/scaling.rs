// ABOUTME: Autoscaling operations trait.
// ABOUTME: Group membership lookup and instance detachment.

use crate::types::InstanceId;
use async_trait::async_trait;

/// Autoscaling operations the engine depends on.
#[async_trait]
pub trait ScalingOps: Send + Sync {
    /// Names of every scaling group currently containing the instance.
    async fn group_membership(&self, instance: &InstanceId) -> Result<Vec<String>, ScalingError>;

    /// Detach the instance from one group, optionally decrementing the
    /// group's desired capacity so it is not immediately replaced into
    /// traffic.
    async fn detach_instance(
        &self,
        instance: &InstanceId,
        group: &str,
        decrement_capacity: bool,
    ) -> Result<ScalingActivity, ScalingError>;
}

/// The scaling activity started by a detach request.
#[derive(Debug, Clone)]
pub struct ScalingActivity {
    /// Activity description as reported by the service,
    /// e.g. "Detaching EC2 instance: i-0abc123".
    pub description: String,
}

impl ScalingActivity {
    /// Whether the group actually transitioned to detaching the instance.
    pub fn is_detaching(&self) -> bool {
        self.description.starts_with("Detaching")
    }
}

/// Errors from autoscaling operations.
#[derive(Debug, thiserror::Error)]
pub enum ScalingError {
    #[error("scaling group not found: {0}")]
    GroupNotFound(String),

    #[error("instance {instance} is not a member of group {group}")]
    NotAMember { instance: String, group: String },

    #[error("scaling service error: {0}")]
    Service(String),
}
