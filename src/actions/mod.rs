// ABOUTME: Remediation action catalog with normalized outcomes.
// ABOUTME: One canonical implementation per action; no client error escapes an action.

mod error;
mod isolation;
mod load_balancer;
mod memory;
mod metadata;
mod protection;
mod scaling;
mod snapshot;
mod upload;

pub use error::{ActionError, ActionErrorKind};
pub use isolation::isolate_network;
pub use load_balancer::deregister_from_load_balancers;
pub use memory::{build_memory_profile, capture_memory};
pub use metadata::collect_metadata;
pub use protection::enable_termination_protection;
pub use scaling::detach_from_scaling_groups;
pub use snapshot::snapshot_attached_volumes;
pub use upload::upload_artifacts;

use serde::{Serialize, Serializer};
use std::fmt;

/// Names of the remediation actions in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionName {
    CollectMetadata,
    EnableTerminationProtection,
    IsolateNetwork,
    DetachFromScalingGroup,
    DeregisterFromLoadBalancer,
    SnapshotAttachedVolumes,
    CaptureMemory,
    BuildMemoryAnalysisProfile,
    UploadArtifact,
}

impl ActionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionName::CollectMetadata => "collect-metadata",
            ActionName::EnableTerminationProtection => "enable-termination-protection",
            ActionName::IsolateNetwork => "isolate-network",
            ActionName::DetachFromScalingGroup => "detach-from-scaling-group",
            ActionName::DeregisterFromLoadBalancer => "deregister-from-load-balancer",
            ActionName::SnapshotAttachedVolumes => "snapshot-attached-volumes",
            ActionName::CaptureMemory => "capture-memory",
            ActionName::BuildMemoryAnalysisProfile => "build-memory-analysis-profile",
            ActionName::UploadArtifact => "upload-artifact",
        }
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal status of one attempted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Success,
    Failed,
    Skipped,
}

/// Normalized record of one remediation action, never mutated after creation.
#[derive(Debug, Serialize)]
pub struct ActionOutcome {
    pub action: ActionName,
    pub status: ActionStatus,

    /// Free-form diagnostic or artifact reference (snapshot id, storage key).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "display_error")]
    pub error: Option<ActionError>,
}

fn display_error<S: Serializer>(
    error: &Option<ActionError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.serialize_str(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

impl ActionOutcome {
    pub fn success(action: ActionName, detail: impl Into<String>) -> Self {
        Self {
            action,
            status: ActionStatus::Success,
            detail: Some(detail.into()),
            error: None,
        }
    }

    pub fn failed(action: ActionName, error: ActionError) -> Self {
        Self {
            action,
            status: ActionStatus::Failed,
            detail: None,
            error: Some(error),
        }
    }

    pub fn failed_with_detail(
        action: ActionName,
        detail: impl Into<String>,
        error: ActionError,
    ) -> Self {
        Self {
            action,
            status: ActionStatus::Failed,
            detail: Some(detail.into()),
            error: Some(error),
        }
    }

    pub fn skipped(action: ActionName, detail: impl Into<String>) -> Self {
        Self {
            action,
            status: ActionStatus::Skipped,
            detail: Some(detail.into()),
            error: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == ActionStatus::Success
    }
}
