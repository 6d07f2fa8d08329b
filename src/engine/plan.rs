// ABOUTME: Ordered action plan with per-action failure policy.
// ABOUTME: The default plan encodes the containment order; only termination protection is fatal.

use crate::actions::ActionName;
use nonempty::{NonEmpty, nonempty};
use serde::Serialize;

/// Whether an action's failure halts the remainder of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    Fatal,
    NonFatal,
}

/// One planned action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub action: ActionName,
    pub policy: FailurePolicy,
}

impl PlanEntry {
    pub fn fatal(action: ActionName) -> Self {
        Self {
            action,
            policy: FailurePolicy::Fatal,
        }
    }

    pub fn non_fatal(action: ActionName) -> Self {
        Self {
            action,
            policy: FailurePolicy::NonFatal,
        }
    }
}

/// An ordered, non-empty sequence of remediation actions.
#[derive(Debug, Clone, Serialize)]
pub struct ActionPlan(NonEmpty<PlanEntry>);

impl ActionPlan {
    pub fn new(entries: NonEmpty<PlanEntry>) -> Self {
        Self(entries)
    }

    /// The full containment order.
    ///
    /// Termination protection is the one fatal step: an instance that can
    /// still be terminated can lose every piece of evidence the later steps
    /// exist to preserve. Everything else collects what it can.
    pub fn default_plan() -> Self {
        Self(nonempty![
            PlanEntry::non_fatal(ActionName::CollectMetadata),
            PlanEntry::fatal(ActionName::EnableTerminationProtection),
            PlanEntry::non_fatal(ActionName::IsolateNetwork),
            PlanEntry::non_fatal(ActionName::DetachFromScalingGroup),
            PlanEntry::non_fatal(ActionName::DeregisterFromLoadBalancer),
            PlanEntry::non_fatal(ActionName::SnapshotAttachedVolumes),
            PlanEntry::non_fatal(ActionName::CaptureMemory),
            PlanEntry::non_fatal(ActionName::BuildMemoryAnalysisProfile),
            PlanEntry::non_fatal(ActionName::UploadArtifact),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for ActionPlan {
    fn default() -> Self {
        Self::default_plan()
    }
}
