// ABOUTME: Network isolation placeholder.
// ABOUTME: The security-group quarantine action is not yet available and must not block the plan.

use super::{ActionName, ActionOutcome};
use crate::types::InstanceId;

/// Report the network-isolation step as skipped.
///
/// Swapping the instance onto a quarantine security group is planned but not
/// yet implemented; the pipeline records the gap instead of silently omitting
/// the step.
pub fn isolate_network(instance: &InstanceId) -> ActionOutcome {
    ActionOutcome::skipped(
        ActionName::IsolateNetwork,
        format!("network isolation not yet available for {instance}"),
    )
}
