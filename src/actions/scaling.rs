// ABOUTME: Detaches the instance from every scaling group containing it.
// ABOUTME: Capacity is decremented on detach so the group does not launch a replacement surge.

use super::error::ActionError;
use super::{ActionName, ActionOutcome};
use crate::cloud::ScalingOps;
use crate::types::InstanceId;

/// Detach the instance from all of its scaling groups.
///
/// Every group is attempted regardless of earlier sub-failures; the action is
/// Success only if every group reported a "Detaching" activity. An instance
/// in no group at all succeeds vacuously.
pub async fn detach_from_scaling_groups(
    scaling: &dyn ScalingOps,
    instance: &InstanceId,
) -> ActionOutcome {
    let action = ActionName::DetachFromScalingGroup;

    let groups = match scaling.group_membership(instance).await {
        Ok(groups) => groups,
        Err(e) => return ActionOutcome::failed(action, e.into()),
    };

    if groups.is_empty() {
        return ActionOutcome::success(action, "instance is not a member of any scaling group");
    }

    let attempted = groups.len();
    let mut details = Vec::with_capacity(attempted);
    let mut failed = 0;

    for group in &groups {
        match scaling.detach_instance(instance, group, true).await {
            Ok(activity) if activity.is_detaching() => {
                details.push(format!("{group}: detaching"));
            }
            Ok(activity) => {
                failed += 1;
                details.push(format!("{group}: unexpected activity ({})", activity.description));
            }
            Err(e) => {
                failed += 1;
                details.push(format!("{group}: failed ({e})"));
            }
        }
    }

    let detail = details.join("; ");
    if failed == 0 {
        ActionOutcome::success(action, detail)
    } else {
        ActionOutcome::failed_with_detail(action, detail, ActionError::Partial { attempted, failed })
    }
}
