// ABOUTME: Termination protection with a read-modify-verify cycle.
// ABOUTME: The modify API can silently no-op, so success is only declared after a confirming read.

use super::error::ActionError;
use super::{ActionName, ActionOutcome};
use crate::cloud::ComputeOps;
use crate::types::InstanceId;

/// Enable termination protection, idempotently.
///
/// An instance that already has the flag set is reported Success without a
/// mutating call. Otherwise the flag is set and re-read; a confirming read
/// that still shows the flag off is a failure even though the modify call
/// itself returned cleanly.
pub async fn enable_termination_protection(
    compute: &dyn ComputeOps,
    instance: &InstanceId,
) -> ActionOutcome {
    let action = ActionName::EnableTerminationProtection;

    let enabled = match compute.termination_protection(instance).await {
        Ok(enabled) => enabled,
        Err(e) => return ActionOutcome::failed(action, e.into()),
    };

    if enabled {
        return ActionOutcome::success(action, "termination protection already enabled");
    }

    if let Err(e) = compute.set_termination_protection(instance, true).await {
        return ActionOutcome::failed(action, e.into());
    }

    match compute.termination_protection(instance).await {
        Ok(true) => ActionOutcome::success(action, "termination protection enabled"),
        Ok(false) => ActionOutcome::failed(
            action,
            ActionError::Verification {
                detail: "termination protection still disabled after enable call".to_string(),
            },
        ),
        Err(e) => ActionOutcome::failed(action, e.into()),
    }
}
