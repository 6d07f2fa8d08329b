// ABOUTME: Forensic metadata collection for the target instance.
// ABOUTME: First action in the plan so responders always have a baseline description.

use super::{ActionName, ActionOutcome};
use crate::cloud::ComputeOps;
use crate::types::InstanceId;

/// Fetch the instance's descriptive state and record it verbatim.
pub async fn collect_metadata(compute: &dyn ComputeOps, instance: &InstanceId) -> ActionOutcome {
    match compute.describe_instance(instance).await {
        Ok(description) => {
            let detail = serde_json::to_string(&description)
                .unwrap_or_else(|_| format!("instance {} described", description.id));
            ActionOutcome::success(ActionName::CollectMetadata, detail)
        }
        Err(e) => ActionOutcome::failed(ActionName::CollectMetadata, e.into()),
    }
}
