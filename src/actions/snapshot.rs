// ABOUTME: Snapshots every in-use volume attached to the target instance.
// ABOUTME: Attachment matching uses the first attachment; these volumes attach to one instance at a time.

use super::error::ActionError;
use super::{ActionName, ActionOutcome};
use crate::cloud::ComputeOps;
use crate::config::ContainConfig;
use crate::types::InstanceId;

fn well_formed_snapshot_id(id: &str) -> bool {
    id.strip_prefix("snap-").is_some_and(|rest| !rest.is_empty())
}

/// Preserve the instance's storage state by snapshotting its volumes.
///
/// The volume list is fetched fresh; every matching volume is attempted even
/// when an earlier snapshot request fails. A snapshot id that does not look
/// like a snapshot id counts as a sub-failure.
pub async fn snapshot_attached_volumes(
    compute: &dyn ComputeOps,
    config: &ContainConfig,
    instance: &InstanceId,
) -> ActionOutcome {
    let action = ActionName::SnapshotAttachedVolumes;

    let volumes = match compute.list_in_use_volumes().await {
        Ok(volumes) => volumes,
        Err(e) => return ActionOutcome::failed(action, e.into()),
    };

    let attached: Vec<_> = volumes
        .iter()
        .filter(|volume| {
            volume
                .attachments
                .first()
                .is_some_and(|attachment| attachment.instance == *instance)
        })
        .collect();

    if attached.is_empty() {
        return ActionOutcome::success(action, "no in-use volumes attached");
    }

    let attempted = attached.len();
    let mut details = Vec::with_capacity(attempted);
    let mut failed = 0;

    for volume in attached {
        match compute
            .create_snapshot(&volume.id, &config.snapshot_description)
            .await
        {
            Ok(snapshot) if well_formed_snapshot_id(snapshot.as_str()) => {
                details.push(format!("{}: {}", volume.id, snapshot));
            }
            Ok(snapshot) => {
                failed += 1;
                details.push(format!("{}: failed (malformed snapshot id {snapshot})", volume.id));
            }
            Err(e) => {
                failed += 1;
                details.push(format!("{}: failed ({e})", volume.id));
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
