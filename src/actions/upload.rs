// ABOUTME: Exfiltrates captured artifacts to durable object storage.
// ABOUTME: Pre-signs a write-scoped URL per artifact and uploads from the instance itself.

use super::error::ActionError;
use super::{ActionName, ActionOutcome};
use crate::cloud::{CommandOps, PresignMethod, StorageOps};
use crate::config::ContainConfig;
use crate::types::InstanceId;
use chrono::Utc;

/// Upload every captured artifact from the instance to the evidence bucket.
///
/// The artifact never transits the engine host: a time-boxed pre-signed URL
/// is generated and the instance pushes its own file. One plan entry covers
/// all artifacts; every artifact is attempted even after a sub-failure.
pub async fn upload_artifacts(
    storage: &dyn StorageOps,
    command: &dyn CommandOps,
    config: &ContainConfig,
    instance: &InstanceId,
    artifacts: &[String],
) -> ActionOutcome {
    let action = ActionName::UploadArtifact;

    if artifacts.is_empty() {
        return ActionOutcome::skipped(action, "no artifacts captured");
    }

    let batch = Utc::now().format("%Y%m%dT%H%M%SZ");
    let attempted = artifacts.len();
    let mut details = Vec::with_capacity(attempted);
    let mut failed = 0;

    for path in artifacts {
        let basename = path.rsplit('/').next().unwrap_or(path.as_str());
        let key = format!("{instance}/{batch}/{basename}");

        match upload_one(storage, command, config, instance, path, &key).await {
            Ok(()) => details.push(key),
            Err(e) => {
                failed += 1;
                details.push(format!("{key}: failed ({e})"));
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

async fn upload_one(
    storage: &dyn StorageOps,
    command: &dyn CommandOps,
    config: &ContainConfig,
    instance: &InstanceId,
    path: &str,
    key: &str,
) -> Result<(), ActionError> {
    let url = storage
        .presigned_url(
            &config.artifact_bucket,
            key,
            PresignMethod::Put,
            config.presign_ttl,
        )
        .await?;

    let lines = vec![format!("curl -sSf -X PUT -T {path} '{url}'")];
    let handle = command
        .dispatch(instance, &config.command_document, &lines)
        .await?;
    let result = command.await_result(&handle, config.command_timeout).await?;

    if result.success() {
        Ok(())
    } else {
        Err(ActionError::RemoteFailure {
            stderr: result.stderr.trim().to_string(),
        })
    }
}
