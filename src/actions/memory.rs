// ABOUTME: Volatile memory acquisition and analysis-profile build via remote commands.
// ABOUTME: Both block with a bounded wait and report the produced artifact path on success.

use super::error::ActionError;
use super::{ActionName, ActionOutcome};
use crate::cloud::{CommandError, CommandOps};
use crate::config::ContainConfig;
use crate::types::InstanceId;

/// Dispatch a script to the instance and wait for its terminal result.
///
/// On success the last stdout line is taken as the produced artifact path,
/// by convention the final line of every script here is an `echo` of it.
async fn run_remote(
    command: &dyn CommandOps,
    config: &ContainConfig,
    instance: &InstanceId,
    action: ActionName,
    lines: Vec<String>,
) -> (ActionOutcome, Option<String>) {
    let handle = match command
        .dispatch(instance, &config.command_document, &lines)
        .await
    {
        Ok(handle) => handle,
        Err(e) => return (ActionOutcome::failed(action, e.into()), None),
    };

    let result = match command.await_result(&handle, config.command_timeout).await {
        Ok(result) => result,
        Err(e @ CommandError::Timeout { .. }) => {
            return (
                ActionOutcome::failed_with_detail(action, "timed out", e.into()),
                None,
            );
        }
        Err(e) => return (ActionOutcome::failed(action, e.into()), None),
    };

    if !result.success() {
        let stderr = result.stderr.trim().to_string();
        return (
            ActionOutcome::failed_with_detail(
                action,
                stderr.clone(),
                ActionError::RemoteFailure { stderr },
            ),
            None,
        );
    }

    match result.last_output_line() {
        Some(path) => {
            let path = path.to_string();
            (ActionOutcome::success(action, path.clone()), Some(path))
        }
        None => (
            ActionOutcome::failed_with_detail(
                action,
                "command succeeded but reported no output path",
                ActionError::RemoteFailure {
                    stderr: "empty output".to_string(),
                },
            ),
            None,
        ),
    }
}

/// Acquire a full memory image from the live instance.
///
/// Returns the outcome plus the remote dump path for the upload step.
pub async fn capture_memory(
    command: &dyn CommandOps,
    config: &ContainConfig,
    instance: &InstanceId,
) -> (ActionOutcome, Option<String>) {
    let dump = format!("{}/memory-{instance}.lime", config.forensics_dir);
    let lines = vec![
        format!("mkdir -p {}", config.forensics_dir),
        format!("{} {dump}", config.memory_tool),
        format!("echo {dump}"),
    ];

    run_remote(command, config, instance, ActionName::CaptureMemory, lines).await
}

/// Build a kernel-matching memory analysis profile on the instance.
///
/// The profile has to be compiled against the running kernel, which is why it
/// is built on the target rather than on an analysis host.
pub async fn build_memory_profile(
    command: &dyn CommandOps,
    config: &ContainConfig,
    instance: &InstanceId,
) -> (ActionOutcome, Option<String>) {
    let archive = format!("{}/profile-{instance}.tar.gz", config.forensics_dir);
    let lines = vec![
        format!("mkdir -p {}", config.forensics_dir),
        "yum install -y kernel-devel-$(uname -r) gcc make".to_string(),
        "make -C /opt/volatility/tools/linux".to_string(),
        format!(
            "tar -czf {archive} -C /opt/volatility/tools/linux module.dwarf /boot/System.map-$(uname -r)"
        ),
        format!("echo {archive}"),
    ];

    run_remote(
        command,
        config,
        instance,
        ActionName::BuildMemoryAnalysisProfile,
        lines,
    )
    .await
}
