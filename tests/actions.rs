// ABOUTME: Integration tests for individual remediation actions.
// ABOUTME: Idempotence, read-modify-verify, and fan-out fault isolation.

mod support;

use sequester::actions::{
    ActionErrorKind, ActionStatus, build_memory_profile, capture_memory,
    deregister_from_load_balancers, detach_from_scaling_groups, enable_termination_protection,
    snapshot_attached_volumes, upload_artifacts,
};
use sequester::cloud::LoadBalancingOps;
use sequester::config::ContainConfig;
use sequester::inventory::{Fault, FaultOp};
use support::{CountingCompute, base_inventory, instance_id, store};

// =============================================================================
// Termination Protection
// =============================================================================

/// Test: enabling twice succeeds both times with exactly one mutating call.
#[tokio::test]
async fn termination_protection_is_idempotent() {
    let compute = CountingCompute::new(store(base_inventory()));
    let instance = instance_id();

    let first = enable_termination_protection(&compute, &instance).await;
    assert_eq!(first.status, ActionStatus::Success);

    let second = enable_termination_protection(&compute, &instance).await;
    assert_eq!(second.status, ActionStatus::Success);

    assert_eq!(compute.mutations(), 1, "second invocation must be a read-only no-op");
}

/// Test: a silently no-oping modify call is caught by the confirming read.
#[tokio::test]
async fn termination_protection_verifies_after_modify() {
    let mut inventory = base_inventory();
    inventory.faults.push(Fault {
        op: FaultOp::ModifyProtectionNoop,
        target: None,
    });
    let store = store(inventory);

    let outcome = enable_termination_protection(store.as_ref(), &instance_id()).await;
    assert_eq!(outcome.status, ActionStatus::Failed);
    assert_eq!(
        outcome.error.as_ref().unwrap().kind(),
        ActionErrorKind::Verification
    );
}

// =============================================================================
// Fan-out Actions
// =============================================================================

/// Test: one failing snapshot does not stop the other volume from being
/// attempted; the detail carries one snapshot id and one failure.
#[tokio::test]
async fn snapshot_attempts_every_volume() {
    let mut inventory = base_inventory();
    inventory.faults.push(Fault {
        op: FaultOp::CreateSnapshot,
        target: Some("vol-2".to_string()),
    });
    let store = store(inventory);

    let outcome =
        snapshot_attached_volumes(store.as_ref(), &ContainConfig::default(), &instance_id()).await;

    assert_eq!(outcome.status, ActionStatus::Failed);
    let detail = outcome.detail.as_deref().unwrap();
    assert_eq!(detail.split("; ").count(), 2, "one sub-result per volume");
    assert!(detail.contains("vol-1: snap-"));
    assert!(detail.contains("vol-2: failed"));

    // The healthy volume's snapshot was really created.
    assert_eq!(store.snapshot().snapshots.len(), 1);
}

/// Test: volumes attached to other instances are not snapshotted.
#[tokio::test]
async fn snapshot_filters_by_attachment() {
    let mut inventory = base_inventory();
    inventory.volumes.push(support::volume_record("vol-3", "i-0def456"));
    let store = store(inventory);

    let outcome =
        snapshot_attached_volumes(store.as_ref(), &ContainConfig::default(), &instance_id()).await;

    assert_eq!(outcome.status, ActionStatus::Success);
    let snapshots = store.snapshot().snapshots;
    assert_eq!(snapshots.len(), 2);
    assert!(snapshots.iter().all(|record| record.volume.as_str() != "vol-3"));
}

/// Test: a failing balancer does not stop deregistration from the rest.
#[tokio::test]
async fn deregister_attempts_every_balancer() {
    let mut inventory = base_inventory();
    inventory.faults.push(Fault {
        op: FaultOp::DeregisterInstance,
        target: Some("web-elb".to_string()),
    });
    let store = store(inventory);

    let outcome = deregister_from_load_balancers(store.as_ref(), &instance_id()).await;

    assert_eq!(outcome.status, ActionStatus::Failed);
    let detail = outcome.detail.as_deref().unwrap();
    assert_eq!(detail.split("; ").count(), 2, "one sub-result per balancer");
    assert!(detail.contains("web-elb: failed"));
    assert!(detail.contains("api-elb: deregistered"));

    // The healthy balancer really lost the instance.
    let remaining = store
        .deregister_instance("api-elb", &instance_id())
        .await
        .unwrap();
    assert!(remaining.is_empty());
}

/// Test: detaching succeeds vacuously when the instance is in no group.
#[tokio::test]
async fn detach_with_no_membership_succeeds() {
    let mut inventory = base_inventory();
    inventory.scaling_groups.clear();
    let store = store(inventory);

    let outcome = detach_from_scaling_groups(store.as_ref(), &instance_id()).await;
    assert_eq!(outcome.status, ActionStatus::Success);
}

/// Test: detaching removes the instance from its group.
#[tokio::test]
async fn detach_removes_group_membership() {
    let store = store(base_inventory());

    let outcome = detach_from_scaling_groups(store.as_ref(), &instance_id()).await;
    assert_eq!(outcome.status, ActionStatus::Success);

    let groups = store.snapshot().scaling_groups;
    assert!(groups[0].instances.is_empty());
}

// =============================================================================
// Remote Command Actions
// =============================================================================

/// Test: memory capture reports the dump path and hands it on as an artifact.
#[tokio::test]
async fn capture_memory_reports_dump_path() {
    let store = store(base_inventory());
    let config = ContainConfig::default();

    let (outcome, artifact) = capture_memory(store.as_ref(), &config, &instance_id()).await;

    assert_eq!(outcome.status, ActionStatus::Success);
    let path = artifact.unwrap();
    assert_eq!(path, format!("/forensics/memory-{}.lime", support::INSTANCE));
    assert_eq!(outcome.detail.as_deref(), Some(path.as_str()));
}

/// Test: a command that never completes is a bounded timeout, not a hang.
#[tokio::test]
async fn capture_memory_times_out() {
    let mut inventory = base_inventory();
    inventory.faults.push(Fault {
        op: FaultOp::CommandTimeout,
        target: None,
    });
    let store = store(inventory);

    let (outcome, artifact) =
        capture_memory(store.as_ref(), &ContainConfig::default(), &instance_id()).await;

    assert_eq!(outcome.status, ActionStatus::Failed);
    assert_eq!(outcome.detail.as_deref(), Some("timed out"));
    assert_eq!(outcome.error.as_ref().unwrap().kind(), ActionErrorKind::Timeout);
    assert!(artifact.is_none());
}

/// Test: a failing remote status carries the captured stderr.
#[tokio::test]
async fn profile_build_surfaces_remote_failure() {
    let mut inventory = base_inventory();
    inventory.faults.push(Fault {
        op: FaultOp::CommandFailure,
        target: None,
    });
    let store = store(inventory);

    let (outcome, artifact) =
        build_memory_profile(store.as_ref(), &ContainConfig::default(), &instance_id()).await;

    assert_eq!(outcome.status, ActionStatus::Failed);
    assert_eq!(
        outcome.error.as_ref().unwrap().kind(),
        ActionErrorKind::RemoteFailure
    );
    assert!(artifact.is_none());
}

// =============================================================================
// Artifact Upload
// =============================================================================

/// Test: every artifact gets a destination key under the instance prefix.
#[tokio::test]
async fn upload_keys_artifacts_by_instance() {
    let store = store(base_inventory());
    let config = ContainConfig::default();
    let artifacts = vec![
        "/forensics/memory-i-0abc123.lime".to_string(),
        "/forensics/profile-i-0abc123.tar.gz".to_string(),
    ];

    let outcome = upload_artifacts(
        store.as_ref(),
        store.as_ref(),
        &config,
        &instance_id(),
        &artifacts,
    )
    .await;

    assert_eq!(outcome.status, ActionStatus::Success);
    let detail = outcome.detail.as_deref().unwrap();
    assert_eq!(detail.split("; ").count(), 2);
    assert!(detail.contains("i-0abc123/"));
    assert!(detail.contains("memory-i-0abc123.lime"));
    assert!(detail.contains("profile-i-0abc123.tar.gz"));
}

/// Test: with nothing captured the upload step is skipped, not failed.
#[tokio::test]
async fn upload_skips_when_nothing_captured() {
    let store = store(base_inventory());

    let outcome = upload_artifacts(
        store.as_ref(),
        store.as_ref(),
        &ContainConfig::default(),
        &instance_id(),
        &[],
    )
    .await;

    assert_eq!(outcome.status, ActionStatus::Skipped);
}

/// Test: a presign failure fails the upload but still reports per-artifact detail.
#[tokio::test]
async fn upload_fails_on_presign_fault() {
    let mut inventory = base_inventory();
    inventory.faults.push(Fault {
        op: FaultOp::Presign,
        target: None,
    });
    let store = store(inventory);

    let outcome = upload_artifacts(
        store.as_ref(),
        store.as_ref(),
        &ContainConfig::default(),
        &instance_id(),
        &["/forensics/memory-i-0abc123.lime".to_string()],
    )
    .await;

    assert_eq!(outcome.status, ActionStatus::Failed);
    assert_eq!(outcome.error.as_ref().unwrap().kind(), ActionErrorKind::Partial);
}
