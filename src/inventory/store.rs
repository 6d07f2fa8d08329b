// ABOUTME: In-memory control-plane backend implementing every cloud capability trait.
// ABOUTME: Backs containment drills and the test suite; honors declared faults.

use super::model::{FaultOp, Inventory, SnapshotRecord};
use crate::cloud::{
    CloudClients, CommandError, CommandHandle, CommandOps, CommandStatus, ComputeError,
    ComputeOps, InstanceDescription, LoadBalancingError, LoadBalancingOps, PresignMethod,
    RemoteCommandResult, ScalingActivity, ScalingError, ScalingOps, StorageError, StorageOps,
    VolumeAttachment, VolumeInfo,
};
use crate::error::Result;
use crate::types::{CommandId, InstanceId, SnapshotId, VolumeId};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// A dispatched command awaiting pickup by `await_result`.
#[derive(Debug, Clone)]
struct DispatchedCommand {
    instance: InstanceId,
    lines: Vec<String>,
}

/// Control-plane backend over a recorded inventory snapshot.
///
/// Commands resolve immediately: their stdout is the operand of the final
/// `echo` line of the dispatched script, which is how artifact paths flow
/// end-to-end in a drill without a live instance.
pub struct InventoryStore {
    state: Mutex<Inventory>,
    commands: Mutex<HashMap<String, DispatchedCommand>>,
    snapshot_seq: Mutex<u64>,
    command_seq: Mutex<u64>,
}

impl InventoryStore {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            state: Mutex::new(inventory),
            commands: Mutex::new(HashMap::new()),
            snapshot_seq: Mutex::new(0),
            command_seq: Mutex::new(0),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(Inventory::load(path)?))
    }

    /// Clone of the current (possibly mutated) inventory state.
    pub fn snapshot(&self) -> Inventory {
        self.state.lock().clone()
    }

    /// Capability bundle backed by this store.
    pub fn clients(self: &Arc<Self>) -> CloudClients {
        CloudClients {
            compute: Arc::clone(self) as Arc<dyn ComputeOps>,
            scaling: Arc::clone(self) as Arc<dyn ScalingOps>,
            load_balancing: Arc::clone(self) as Arc<dyn LoadBalancingOps>,
            command: Arc::clone(self) as Arc<dyn CommandOps>,
            storage: Arc::clone(self) as Arc<dyn StorageOps>,
        }
    }

    fn describe(record: &super::model::InstanceRecord) -> InstanceDescription {
        InstanceDescription {
            id: record.id.clone(),
            state: record.state.clone(),
            instance_type: record.instance_type.clone(),
            availability_zone: record.availability_zone.clone(),
            tags: record.tags.clone(),
        }
    }

    fn next_snapshot_id(&self) -> SnapshotId {
        let mut seq = self.snapshot_seq.lock();
        *seq += 1;
        SnapshotId::new(format!("snap-{:017x}", *seq))
    }

    fn next_command_id(&self) -> CommandId {
        let mut seq = self.command_seq.lock();
        *seq += 1;
        CommandId::new(format!("cmd-{:06}", *seq))
    }
}

#[async_trait]
impl ComputeOps for InventoryStore {
    async fn describe_instance(
        &self,
        id: &InstanceId,
    ) -> std::result::Result<InstanceDescription, ComputeError> {
        let state = self.state.lock();
        if state.has_fault(FaultOp::DescribeInstance, id.as_str()) {
            return Err(ComputeError::Service("injected fault: describe-instance".into()));
        }
        state
            .instance(id)
            .map(Self::describe)
            .ok_or_else(|| ComputeError::InstanceNotFound(id.to_string()))
    }

    async fn list_instances(&self) -> std::result::Result<Vec<InstanceDescription>, ComputeError> {
        let state = self.state.lock();
        Ok(state.instances.iter().map(Self::describe).collect())
    }

    async fn termination_protection(
        &self,
        id: &InstanceId,
    ) -> std::result::Result<bool, ComputeError> {
        let state = self.state.lock();
        state
            .instance(id)
            .map(|record| record.termination_protection)
            .ok_or_else(|| ComputeError::InstanceNotFound(id.to_string()))
    }

    async fn set_termination_protection(
        &self,
        id: &InstanceId,
        enabled: bool,
    ) -> std::result::Result<(), ComputeError> {
        let mut state = self.state.lock();
        if state.has_fault(FaultOp::ModifyProtectionNoop, id.as_str()) {
            // The call "succeeds" without taking effect, like the real API can.
            return Ok(());
        }
        let record = state
            .instance_mut(id)
            .ok_or_else(|| ComputeError::InstanceNotFound(id.to_string()))?;
        record.termination_protection = enabled;
        Ok(())
    }

    async fn list_in_use_volumes(&self) -> std::result::Result<Vec<VolumeInfo>, ComputeError> {
        let state = self.state.lock();
        if state.has_fault(FaultOp::ListVolumes, "") {
            return Err(ComputeError::Service("injected fault: list-volumes".into()));
        }
        Ok(state
            .volumes
            .iter()
            .filter(|volume| volume.status == "in-use")
            .map(|volume| VolumeInfo {
                id: volume.id.clone(),
                status: volume.status.clone(),
                attachments: volume
                    .attachments
                    .iter()
                    .map(|attachment| VolumeAttachment {
                        instance: attachment.instance.clone(),
                        device: attachment.device.clone(),
                    })
                    .collect(),
            })
            .collect())
    }

    async fn create_snapshot(
        &self,
        volume: &VolumeId,
        description: &str,
    ) -> std::result::Result<SnapshotId, ComputeError> {
        let mut state = self.state.lock();
        if state.has_fault(FaultOp::CreateSnapshot, volume.as_str()) {
            return Err(ComputeError::Service("injected fault: create-snapshot".into()));
        }
        if !state.volumes.iter().any(|record| record.id == *volume) {
            return Err(ComputeError::VolumeNotFound(volume.to_string()));
        }
        let id = self.next_snapshot_id();
        state.snapshots.push(SnapshotRecord {
            id: id.clone(),
            volume: volume.clone(),
            description: description.to_string(),
        });
        Ok(id)
    }

    async fn create_tags(
        &self,
        id: &InstanceId,
        tags: &HashMap<String, String>,
    ) -> std::result::Result<(), ComputeError> {
        let mut state = self.state.lock();
        let record = state
            .instance_mut(id)
            .ok_or_else(|| ComputeError::InstanceNotFound(id.to_string()))?;
        record
            .tags
            .extend(tags.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    async fn delete_tags(
        &self,
        id: &InstanceId,
        keys: &[String],
    ) -> std::result::Result<(), ComputeError> {
        let mut state = self.state.lock();
        let record = state
            .instance_mut(id)
            .ok_or_else(|| ComputeError::InstanceNotFound(id.to_string()))?;
        for key in keys {
            record.tags.remove(key);
        }
        Ok(())
    }
}

#[async_trait]
impl ScalingOps for InventoryStore {
    async fn group_membership(
        &self,
        instance: &InstanceId,
    ) -> std::result::Result<Vec<String>, ScalingError> {
        let state = self.state.lock();
        if state.has_fault(FaultOp::DescribeMembership, instance.as_str()) {
            return Err(ScalingError::Service("injected fault: describe-membership".into()));
        }
        Ok(state
            .scaling_groups
            .iter()
            .filter(|group| group.instances.contains(instance))
            .map(|group| group.name.clone())
            .collect())
    }

    async fn detach_instance(
        &self,
        instance: &InstanceId,
        group: &str,
        _decrement_capacity: bool,
    ) -> std::result::Result<ScalingActivity, ScalingError> {
        let mut state = self.state.lock();
        if state.has_fault(FaultOp::DetachInstance, group) {
            return Err(ScalingError::Service("injected fault: detach-instance".into()));
        }
        let record = state
            .scaling_groups
            .iter_mut()
            .find(|record| record.name == group)
            .ok_or_else(|| ScalingError::GroupNotFound(group.to_string()))?;

        let before = record.instances.len();
        record.instances.retain(|member| member != instance);
        if record.instances.len() == before {
            return Err(ScalingError::NotAMember {
                instance: instance.to_string(),
                group: group.to_string(),
            });
        }

        Ok(ScalingActivity {
            description: format!("Detaching EC2 instance: {instance}"),
        })
    }
}

#[async_trait]
impl LoadBalancingOps for InventoryStore {
    async fn list_balancers(&self) -> std::result::Result<Vec<String>, LoadBalancingError> {
        let state = self.state.lock();
        if state.has_fault(FaultOp::ListBalancers, "") {
            return Err(LoadBalancingError::Service("injected fault: list-balancers".into()));
        }
        Ok(state
            .load_balancers
            .iter()
            .map(|balancer| balancer.name.clone())
            .collect())
    }

    async fn deregister_instance(
        &self,
        balancer: &str,
        instance: &InstanceId,
    ) -> std::result::Result<Vec<InstanceId>, LoadBalancingError> {
        let mut state = self.state.lock();
        if state.has_fault(FaultOp::DeregisterInstance, balancer) {
            return Err(LoadBalancingError::Service("injected fault: deregister-instance".into()));
        }
        let record = state
            .load_balancers
            .iter_mut()
            .find(|record| record.name == balancer)
            .ok_or_else(|| LoadBalancingError::BalancerNotFound(balancer.to_string()))?;
        record.instances.retain(|member| member != instance);
        Ok(record.instances.clone())
    }
}

#[async_trait]
impl CommandOps for InventoryStore {
    async fn dispatch(
        &self,
        instance: &InstanceId,
        _document: &str,
        lines: &[String],
    ) -> std::result::Result<CommandHandle, CommandError> {
        {
            let state = self.state.lock();
            if state.has_fault(FaultOp::DispatchCommand, instance.as_str()) {
                return Err(CommandError::DispatchRejected {
                    instance: instance.to_string(),
                    reason: "injected fault: dispatch-command".to_string(),
                });
            }
            if state.instance(instance).is_none() {
                return Err(CommandError::DispatchRejected {
                    instance: instance.to_string(),
                    reason: "unknown instance".to_string(),
                });
            }
        }

        let id = self.next_command_id();
        self.commands.lock().insert(
            id.to_string(),
            DispatchedCommand {
                instance: instance.clone(),
                lines: lines.to_vec(),
            },
        );
        Ok(CommandHandle {
            command: id,
            instance: instance.clone(),
        })
    }

    async fn await_result(
        &self,
        handle: &CommandHandle,
        timeout: Duration,
    ) -> std::result::Result<RemoteCommandResult, CommandError> {
        let command = self
            .commands
            .lock()
            .remove(handle.command.as_str())
            .ok_or_else(|| {
                CommandError::Service(format!("unknown command: {}", handle.command))
            })?;

        let state = self.state.lock();
        if state.has_fault(FaultOp::CommandTimeout, command.instance.as_str()) {
            return Err(CommandError::Timeout {
                command: handle.command.to_string(),
                timeout,
            });
        }
        if state.has_fault(FaultOp::CommandFailure, command.instance.as_str()) {
            return Ok(RemoteCommandResult {
                command: handle.command.clone(),
                instance: command.instance,
                status: CommandStatus::Failed,
                stdout: String::new(),
                stderr: "injected remote failure".to_string(),
            });
        }

        // Scripts report their artifact path as a final `echo` line.
        let stdout = command
            .lines
            .iter()
            .rev()
            .find_map(|line| line.strip_prefix("echo "))
            .map(|operand| format!("{operand}\n"))
            .unwrap_or_default();

        Ok(RemoteCommandResult {
            command: handle.command.clone(),
            instance: command.instance,
            status: CommandStatus::Success,
            stdout,
            stderr: String::new(),
        })
    }
}

#[async_trait]
impl StorageOps for InventoryStore {
    async fn presigned_url(
        &self,
        bucket: &str,
        key: &str,
        method: PresignMethod,
        ttl: Duration,
    ) -> std::result::Result<String, StorageError> {
        let state = self.state.lock();
        if state.has_fault(FaultOp::Presign, bucket) {
            return Err(StorageError::Service("injected fault: presign".into()));
        }
        Ok(format!(
            "https://{bucket}.s3.{}.amazonaws.com/{}?X-Amz-Expires={}&X-Amz-SignedHeaders=host&X-Amz-Method={}&X-Amz-Signature=unsigned-drill",
            state.region,
            urlencoding::encode(key),
            ttl.as_secs(),
            method.as_str(),
        ))
    }
}
