// ABOUTME: Serializable control-plane snapshot: instances, volumes, groups, balancers.
// ABOUTME: Includes declarative fault injection so drills can rehearse partial failure.

use crate::error::{Error, Result};
use crate::types::{InstanceId, SnapshotId, VolumeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A recorded snapshot of the control plane the engine can run drills against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub region: String,
    pub account: String,
    pub instances: Vec<InstanceRecord>,
    pub volumes: Vec<VolumeRecord>,
    pub scaling_groups: Vec<ScalingGroupRecord>,
    pub load_balancers: Vec<LoadBalancerRecord>,

    /// Snapshots created during a drill, recorded for inspection.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub snapshots: Vec<SnapshotRecord>,

    /// Operations forced to fail during a drill.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub faults: Vec<Fault>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            account: "123456789012".to_string(),
            instances: Vec::new(),
            volumes: Vec::new(),
            scaling_groups: Vec::new(),
            load_balancers: Vec::new(),
            snapshots: Vec::new(),
            faults: Vec::new(),
        }
    }
}

impl Inventory {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::InventoryNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_yaml::to_string(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    pub fn instance(&self, id: &InstanceId) -> Option<&InstanceRecord> {
        self.instances.iter().find(|record| record.id == *id)
    }

    pub fn instance_mut(&mut self, id: &InstanceId) -> Option<&mut InstanceRecord> {
        self.instances.iter_mut().find(|record| record.id == *id)
    }

    /// Whether a fault is declared for this operation, optionally narrowed to
    /// one target resource.
    pub fn has_fault(&self, op: FaultOp, target: &str) -> bool {
        self.faults.iter().any(|fault| {
            fault.op == op && fault.target.as_deref().is_none_or(|t| t == target)
        })
    }

    /// ARN for an instance in this inventory's region and account.
    pub fn instance_arn(&self, id: &InstanceId) -> String {
        format!(
            "arn:aws:ec2:{}:{}:instance/{id}",
            self.region, self.account
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub id: InstanceId,
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default = "default_instance_type")]
    pub instance_type: String,
    #[serde(default = "default_availability_zone")]
    pub availability_zone: String,
    #[serde(default)]
    pub termination_protection: bool,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeRecord {
    pub id: VolumeId,
    #[serde(default = "default_volume_status")]
    pub status: String,
    #[serde(default)]
    pub attachments: Vec<AttachmentRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentRecord {
    pub instance: InstanceId,
    #[serde(default = "default_device")]
    pub device: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingGroupRecord {
    pub name: String,
    #[serde(default)]
    pub instances: Vec<InstanceId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBalancerRecord {
    pub name: String,
    #[serde(default)]
    pub instances: Vec<InstanceId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub id: SnapshotId,
    pub volume: VolumeId,
    pub description: String,
}

/// One injected failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fault {
    pub op: FaultOp,
    /// Resource the fault is scoped to; a missing target hits every call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Operations a fault can be declared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaultOp {
    DescribeInstance,
    ListVolumes,
    CreateSnapshot,
    DescribeMembership,
    DetachInstance,
    ListBalancers,
    DeregisterInstance,
    DispatchCommand,
    /// The dispatched command never reports completion.
    CommandTimeout,
    /// The dispatched command completes with a failing status.
    CommandFailure,
    Presign,
    /// The protection modify call returns cleanly without taking effect.
    ModifyProtectionNoop,
}

fn default_state() -> String {
    "running".to_string()
}

fn default_instance_type() -> String {
    "t3.micro".to_string()
}

fn default_availability_zone() -> String {
    "us-east-1a".to_string()
}

fn default_volume_status() -> String {
    "in-use".to_string()
}

fn default_device() -> String {
    "/dev/xvda".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_round_trip() {
        let raw = "instances:\n  - id: i-0abc123\n";
        let inventory: Inventory = serde_yaml::from_str(raw).unwrap();
        assert_eq!(inventory.region, "us-east-1");

        let record = inventory.instance(&InstanceId::new("i-0abc123")).unwrap();
        assert_eq!(record.state, "running");
        assert!(!record.termination_protection);
    }

    #[test]
    fn fault_targeting() {
        let inventory: Inventory = serde_yaml::from_str(
            "faults:\n  - op: create-snapshot\n    target: vol-2\n  - op: list-balancers\n",
        )
        .unwrap();

        assert!(inventory.has_fault(FaultOp::CreateSnapshot, "vol-2"));
        assert!(!inventory.has_fault(FaultOp::CreateSnapshot, "vol-1"));
        // Untargeted faults hit every call.
        assert!(inventory.has_fault(FaultOp::ListBalancers, "anything"));
    }
}
