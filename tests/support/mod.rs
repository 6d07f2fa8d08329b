// ABOUTME: Test support utilities.
// ABOUTME: Inventory builders, synthetic events, and a call-counting compute wrapper.

// Each test binary only uses some of these helpers, so allow dead_code.
#![allow(dead_code)]

use async_trait::async_trait;
use sequester::cloud::{ComputeError, ComputeOps, InstanceDescription, VolumeInfo};
use sequester::event::{TagChangeDetail, TagChangeEvent};
use sequester::inventory::{
    AttachmentRecord, InstanceRecord, Inventory, InventoryStore, LoadBalancerRecord,
    ScalingGroupRecord, VolumeRecord,
};
use sequester::types::{InstanceId, SnapshotId, VolumeId};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const INSTANCE: &str = "i-0abc123";

pub fn instance_id() -> InstanceId {
    InstanceId::new(INSTANCE)
}

/// One running instance with two attached volumes, one scaling group, and
/// two load balancers.
pub fn base_inventory() -> Inventory {
    let mut inventory = Inventory::default();
    inventory.instances.push(instance_record(INSTANCE));
    inventory.volumes.push(volume_record("vol-1", INSTANCE));
    inventory.volumes.push(volume_record("vol-2", INSTANCE));
    inventory.scaling_groups.push(ScalingGroupRecord {
        name: "web-asg".to_string(),
        instances: vec![InstanceId::new(INSTANCE)],
    });
    inventory.load_balancers.push(LoadBalancerRecord {
        name: "web-elb".to_string(),
        instances: vec![InstanceId::new(INSTANCE), InstanceId::new("i-0def456")],
    });
    inventory.load_balancers.push(LoadBalancerRecord {
        name: "api-elb".to_string(),
        instances: vec![InstanceId::new(INSTANCE)],
    });
    inventory
}

pub fn instance_record(id: &str) -> InstanceRecord {
    InstanceRecord {
        id: InstanceId::new(id),
        state: "running".to_string(),
        instance_type: "t3.micro".to_string(),
        availability_zone: "us-east-1a".to_string(),
        termination_protection: false,
        tags: HashMap::new(),
    }
}

pub fn volume_record(id: &str, instance: &str) -> VolumeRecord {
    VolumeRecord {
        id: VolumeId::new(id),
        status: "in-use".to_string(),
        attachments: vec![AttachmentRecord {
            instance: InstanceId::new(instance),
            device: "/dev/xvda".to_string(),
        }],
    }
}

pub fn store(inventory: Inventory) -> Arc<InventoryStore> {
    Arc::new(InventoryStore::new(inventory))
}

/// A tag-change event with the given shape.
pub fn event(
    service: &str,
    resource_type: &str,
    changed: &[&str],
    tags: &[(&str, &str)],
) -> TagChangeEvent {
    TagChangeEvent {
        region: "us-east-1".to_string(),
        resources: vec![format!(
            "arn:aws:ec2:us-east-1:123456789012:instance/{INSTANCE}"
        )],
        detail: TagChangeDetail {
            service: service.to_string(),
            resource_type: resource_type.to_string(),
            changed_tag_keys: changed.iter().map(|s| s.to_string()).collect(),
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        },
    }
}

/// Compute wrapper counting mutating protection calls, for idempotence tests.
pub struct CountingCompute {
    inner: Arc<InventoryStore>,
    pub set_protection_calls: AtomicUsize,
}

impl CountingCompute {
    pub fn new(inner: Arc<InventoryStore>) -> Self {
        Self {
            inner,
            set_protection_calls: AtomicUsize::new(0),
        }
    }

    pub fn mutations(&self) -> usize {
        self.set_protection_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ComputeOps for CountingCompute {
    async fn describe_instance(
        &self,
        id: &InstanceId,
    ) -> Result<InstanceDescription, ComputeError> {
        self.inner.describe_instance(id).await
    }

    async fn list_instances(&self) -> Result<Vec<InstanceDescription>, ComputeError> {
        self.inner.list_instances().await
    }

    async fn termination_protection(&self, id: &InstanceId) -> Result<bool, ComputeError> {
        self.inner.termination_protection(id).await
    }

    async fn set_termination_protection(
        &self,
        id: &InstanceId,
        enabled: bool,
    ) -> Result<(), ComputeError> {
        self.set_protection_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.set_termination_protection(id, enabled).await
    }

    async fn list_in_use_volumes(&self) -> Result<Vec<VolumeInfo>, ComputeError> {
        self.inner.list_in_use_volumes().await
    }

    async fn create_snapshot(
        &self,
        volume: &VolumeId,
        description: &str,
    ) -> Result<SnapshotId, ComputeError> {
        self.inner.create_snapshot(volume, description).await
    }

    async fn create_tags(
        &self,
        id: &InstanceId,
        tags: &HashMap<String, String>,
    ) -> Result<(), ComputeError> {
        self.inner.create_tags(id, tags).await
    }

    async fn delete_tags(&self, id: &InstanceId, keys: &[String]) -> Result<(), ComputeError> {
        self.inner.delete_tags(id, keys).await
    }
}
