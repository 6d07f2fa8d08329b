// ABOUTME: Compute control-plane operations trait.
// ABOUTME: Instance description, termination protection, volumes, snapshots, and tags.

use crate::types::{InstanceId, SnapshotId, VolumeId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Compute control-plane operations the engine depends on.
#[async_trait]
pub trait ComputeOps: Send + Sync {
    /// Fetch descriptive state for a single instance.
    async fn describe_instance(
        &self,
        id: &InstanceId,
    ) -> Result<InstanceDescription, ComputeError>;

    /// List all instances visible to the caller.
    async fn list_instances(&self) -> Result<Vec<InstanceDescription>, ComputeError>;

    /// Read the termination-protection flag.
    async fn termination_protection(&self, id: &InstanceId) -> Result<bool, ComputeError>;

    /// Set the termination-protection flag.
    ///
    /// The underlying API can silently no-op; callers that need certainty
    /// must re-read the flag afterwards.
    async fn set_termination_protection(
        &self,
        id: &InstanceId,
        enabled: bool,
    ) -> Result<(), ComputeError>;

    /// List every volume currently in use in the region.
    async fn list_in_use_volumes(&self) -> Result<Vec<VolumeInfo>, ComputeError>;

    /// Request a snapshot of a volume.
    async fn create_snapshot(
        &self,
        volume: &VolumeId,
        description: &str,
    ) -> Result<SnapshotId, ComputeError>;

    /// Add or overwrite tags on an instance.
    async fn create_tags(
        &self,
        id: &InstanceId,
        tags: &HashMap<String, String>,
    ) -> Result<(), ComputeError>;

    /// Remove tags from an instance by key.
    async fn delete_tags(&self, id: &InstanceId, keys: &[String]) -> Result<(), ComputeError>;
}

/// Descriptive state of one instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceDescription {
    pub id: InstanceId,
    pub state: String,
    pub instance_type: String,
    pub availability_zone: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// An in-use volume and where it is attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeInfo {
    pub id: VolumeId,
    pub status: String,
    #[serde(default)]
    pub attachments: Vec<VolumeAttachment>,
}

/// One attachment of a volume to an instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeAttachment {
    pub instance: InstanceId,
    pub device: String,
}

/// Errors from compute control-plane operations.
#[derive(Debug, thiserror::Error)]
pub enum ComputeError {
    #[error("instance not found: {0}")]
    InstanceNotFound(String),

    #[error("volume not found: {0}")]
    VolumeNotFound(String),

    #[error("compute service error: {0}")]
    Service(String),
}
