// ABOUTME: Core domain types shared across the containment engine.
// ABOUTME: Type-safe identifiers for cloud resources.

mod id;

pub use id::{CommandId, Id, InstanceId, SnapshotId, VolumeId};
