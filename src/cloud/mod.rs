// ABOUTME: Cloud capability traits the containment engine is built against.
// ABOUTME: One trait per service boundary, plus the injection bundle handed to the orchestrator.

mod command;
mod compute;
mod load_balancing;
mod scaling;
mod storage;

pub use command::{
    CommandError, CommandHandle, CommandOps, CommandStatus, RemoteCommandResult,
};
pub use compute::{ComputeError, ComputeOps, InstanceDescription, VolumeAttachment, VolumeInfo};
pub use load_balancing::{LoadBalancingError, LoadBalancingOps};
pub use scaling::{ScalingActivity, ScalingError, ScalingOps};
pub use storage::{PresignMethod, StorageError, StorageOps};

use std::sync::Arc;

/// The capability bundle handed to the orchestrator at construction time.
///
/// Actions receive only the capabilities they need; nothing in the engine
/// constructs a client on its own.
#[derive(Clone)]
pub struct CloudClients {
    pub compute: Arc<dyn ComputeOps>,
    pub scaling: Arc<dyn ScalingOps>,
    pub load_balancing: Arc<dyn LoadBalancingOps>,
    pub command: Arc<dyn CommandOps>,
    pub storage: Arc<dyn StorageOps>,
}
