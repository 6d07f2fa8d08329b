// ABOUTME: Load-balancer operations trait.
// ABOUTME: Balancer enumeration and instance deregistration.

use crate::types::InstanceId;
use async_trait::async_trait;

/// Load-balancing operations the engine depends on.
#[async_trait]
pub trait LoadBalancingOps: Send + Sync {
    /// Names of every known load balancer.
    async fn list_balancers(&self) -> Result<Vec<String>, LoadBalancingError>;

    /// Deregister the instance from one balancer, returning the instances
    /// still registered after the call.
    async fn deregister_instance(
        &self,
        balancer: &str,
        instance: &InstanceId,
    ) -> Result<Vec<InstanceId>, LoadBalancingError>;
}

/// Errors from load-balancing operations.
#[derive(Debug, thiserror::Error)]
pub enum LoadBalancingError {
    #[error("load balancer not found: {0}")]
    BalancerNotFound(String),

    #[error("load balancing service error: {0}")]
    Service(String),
}
