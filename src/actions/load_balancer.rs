// ABOUTME: Deregisters the instance from every known load balancer.
// ABOUTME: A failure against one balancer never stops the sweep over the rest.

use super::error::ActionError;
use super::{ActionName, ActionOutcome};
use crate::cloud::LoadBalancingOps;
use crate::types::InstanceId;

/// Remove the instance from traffic service on all load balancers.
///
/// Deregistration is verified against the post-call registration list: the
/// sub-result for a balancer is Success only when the instance no longer
/// appears in it.
pub async fn deregister_from_load_balancers(
    load_balancing: &dyn LoadBalancingOps,
    instance: &InstanceId,
) -> ActionOutcome {
    let action = ActionName::DeregisterFromLoadBalancer;

    let balancers = match load_balancing.list_balancers().await {
        Ok(balancers) => balancers,
        Err(e) => return ActionOutcome::failed(action, e.into()),
    };

    if balancers.is_empty() {
        return ActionOutcome::success(action, "no load balancers known");
    }

    let attempted = balancers.len();
    let mut details = Vec::with_capacity(attempted);
    let mut failed = 0;

    for balancer in &balancers {
        match load_balancing.deregister_instance(balancer, instance).await {
            Ok(remaining) if !remaining.contains(instance) => {
                details.push(format!("{balancer}: deregistered"));
            }
            Ok(_) => {
                failed += 1;
                details.push(format!("{balancer}: still registered after deregister call"));
            }
            Err(e) => {
                failed += 1;
                details.push(format!("{balancer}: failed ({e})"));
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
