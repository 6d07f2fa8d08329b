// ABOUTME: Containment orchestrator walking the action plan in order.
// ABOUTME: Policy decisions only; every client error is already normalized by the actions.

mod plan;
mod report;

pub use plan::{ActionPlan, FailurePolicy, PlanEntry};
pub use report::ContainmentReport;

use crate::actions::{self, ActionName, ActionOutcome, ActionStatus};
use crate::cloud::CloudClients;
use crate::config::ContainConfig;
use crate::types::InstanceId;
use report::ReportBuilder;

/// Runs the remediation plan for one containment invocation.
///
/// Holds no state across invocations; the orchestrator exclusively owns the
/// report while it is being built and never issues a cloud call itself.
pub struct Orchestrator {
    clients: CloudClients,
    config: ContainConfig,
}

impl Orchestrator {
    pub fn new(clients: CloudClients, config: ContainConfig) -> Self {
        Self { clients, config }
    }

    /// Execute the plan strictly in order, one action at a time.
    ///
    /// Later actions depend on earlier ones having taken effect (protection
    /// before snapshot, capture before upload), so there is no fan-out across
    /// the plan. A fatal-policy failure short-circuits: everything not yet
    /// attempted is recorded Skipped.
    pub async fn run(
        &self,
        instance: &InstanceId,
        region: &str,
        plan: &ActionPlan,
    ) -> ContainmentReport {
        let mut builder = ReportBuilder::begin(instance.clone(), region, plan.len());
        let mut artifacts: Vec<String> = Vec::new();
        let mut fatal_failure = false;

        tracing::info!(%instance, region, actions = plan.len(), "starting containment");

        for entry in plan.iter() {
            if fatal_failure {
                builder.record(ActionOutcome::skipped(entry.action, "preceding fatal failure"));
                continue;
            }

            tracing::info!(action = %entry.action, "executing");
            let outcome = self.execute(entry.action, instance, &mut artifacts).await;

            match outcome.status {
                ActionStatus::Success => {
                    tracing::info!(action = %entry.action, "succeeded");
                }
                ActionStatus::Skipped => {
                    tracing::info!(action = %entry.action, "skipped");
                }
                ActionStatus::Failed => {
                    if entry.policy == FailurePolicy::Fatal {
                        tracing::error!(action = %entry.action, "fatal failure, halting plan");
                        fatal_failure = true;
                    } else {
                        tracing::warn!(action = %entry.action, "failed, continuing");
                    }
                }
            }

            builder.record(outcome);
        }

        builder.seal(!fatal_failure)
    }

    async fn execute(
        &self,
        action: ActionName,
        instance: &InstanceId,
        artifacts: &mut Vec<String>,
    ) -> ActionOutcome {
        match action {
            ActionName::CollectMetadata => {
                actions::collect_metadata(self.clients.compute.as_ref(), instance).await
            }
            ActionName::EnableTerminationProtection => {
                actions::enable_termination_protection(self.clients.compute.as_ref(), instance)
                    .await
            }
            ActionName::IsolateNetwork => actions::isolate_network(instance),
            ActionName::DetachFromScalingGroup => {
                actions::detach_from_scaling_groups(self.clients.scaling.as_ref(), instance).await
            }
            ActionName::DeregisterFromLoadBalancer => {
                actions::deregister_from_load_balancers(
                    self.clients.load_balancing.as_ref(),
                    instance,
                )
                .await
            }
            ActionName::SnapshotAttachedVolumes => {
                actions::snapshot_attached_volumes(
                    self.clients.compute.as_ref(),
                    &self.config,
                    instance,
                )
                .await
            }
            ActionName::CaptureMemory => {
                let (outcome, artifact) = actions::capture_memory(
                    self.clients.command.as_ref(),
                    &self.config,
                    instance,
                )
                .await;
                artifacts.extend(artifact);
                outcome
            }
            ActionName::BuildMemoryAnalysisProfile => {
                let (outcome, artifact) = actions::build_memory_profile(
                    self.clients.command.as_ref(),
                    &self.config,
                    instance,
                )
                .await;
                artifacts.extend(artifact);
                outcome
            }
            ActionName::UploadArtifact => {
                actions::upload_artifacts(
                    self.clients.storage.as_ref(),
                    self.clients.command.as_ref(),
                    &self.config,
                    instance,
                    artifacts,
                )
                .await
            }
        }
    }
}
