// ABOUTME: Consolidated containment report returned to the caller.
// ABOUTME: One outcome per planned action, in plan order, immutable once sealed.

use crate::actions::{ActionOutcome, ActionStatus};
use crate::types::InstanceId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The consolidated result of one containment invocation.
///
/// A report with `completed == false` is still a full report: partial
/// containment is actionable information for the responder, never discarded.
#[derive(Debug, Serialize)]
pub struct ContainmentReport {
    pub instance: InstanceId,
    pub region: String,
    pub engine_host: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// True only if every fatal-policy action succeeded.
    pub completed: bool,
    pub outcomes: Vec<ActionOutcome>,
}

impl ContainmentReport {
    /// Outcomes with the given status.
    pub fn with_status(&self, status: ActionStatus) -> impl Iterator<Item = &ActionOutcome> {
        self.outcomes
            .iter()
            .filter(move |outcome| outcome.status == status)
    }

    pub fn failed_count(&self) -> usize {
        self.with_status(ActionStatus::Failed).count()
    }
}

/// Accumulates outcomes while the orchestrator walks the plan.
#[derive(Debug)]
pub(crate) struct ReportBuilder {
    instance: InstanceId,
    region: String,
    started_at: DateTime<Utc>,
    outcomes: Vec<ActionOutcome>,
}

impl ReportBuilder {
    pub fn begin(instance: InstanceId, region: impl Into<String>, capacity: usize) -> Self {
        Self {
            instance,
            region: region.into(),
            started_at: Utc::now(),
            outcomes: Vec::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, outcome: ActionOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn seal(self, completed: bool) -> ContainmentReport {
        ContainmentReport {
            instance: self.instance,
            region: self.region,
            engine_host: gethostname::gethostname().to_string_lossy().into_owned(),
            started_at: self.started_at,
            finished_at: Utc::now(),
            completed,
            outcomes: self.outcomes,
        }
    }
}
