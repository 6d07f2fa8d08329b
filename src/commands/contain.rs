// ABOUTME: Contain command implementation.
// ABOUTME: Gates the event, runs the orchestrator against an inventory snapshot, renders the report.

use sequester::config::ContainConfig;
use sequester::engine::{ActionPlan, Orchestrator};
use sequester::error::Result;
use sequester::event::TagChangeEvent;
use sequester::gate::{self, ActivationDecision};
use sequester::inventory::InventoryStore;
use sequester::output::{Output, OutputMode};
use std::path::PathBuf;
use std::sync::Arc;

/// Run the containment pipeline for one tag-change event.
pub async fn contain(
    event_path: PathBuf,
    inventory_path: PathBuf,
    config_path: Option<PathBuf>,
    plan_only: bool,
    output: Output,
) -> Result<()> {
    let config = match config_path {
        Some(path) => ContainConfig::load(&path)?,
        None => ContainConfig::default(),
    };

    let event = TagChangeEvent::load(&event_path)?;

    let instance = match gate::evaluate(&event, &config.tag_key) {
        ActivationDecision::NotApplicable => {
            output.progress("event is not an instance containment-tag change; nothing to do");
            return Ok(());
        }
        ActivationDecision::Suppressed => {
            output.progress("containment tag was removed; suppressing re-activation");
            return Ok(());
        }
        ActivationDecision::Activate { instance } => instance,
    };

    let plan = ActionPlan::default_plan();

    if plan_only {
        output.result(&render_plan(&plan), &plan);
        return Ok(());
    }

    output.progress(&format!("Containing {instance} in {}", event.region));

    let store = Arc::new(InventoryStore::load(&inventory_path)?);
    let orchestrator = Orchestrator::new(store.clients(), config);
    let report = orchestrator.run(&instance, &event.region, &plan).await;

    for outcome in &report.outcomes {
        let summary = match &outcome.detail {
            Some(detail) => format!("  {} {}: {detail}", status_mark(outcome), outcome.action),
            None => format!("  {} {}", status_mark(outcome), outcome.action),
        };
        output.progress(&summary);
    }

    if report.completed {
        if report.failed_count() > 0 {
            output.warning(&format!(
                "{} non-fatal action(s) failed; see report",
                report.failed_count()
            ));
        }
        output.result(&format!("Containment of {instance} complete"), &report);
    } else {
        output.warning("containment incomplete: a fatal action failed");
        output.result(&format!("Containment of {instance} INCOMPLETE"), &report);
    }

    Ok(())
}

fn status_mark(outcome: &sequester::actions::ActionOutcome) -> &'static str {
    use sequester::actions::ActionStatus;
    match outcome.status {
        ActionStatus::Success => "✓",
        ActionStatus::Failed => "✗",
        ActionStatus::Skipped => "-",
    }
}

fn render_plan(plan: &ActionPlan) -> String {
    let mut lines = vec!["Containment plan:".to_string()];
    for (index, entry) in plan.iter().enumerate() {
        lines.push(format!(
            "  {}. {} ({:?})",
            index + 1,
            entry.action,
            entry.policy
        ));
    }
    lines.join("\n")
}

/// Shared helper for command handlers that take the global output flags.
pub fn output_mode(json: bool, quiet: bool) -> OutputMode {
    if json {
        OutputMode::Json
    } else if quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    }
}
