// ABOUTME: Describe command implementation.
// ABOUTME: Lists instances in an inventory snapshot for operator triage.

use sequester::cloud::ComputeOps;
use sequester::error::Result;
use sequester::inventory::InventoryStore;
use sequester::output::Output;
use std::path::PathBuf;

/// List every instance in the snapshot with its containment-relevant state.
pub async fn describe(inventory_path: PathBuf, output: Output) -> Result<()> {
    let store = InventoryStore::load(&inventory_path)?;
    let instances = store
        .list_instances()
        .await
        .map_err(|e| sequester::error::Error::Cloud(e.to_string()))?;

    if instances.is_empty() {
        output.result("no instances in inventory", &instances);
        return Ok(());
    }

    for instance in &instances {
        output.progress(&format!(
            "{}  {}  {}  {}  tags: {}",
            instance.id,
            instance.state,
            instance.instance_type,
            instance.availability_zone,
            render_tags(&instance.tags),
        ));
    }
    output.result(&format!("{} instance(s)", instances.len()), &instances);

    Ok(())
}

fn render_tags(tags: &std::collections::HashMap<String, String>) -> String {
    if tags.is_empty() {
        return "-".to_string();
    }
    let mut pairs: Vec<_> = tags.iter().map(|(k, v)| format!("{k}={v}")).collect();
    pairs.sort();
    pairs.join(",")
}
