// ABOUTME: Tag and untag command implementations.
// ABOUTME: Updates the snapshot and emits the synthetic tag-change event the cloud would deliver.

use sequester::cloud::{ComputeError, ComputeOps};
use sequester::error::{Error, Result};
use sequester::event::{TagChangeDetail, TagChangeEvent};
use sequester::inventory::InventoryStore;
use sequester::output::Output;
use sequester::types::InstanceId;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const DEFAULT_TAG_VALUE: &str = "This instance has been contained by the security incident \
response team. Please reach out to the security team for additional information.";

/// Add the containment tag to an instance.
pub async fn tag(
    inventory_path: PathBuf,
    id: String,
    key: String,
    desc: Option<String>,
    emit_event: Option<PathBuf>,
    output: Output,
) -> Result<()> {
    let instance = InstanceId::new(id);
    let value = desc.unwrap_or_else(|| DEFAULT_TAG_VALUE.to_string());

    let store = InventoryStore::load(&inventory_path)?;
    let tags = HashMap::from([(key.clone(), value)]);
    store
        .create_tags(&instance, &tags)
        .await
        .map_err(|e| map_compute(e, &instance))?;

    let inventory = store.snapshot();
    inventory.save(&inventory_path)?;

    let event = TagChangeEvent {
        region: inventory.region.clone(),
        resources: vec![inventory.instance_arn(&instance)],
        detail: TagChangeDetail {
            service: "ec2".to_string(),
            resource_type: "instance".to_string(),
            changed_tag_keys: vec![key.clone()],
            tags: inventory
                .instance(&instance)
                .map(|record| record.tags.clone())
                .unwrap_or_default(),
        },
    };
    emit(&event, emit_event.as_deref(), &output)?;

    output.progress(&format!("Tagged {instance} with {key}"));
    Ok(())
}

/// Remove the containment tag from an instance.
pub async fn untag(
    inventory_path: PathBuf,
    id: String,
    key: String,
    emit_event: Option<PathBuf>,
    output: Output,
) -> Result<()> {
    let instance = InstanceId::new(id);

    let store = InventoryStore::load(&inventory_path)?;
    store
        .delete_tags(&instance, std::slice::from_ref(&key))
        .await
        .map_err(|e| map_compute(e, &instance))?;

    let inventory = store.snapshot();
    inventory.save(&inventory_path)?;

    // The removal event lists the key as changed while the current tag set
    // no longer carries it; the gate must suppress on exactly this shape.
    let event = TagChangeEvent {
        region: inventory.region.clone(),
        resources: vec![inventory.instance_arn(&instance)],
        detail: TagChangeDetail {
            service: "ec2".to_string(),
            resource_type: "instance".to_string(),
            changed_tag_keys: vec![key.clone()],
            tags: inventory
                .instance(&instance)
                .map(|record| record.tags.clone())
                .unwrap_or_default(),
        },
    };
    emit(&event, emit_event.as_deref(), &output)?;

    output.progress(&format!("Removed {key} from {instance}"));
    Ok(())
}

fn emit(event: &TagChangeEvent, path: Option<&Path>, output: &Output) -> Result<()> {
    let json = serde_json::to_string_pretty(event)?;
    match path {
        Some(path) => {
            std::fs::write(path, &json)?;
            output.progress(&format!("Wrote tag-change event to {}", path.display()));
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn map_compute(error: ComputeError, instance: &InstanceId) -> Error {
    match error {
        ComputeError::InstanceNotFound(_) => Error::UnknownInstance(instance.to_string()),
        other => Error::Cloud(other.to_string()),
    }
}
