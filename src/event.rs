// ABOUTME: Inbound tag-change event model with the wire's kebab-case field names.
// ABOUTME: Parsed from the event bus delivery; also emitted synthetically by the tag commands.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A tag-change notification as delivered by the cloud event bus.
///
/// Only the fields the trigger gate consumes are modeled; unknown fields in
/// the delivery are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagChangeEvent {
    pub region: String,

    /// Resource ARNs this event applies to. The instance identity is the
    /// last `/`-delimited segment of the first entry.
    #[serde(default)]
    pub resources: Vec<String>,

    pub detail: TagChangeDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagChangeDetail {
    /// Service namespace of the tagged resource, e.g. `ec2`.
    pub service: String,

    #[serde(rename = "resource-type")]
    pub resource_type: String,

    /// Tag keys added, changed, or removed by this event.
    #[serde(rename = "changed-tag-keys", default)]
    pub changed_tag_keys: Vec<String>,

    /// Full tag set on the resource after the change.
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl TagChangeEvent {
    /// Read and parse an event from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| Error::InvalidEvent(e.to_string()))
    }

    /// The instance identity embedded in the first resource ARN, if present.
    pub fn first_resource_id(&self) -> Option<&str> {
        let arn = self.resources.first()?;
        arn.rsplit('/').next().filter(|segment| !segment.is_empty())
    }
}
