// ABOUTME: Trigger gate deciding whether a tag-change event activates containment.
// ABOUTME: Pure function of the event; guarantees at-most-one activation per tagging lifecycle.

use crate::event::TagChangeEvent;
use crate::types::InstanceId;

/// Default tag key whose addition triggers containment.
pub const CONTAINMENT_TAG: &str = "IR_Contained";

/// Service namespace and resource type the engine acts on.
const SERVICE: &str = "ec2";
const RESOURCE_TYPE: &str = "instance";

/// Outcome of gating an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationDecision {
    /// The containment tag was just added and is still present: contain.
    Activate { instance: InstanceId },
    /// The containment tag was removed. Containment must not re-run.
    Suppressed,
    /// Not an instance tag change, the containment tag was untouched, or the
    /// event carries no usable resource identity.
    NotApplicable,
}

/// Decide whether an event activates containment.
///
/// Activation requires the event to be about a compute instance (service and
/// resource type both match) and the containment tag to appear in both the
/// changed-key list and the current tag set. A tag that appears in the
/// changed-key list but not in the current tags is a removal and is
/// suppressed, so untagging an instance never re-triggers its own containment.
pub fn evaluate(event: &TagChangeEvent, tag_key: &str) -> ActivationDecision {
    if event.detail.service != SERVICE || event.detail.resource_type != RESOURCE_TYPE {
        return ActivationDecision::NotApplicable;
    }

    let changed = event
        .detail
        .changed_tag_keys
        .iter()
        .any(|key| key == tag_key);
    if !changed {
        return ActivationDecision::NotApplicable;
    }

    if !event.detail.tags.contains_key(tag_key) {
        return ActivationDecision::Suppressed;
    }

    match event.first_resource_id() {
        Some(id) => ActivationDecision::Activate {
            instance: InstanceId::new(id),
        },
        // Tagged but unidentifiable: treat as malformed rather than guessing.
        None => ActivationDecision::NotApplicable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TagChangeDetail;
    use std::collections::HashMap;

    fn event(service: &str, resource_type: &str, changed: &[&str], tags: &[(&str, &str)]) -> TagChangeEvent {
        TagChangeEvent {
            region: "us-east-1".to_string(),
            resources: vec!["arn:aws:ec2:us-east-1:123456789012:instance/i-0abc123".to_string()],
            detail: TagChangeDetail {
                service: service.to_string(),
                resource_type: resource_type.to_string(),
                changed_tag_keys: changed.iter().map(|s| s.to_string()).collect(),
                tags: tags
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<HashMap<_, _>>(),
            },
        }
    }

    #[test]
    fn tag_addition_activates() {
        let event = event(
            "ec2",
            "instance",
            &["IR_Contained"],
            &[("IR_Contained", "contained")],
        );
        assert_eq!(
            evaluate(&event, CONTAINMENT_TAG),
            ActivationDecision::Activate {
                instance: InstanceId::new("i-0abc123")
            }
        );
    }

    #[test]
    fn tag_removal_is_suppressed() {
        let event = event("ec2", "instance", &["IR_Contained"], &[]);
        assert_eq!(evaluate(&event, CONTAINMENT_TAG), ActivationDecision::Suppressed);
    }

    #[test]
    fn other_services_are_not_applicable() {
        let event = event(
            "s3",
            "instance",
            &["IR_Contained"],
            &[("IR_Contained", "contained")],
        );
        assert_eq!(evaluate(&event, CONTAINMENT_TAG), ActivationDecision::NotApplicable);
    }

    #[test]
    fn other_resource_types_are_not_applicable() {
        let event = event(
            "ec2",
            "volume",
            &["IR_Contained"],
            &[("IR_Contained", "contained")],
        );
        assert_eq!(evaluate(&event, CONTAINMENT_TAG), ActivationDecision::NotApplicable);
    }

    #[test]
    fn unrelated_tag_change_is_not_applicable() {
        let event = event("ec2", "instance", &["Name"], &[("Name", "web-1")]);
        assert_eq!(evaluate(&event, CONTAINMENT_TAG), ActivationDecision::NotApplicable);
    }

    #[test]
    fn missing_resource_arn_is_not_applicable() {
        let mut event = event(
            "ec2",
            "instance",
            &["IR_Contained"],
            &[("IR_Contained", "contained")],
        );
        event.resources.clear();
        assert_eq!(evaluate(&event, CONTAINMENT_TAG), ActivationDecision::NotApplicable);
    }
}
