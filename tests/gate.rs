// ABOUTME: Integration tests for the trigger gate.
// ABOUTME: Covers activation, suppression on removal, and property-based invariants.

mod support;

use proptest::prelude::*;
use sequester::event::{TagChangeDetail, TagChangeEvent};
use sequester::gate::{ActivationDecision, CONTAINMENT_TAG, evaluate};
use sequester::types::InstanceId;
use support::event;

// =============================================================================
// Scenario Tests
// =============================================================================

/// Test: the canonical activation event derives the instance id from the ARN.
#[test]
fn activation_extracts_instance_id() {
    let event = event(
        "ec2",
        "instance",
        &["IR_Contained"],
        &[("IR_Contained", "contained")],
    );

    assert_eq!(
        evaluate(&event, CONTAINMENT_TAG),
        ActivationDecision::Activate {
            instance: InstanceId::new(support::INSTANCE)
        }
    );
}

/// Test: the same event with an empty tag set is a removal and is suppressed.
#[test]
fn removal_event_is_suppressed() {
    let event = event("ec2", "instance", &["IR_Contained"], &[]);
    assert_eq!(evaluate(&event, CONTAINMENT_TAG), ActivationDecision::Suppressed);
}

/// Test: a non-instance resource never activates, even with the tag present.
#[test]
fn non_instance_resources_not_applicable() {
    for (service, resource_type) in [("s3", "instance"), ("ec2", "volume"), ("rds", "cluster")] {
        let event = event(
            service,
            resource_type,
            &["IR_Contained"],
            &[("IR_Contained", "contained")],
        );
        assert_eq!(
            evaluate(&event, CONTAINMENT_TAG),
            ActivationDecision::NotApplicable,
            "{service}/{resource_type} must not activate"
        );
    }
}

/// Test: a configurable tag key is honored.
#[test]
fn custom_tag_key() {
    let event = event(
        "ec2",
        "instance",
        &["Quarantine"],
        &[("Quarantine", "yes")],
    );
    assert!(matches!(
        evaluate(&event, "Quarantine"),
        ActivationDecision::Activate { .. }
    ));
    assert_eq!(evaluate(&event, CONTAINMENT_TAG), ActivationDecision::NotApplicable);
}

// =============================================================================
// Properties
// =============================================================================

fn arbitrary_event(
    changed: Vec<String>,
    tags: std::collections::HashMap<String, String>,
) -> TagChangeEvent {
    TagChangeEvent {
        region: "us-east-1".to_string(),
        resources: vec!["arn:aws:ec2:us-east-1:123456789012:instance/i-0abc123".to_string()],
        detail: TagChangeDetail {
            service: "ec2".to_string(),
            resource_type: "instance".to_string(),
            changed_tag_keys: changed,
            tags,
        },
    }
}

proptest! {
    /// Property: activation implies the tag is in both the changed keys and
    /// the current tag set.
    #[test]
    fn activation_requires_both_memberships(
        changed in prop::collection::vec("[A-Za-z_]{1,12}", 0..5),
        tags in prop::collection::hash_map("[A-Za-z_]{1,12}", "[a-z]{0,8}", 0..5),
    ) {
        let event = arbitrary_event(changed.clone(), tags.clone());
        if matches!(evaluate(&event, CONTAINMENT_TAG), ActivationDecision::Activate { .. }) {
            prop_assert!(changed.iter().any(|key| key == CONTAINMENT_TAG));
            prop_assert!(tags.contains_key(CONTAINMENT_TAG));
        }
    }

    /// Property: a changed-but-absent containment tag is always suppressed,
    /// whatever else the event carries.
    #[test]
    fn removal_is_always_suppressed(
        mut changed in prop::collection::vec("[A-Za-z_]{1,12}", 0..4),
        tags in prop::collection::hash_map("[A-Za-z_]{1,11}", "[a-z]{0,8}", 0..5),
    ) {
        changed.push(CONTAINMENT_TAG.to_string());
        let mut tags = tags;
        tags.remove(CONTAINMENT_TAG);

        let event = arbitrary_event(changed, tags);
        prop_assert_eq!(evaluate(&event, CONTAINMENT_TAG), ActivationDecision::Suppressed);
    }
}
