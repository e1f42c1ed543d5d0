use aws_sdk_ecs::types::{
    AutoScalingGroupProvider, CapacityProvider, CapacityProviderStatus,
    CapacityProviderUpdateStatus, ManagedScaling as SdkManagedScaling, ManagedScalingStatus,
    ManagedTerminationProtection,
};
use ecscp_ecs::convert::{descriptor_from_sdk, map_status, provider_from_spec};
use ecscp_ecs::CredentialSource;
use ecscp_provisioner::{
    ManagedScaling, ResourceSpec, ResourceStatus, TerminationProtection, UpdateStatus,
};

const GROUP: &str = "arn:aws:autoscaling:us-west-2:123456789012:autoScalingGroup:uuid:autoScalingGroupName/grp-x";

#[test]
fn status_pairs_map_to_model() {
    let cases = [
        ((Some("ACTIVE"), None), (ResourceStatus::Active, UpdateStatus::None)),
        (
            (Some("ACTIVE"), Some("UPDATE_COMPLETE")),
            (ResourceStatus::Active, UpdateStatus::UpdateComplete),
        ),
        (
            (Some("ACTIVE"), Some("UPDATE_IN_PROGRESS")),
            (ResourceStatus::Updating, UpdateStatus::UpdateInProgress),
        ),
        (
            (Some("ACTIVE"), Some("DELETE_IN_PROGRESS")),
            (ResourceStatus::Deleting, UpdateStatus::UpdateInProgress),
        ),
        (
            (Some("ACTIVE"), Some("DELETE_FAILED")),
            (ResourceStatus::Active, UpdateStatus::UpdateFailed),
        ),
        (
            (Some("ACTIVE"), Some("DELETE_COMPLETE")),
            (ResourceStatus::Inactive, UpdateStatus::UpdateComplete),
        ),
        (
            (Some("INACTIVE"), Some("DELETE_COMPLETE")),
            (ResourceStatus::Inactive, UpdateStatus::UpdateComplete),
        ),
        ((Some("PROVISIONING"), None), (ResourceStatus::Updating, UpdateStatus::None)),
        ((Some("DEPROVISIONING"), None), (ResourceStatus::Deleting, UpdateStatus::None)),
        ((None, None), (ResourceStatus::Unknown, UpdateStatus::None)),
        (
            (Some("ACTIVE"), Some("SOMETHING_NEW")),
            (ResourceStatus::Unknown, UpdateStatus::None),
        ),
    ];

    for ((status, update), expected) in cases {
        assert_eq!(map_status(status, update), expected, "{status:?} / {update:?}");
    }
}

#[test]
fn descriptor_from_full_response() {
    let cp = CapacityProvider::builder()
        .capacity_provider_arn("arn:aws:ecs:us-west-2:123456789012:capacity-provider/cp-1")
        .name("cp-1")
        .status(CapacityProviderStatus::Active)
        .auto_scaling_group_provider(
            AutoScalingGroupProvider::builder()
                .auto_scaling_group_arn(GROUP)
                .managed_scaling(
                    SdkManagedScaling::builder()
                        .status(ManagedScalingStatus::Enabled)
                        .target_capacity(75)
                        .minimum_scaling_step_size(1)
                        .maximum_scaling_step_size(10)
                        .instance_warmup_period(300)
                        .build(),
                )
                .managed_termination_protection(ManagedTerminationProtection::Enabled)
                .build()
                .unwrap(),
        )
        .update_status(CapacityProviderUpdateStatus::UpdateComplete)
        .update_status_reason("done")
        .build();

    let d = descriptor_from_sdk(&cp).unwrap();

    assert_eq!(d.name, "cp-1");
    assert!(d.arn.unwrap().ends_with("capacity-provider/cp-1"));
    assert_eq!(d.status, ResourceStatus::Active);
    assert_eq!(d.update_status, UpdateStatus::UpdateComplete);
    assert_eq!(d.update_reason.as_deref(), Some("done"));
    assert_eq!(d.backing_group_ref, GROUP);
    assert_eq!(d.termination_protection, TerminationProtection::Enabled);
    assert_eq!(
        d.managed_scaling,
        Some(ManagedScaling {
            enabled: true,
            target_capacity_percent: 75,
            min_step_size: 1,
            max_step_size: 10,
            warmup_period_seconds: 300,
        })
    );
}

#[test]
fn sparse_scaling_gets_ecs_defaults() {
    let cp = CapacityProvider::builder()
        .name("cp-1")
        .status(CapacityProviderStatus::Active)
        .auto_scaling_group_provider(
            AutoScalingGroupProvider::builder()
                .auto_scaling_group_arn(GROUP)
                .managed_scaling(
                    SdkManagedScaling::builder()
                        .status(ManagedScalingStatus::Disabled)
                        .build(),
                )
                .build()
                .unwrap(),
        )
        .build();

    let d = descriptor_from_sdk(&cp).unwrap();
    let scaling = d.managed_scaling.unwrap();

    assert!(!scaling.enabled);
    assert_eq!(scaling.target_capacity_percent, 100);
    assert_eq!(scaling.max_step_size, 10_000);
    assert_eq!(d.termination_protection, TerminationProtection::Disabled);
}

#[test]
fn nameless_provider_is_rejected() {
    let cp = CapacityProvider::builder()
        .status(CapacityProviderStatus::Active)
        .build();
    assert!(descriptor_from_sdk(&cp).is_err());
}

#[test]
fn request_carries_spec_settings() {
    let spec = ResourceSpec {
        termination_protection: TerminationProtection::Disabled,
        managed_scaling: Some(ManagedScaling {
            enabled: true,
            target_capacity_percent: 75,
            min_step_size: 1,
            max_step_size: 10,
            warmup_period_seconds: 300,
        }),
        ..ResourceSpec::present("cp-1", GROUP)
    };

    let provider = provider_from_spec(&spec).unwrap();

    assert_eq!(provider.auto_scaling_group_arn(), GROUP);
    assert_eq!(
        provider.managed_termination_protection(),
        Some(&ManagedTerminationProtection::Disabled)
    );
    let scaling = provider.managed_scaling().unwrap();
    assert_eq!(scaling.status(), Some(&ManagedScalingStatus::Enabled));
    assert_eq!(scaling.target_capacity(), Some(75));
    assert_eq!(scaling.instance_warmup_period(), Some(300));
}

#[test]
fn unset_protection_is_left_to_ecs() {
    let provider = provider_from_spec(&ResourceSpec::present("cp-1", GROUP)).unwrap();
    assert_eq!(provider.managed_termination_protection(), None);
    assert!(provider.managed_scaling().is_none());
}

#[test]
fn credential_source_is_tagged() {
    let src: CredentialSource =
        serde_json::from_value(serde_json::json!({"type": "profile", "profile_name": "ops"}))
            .unwrap();
    assert_eq!(
        src,
        CredentialSource::Profile {
            profile_name: "ops".into()
        }
    );

    let default: CredentialSource =
        serde_json::from_value(serde_json::json!({"type": "default_chain"})).unwrap();
    assert_eq!(default, CredentialSource::DefaultChain);
}
