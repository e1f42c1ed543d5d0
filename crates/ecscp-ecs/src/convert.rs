use aws_sdk_ecs::types::{
    AutoScalingGroupProvider, CapacityProvider, ManagedScaling as SdkManagedScaling,
    ManagedScalingStatus, ManagedTerminationProtection,
};
use ecscp_provisioner::{
    ManagedScaling, ResourceDescriptor, ResourceSpec, ResourceStatus, TerminationProtection,
    UpdateStatus,
};

use crate::error::EcsError;

// ECS fills these in when managed scaling omits them.
const DEFAULT_TARGET_CAPACITY: i32 = 100;
const DEFAULT_MIN_STEP_SIZE: i32 = 1;
const DEFAULT_MAX_STEP_SIZE: i32 = 10_000;
const DEFAULT_WARMUP_PERIOD: i32 = 300;

/// Fold ECS `status` and `updateStatus` into the model's pair.
///
/// ECS keeps a deleting provider `ACTIVE` and signals the transition through
/// `updateStatus`, so the two must be read together.
pub fn map_status(status: Option<&str>, update_status: Option<&str>) -> (ResourceStatus, UpdateStatus) {
    let update = match update_status {
        None => UpdateStatus::None,
        Some("DELETE_IN_PROGRESS" | "UPDATE_IN_PROGRESS") => UpdateStatus::UpdateInProgress,
        Some("DELETE_COMPLETE" | "UPDATE_COMPLETE") => UpdateStatus::UpdateComplete,
        Some("DELETE_FAILED" | "UPDATE_FAILED") => UpdateStatus::UpdateFailed,
        Some(_) => return (ResourceStatus::Unknown, UpdateStatus::None),
    };

    let status = match (status, update_status) {
        (Some("INACTIVE"), _) | (_, Some("DELETE_COMPLETE")) => ResourceStatus::Inactive,
        (Some("ACTIVE"), Some("DELETE_IN_PROGRESS")) => ResourceStatus::Deleting,
        (Some("ACTIVE"), Some("UPDATE_IN_PROGRESS")) => ResourceStatus::Updating,
        (Some("ACTIVE"), _) => ResourceStatus::Active,
        (Some("PROVISIONING"), _) => ResourceStatus::Updating,
        (Some("DEPROVISIONING"), _) => ResourceStatus::Deleting,
        _ => ResourceStatus::Unknown,
    };

    (status, update)
}

fn termination_protection(raw: Option<&ManagedTerminationProtection>) -> TerminationProtection {
    match raw.map(|p| p.as_str()) {
        Some("ENABLED") => TerminationProtection::Enabled,
        Some("DISABLED") | None => TerminationProtection::Disabled,
        Some(_) => TerminationProtection::Unset,
    }
}

fn managed_scaling(raw: &SdkManagedScaling) -> ManagedScaling {
    ManagedScaling {
        enabled: raw.status().is_some_and(|s| s.as_str() == "ENABLED"),
        target_capacity_percent: raw.target_capacity().unwrap_or(DEFAULT_TARGET_CAPACITY),
        min_step_size: raw
            .minimum_scaling_step_size()
            .unwrap_or(DEFAULT_MIN_STEP_SIZE),
        max_step_size: raw
            .maximum_scaling_step_size()
            .unwrap_or(DEFAULT_MAX_STEP_SIZE),
        warmup_period_seconds: raw.instance_warmup_period().unwrap_or(DEFAULT_WARMUP_PERIOD),
    }
}

/// Normalize one ECS capacity provider.
pub fn descriptor_from_sdk(cp: &CapacityProvider) -> Result<ResourceDescriptor, EcsError> {
    let name = cp
        .name()
        .ok_or_else(|| EcsError::Conversion("capacity provider has no name".into()))?;
    let (status, update_status) = map_status(
        cp.status().map(|s| s.as_str()),
        cp.update_status().map(|s| s.as_str()),
    );
    let asg = cp.auto_scaling_group_provider();

    Ok(ResourceDescriptor {
        name: name.to_string(),
        arn: cp.capacity_provider_arn().map(String::from),
        status,
        backing_group_ref: asg
            .map(|p| p.auto_scaling_group_arn().to_string())
            .unwrap_or_default(),
        termination_protection: termination_protection(
            asg.and_then(|p| p.managed_termination_protection()),
        ),
        managed_scaling: asg.and_then(|p| p.managed_scaling()).map(managed_scaling),
        update_status,
        update_reason: cp.update_status_reason().map(String::from),
    })
}

/// Build the `autoScalingGroupProvider` block for `CreateCapacityProvider`.
pub fn provider_from_spec(spec: &ResourceSpec) -> Result<AutoScalingGroupProvider, EcsError> {
    let mut builder =
        AutoScalingGroupProvider::builder().auto_scaling_group_arn(&spec.backing_group_ref);

    if let Some(scaling) = &spec.managed_scaling {
        let status = if scaling.enabled {
            ManagedScalingStatus::Enabled
        } else {
            ManagedScalingStatus::Disabled
        };
        builder = builder.managed_scaling(
            SdkManagedScaling::builder()
                .status(status)
                .target_capacity(scaling.target_capacity_percent)
                .minimum_scaling_step_size(scaling.min_step_size)
                .maximum_scaling_step_size(scaling.max_step_size)
                .instance_warmup_period(scaling.warmup_period_seconds)
                .build(),
        );
    }

    builder = match spec.termination_protection {
        TerminationProtection::Enabled => {
            builder.managed_termination_protection(ManagedTerminationProtection::Enabled)
        }
        TerminationProtection::Disabled => {
            builder.managed_termination_protection(ManagedTerminationProtection::Disabled)
        }
        TerminationProtection::Unset => builder,
    };

    Ok(builder.build()?)
}
