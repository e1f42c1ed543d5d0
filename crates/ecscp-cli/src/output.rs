use ecscp_provisioner::{Action, FieldDrift, Plan, ResourceDescriptor, TerminationProtection};
use serde_json::{json, Value};

/// Render a descriptor in the shape ECS itself uses for a capacity provider.
pub fn capacity_provider(descriptor: &ResourceDescriptor) -> Value {
    let mut asg = json!({
        "autoScalingGroupArn": descriptor.backing_group_ref,
    });

    if let Some(scaling) = &descriptor.managed_scaling {
        asg["managedScaling"] = json!({
            "status": if scaling.enabled { "ENABLED" } else { "DISABLED" },
            "targetCapacity": scaling.target_capacity_percent,
            "minimumScalingStepSize": scaling.min_step_size,
            "maximumScalingStepSize": scaling.max_step_size,
            "instanceWarmupPeriod": scaling.warmup_period_seconds,
        });
    }
    if descriptor.termination_protection != TerminationProtection::Unset {
        asg["managedTerminationProtection"] = json!(descriptor.termination_protection.as_str());
    }

    json!({
        "capacityProviderArn": descriptor.arn,
        "name": descriptor.name,
        "status": descriptor.status.to_string(),
        "autoScalingGroupProvider": asg,
        "updateStatus": descriptor.update_status.to_string(),
        "updateReason": descriptor.update_reason,
    })
}

/// Top-level result document for `apply`.
pub fn applied(action: Action, changed: bool, descriptor: Option<&ResourceDescriptor>) -> Value {
    json!({
        "changed": changed,
        "action": action,
        "capacity_provider": descriptor.map(capacity_provider),
    })
}

/// Top-level result document for `plan`.
pub fn planned(plan: Plan, observed: Option<&ResourceDescriptor>, drift: &[FieldDrift]) -> Value {
    json!({
        "changed": plan.is_mutation(),
        "plan": plan,
        "drift": drift,
        "capacity_provider": observed.map(capacity_provider),
    })
}
