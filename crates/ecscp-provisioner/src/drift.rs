use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::descriptor::ResourceDescriptor;
use crate::resource::{ResourceSpec, TerminationProtection};

/// Structured before/after for a single field that doesn't match desired state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDrift {
    /// Machine-readable field name, e.g. "managed_scaling.target_capacity"
    pub field: String,
    /// Human-readable label, e.g. "Target capacity"
    pub label: String,
    /// What we want
    pub expected: Value,
    /// What the remote side has
    pub actual: Value,
}

impl FieldDrift {
    fn new(field: &str, label: &str, expected: Value, actual: Value) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
            expected,
            actual,
        }
    }
}

/// Compare the mutable fields of `desired` against `observed`.
///
/// The backing group is not compared here; it is immutable and handled as a
/// conflict by the planner. `Unset` termination protection and an absent
/// managed scaling block mean "no preference" and never drift.
pub fn diff(desired: &ResourceSpec, observed: &ResourceDescriptor) -> Vec<FieldDrift> {
    let mut drifts = Vec::new();

    if desired.termination_protection != TerminationProtection::Unset
        && desired.termination_protection != observed.termination_protection
    {
        drifts.push(FieldDrift::new(
            "termination_protection",
            "Managed termination protection",
            json!(desired.termination_protection.as_str()),
            json!(observed.termination_protection.as_str()),
        ));
    }

    let Some(want) = &desired.managed_scaling else {
        return drifts;
    };
    let Some(have) = &observed.managed_scaling else {
        drifts.push(FieldDrift::new(
            "managed_scaling",
            "Managed scaling",
            json!(want),
            Value::Null,
        ));
        return drifts;
    };

    let fields = [
        (
            "managed_scaling.status",
            "Managed scaling enabled",
            json!(want.enabled),
            json!(have.enabled),
        ),
        (
            "managed_scaling.target_capacity",
            "Target capacity",
            json!(want.target_capacity_percent),
            json!(have.target_capacity_percent),
        ),
        (
            "managed_scaling.min_scaling_step_size",
            "Minimum scaling step size",
            json!(want.min_step_size),
            json!(have.min_step_size),
        ),
        (
            "managed_scaling.max_scaling_step_size",
            "Maximum scaling step size",
            json!(want.max_step_size),
            json!(have.max_step_size),
        ),
        (
            "managed_scaling.instance_warmup_period",
            "Instance warmup period",
            json!(want.warmup_period_seconds),
            json!(have.warmup_period_seconds),
        ),
    ];

    for (field, label, expected, actual) in fields {
        if expected != actual {
            drifts.push(FieldDrift::new(field, label, expected, actual));
        }
    }

    drifts
}
