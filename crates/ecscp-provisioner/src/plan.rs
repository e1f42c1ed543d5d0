use serde::{Deserialize, Serialize};

use crate::descriptor::{ResourceDescriptor, ResourceStatus};
use crate::drift;
use crate::error::PlanError;
use crate::resource::{Lifecycle, ResourceSpec};

/// The action needed to move observed state towards desired state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    NoOp,
    Create,
    Delete,
    /// A transition is in flight; re-describe instead of mutating.
    Wait,
}

impl Plan {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Create | Self::Delete)
    }
}

/// Diff `desired` against `observed` and decide what to do.
///
/// Pure and synchronous. Validation runs first, so a bad spec fails even
/// when nothing exists remotely. Existence (lifecycle) is decided before
/// any field is compared.
pub fn plan(
    desired: &ResourceSpec,
    observed: Option<&ResourceDescriptor>,
) -> Result<Plan, PlanError> {
    desired.validate()?;

    let Some(observed) = observed else {
        return Ok(match desired.lifecycle {
            Lifecycle::Absent => Plan::NoOp,
            Lifecycle::Present => Plan::Create,
        });
    };

    if observed.status == ResourceStatus::Unknown {
        return Err(PlanError::ObservationUnreliable {
            name: observed.name.clone(),
        });
    }

    if observed.is_in_flight() {
        return Ok(Plan::Wait);
    }

    // An inactive provider only lingers in describe output.
    if observed.is_logically_absent() {
        return Ok(match desired.lifecycle {
            Lifecycle::Absent => Plan::NoOp,
            Lifecycle::Present => Plan::Create,
        });
    }

    if desired.lifecycle == Lifecycle::Absent {
        return Ok(Plan::Delete);
    }

    if desired.backing_group_ref != observed.backing_group_ref {
        return Err(PlanError::ImmutableFieldConflict {
            field: "auto_scaling_group_arn".into(),
            desired: desired.backing_group_ref.clone(),
            observed: observed.backing_group_ref.clone(),
        });
    }

    let drift = drift::diff(desired, observed);
    if drift.is_empty() {
        Ok(Plan::NoOp)
    } else {
        Err(PlanError::UnsupportedUpdate { drift })
    }
}
