use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// ECS rejects step sizes above this.
pub const MAX_STEP_SIZE: i32 = 10_000;
/// ECS rejects warmup periods above this (seconds).
pub const MAX_WARMUP_PERIOD_SECONDS: i32 = 10_000;

/// Desired state of one capacity provider, as supplied by the caller.
///
/// Field names on the wire follow the declarative input format
/// (`auto_scaling_group_arn`, `state`, ...), not the Rust names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Unique name, the only lookup key.
    pub name: String,
    /// ARN of the autoscaling group the provider binds to at creation.
    #[serde(rename = "auto_scaling_group_arn")]
    pub backing_group_ref: String,
    #[serde(default)]
    pub termination_protection: TerminationProtection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_scaling: Option<ManagedScaling>,
    #[serde(rename = "state", default)]
    pub lifecycle: Lifecycle,
}

impl ResourceSpec {
    pub fn present(name: impl Into<String>, backing_group_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            backing_group_ref: backing_group_ref.into(),
            termination_protection: TerminationProtection::Unset,
            managed_scaling: None,
            lifecycle: Lifecycle::Present,
        }
    }

    pub fn absent(name: impl Into<String>, backing_group_ref: impl Into<String>) -> Self {
        Self {
            lifecycle: Lifecycle::Absent,
            ..Self::present(name, backing_group_ref)
        }
    }

    /// Check every structural and numeric constraint.
    ///
    /// Runs before any lookup, so a bad spec never reaches the remote side.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.name.trim().is_empty() {
            return Err(PlanError::invalid("name", "must not be empty"));
        }
        if self.backing_group_ref.trim().is_empty() {
            return Err(PlanError::invalid(
                "auto_scaling_group_arn",
                "must not be empty",
            ));
        }
        if let Some(scaling) = &self.managed_scaling {
            scaling.validate()?;
        }
        Ok(())
    }
}

/// Whether the provider should exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    #[default]
    Present,
    Absent,
}

/// Managed termination protection. `Unset` expresses no preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminationProtection {
    Enabled,
    Disabled,
    #[default]
    Unset,
}

impl TerminationProtection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "ENABLED",
            Self::Disabled => "DISABLED",
            Self::Unset => "UNSET",
        }
    }
}

/// Managed scaling settings for the autoscaling group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedScaling {
    #[serde(rename = "status")]
    pub enabled: bool,
    #[serde(rename = "target_capacity")]
    pub target_capacity_percent: i32,
    #[serde(rename = "min_scaling_step_size")]
    pub min_step_size: i32,
    #[serde(rename = "max_scaling_step_size")]
    pub max_step_size: i32,
    #[serde(rename = "instance_warmup_period")]
    pub warmup_period_seconds: i32,
}

impl ManagedScaling {
    pub fn validate(&self) -> Result<(), PlanError> {
        if !(1..=100).contains(&self.target_capacity_percent) {
            return Err(PlanError::invalid(
                "managed_scaling.target_capacity",
                format!(
                    "must be in (0, 100], got {}",
                    self.target_capacity_percent
                ),
            ));
        }
        if !(1..=MAX_STEP_SIZE).contains(&self.min_step_size) {
            return Err(PlanError::invalid(
                "managed_scaling.min_scaling_step_size",
                format!(
                    "must be in [1, {MAX_STEP_SIZE}], got {}",
                    self.min_step_size
                ),
            ));
        }
        if self.max_step_size > MAX_STEP_SIZE {
            return Err(PlanError::invalid(
                "managed_scaling.max_scaling_step_size",
                format!(
                    "must be at most {MAX_STEP_SIZE}, got {}",
                    self.max_step_size
                ),
            ));
        }
        if self.max_step_size < self.min_step_size {
            return Err(PlanError::invalid(
                "managed_scaling.max_scaling_step_size",
                format!(
                    "must be >= min_scaling_step_size ({}), got {}",
                    self.min_step_size, self.max_step_size
                ),
            ));
        }
        if !(0..=MAX_WARMUP_PERIOD_SECONDS).contains(&self.warmup_period_seconds) {
            return Err(PlanError::invalid(
                "managed_scaling.instance_warmup_period",
                format!(
                    "must be in [0, {MAX_WARMUP_PERIOD_SECONDS}], got {}",
                    self.warmup_period_seconds
                ),
            ));
        }
        Ok(())
    }
}
