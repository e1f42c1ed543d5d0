use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::{ManagedScaling, TerminationProtection};

/// Observed state of a capacity provider, as last read from the remote side.
///
/// Only a [`RemoteGateway`](crate::gateway::RemoteGateway) produces these.
/// The reconciler passes them through but never builds one itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub name: String,
    /// Assigned by the remote system on creation. May be stale on an
    /// `Inactive` provider.
    pub arn: Option<String>,
    pub status: ResourceStatus,
    pub backing_group_ref: String,
    pub termination_protection: TerminationProtection,
    pub managed_scaling: Option<ManagedScaling>,
    pub update_status: UpdateStatus,
    pub update_reason: Option<String>,
}

impl ResourceDescriptor {
    /// Active or inactive, with no update in progress.
    pub fn is_settled(&self) -> bool {
        matches!(self.status, ResourceStatus::Active | ResourceStatus::Inactive)
            && self.update_status.is_terminal()
    }

    /// A transition is under way and the provider must not be mutated.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self.status,
            ResourceStatus::Updating | ResourceStatus::Deleting
        ) || !self.update_status.is_terminal()
    }

    /// The remote side still remembers the name, but the provider is gone.
    pub fn is_logically_absent(&self) -> bool {
        self.status == ResourceStatus::Inactive
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceStatus {
    Active,
    Updating,
    Deleting,
    Inactive,
    Unknown,
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Updating => "UPDATING",
            Self::Deleting => "DELETING",
            Self::Inactive => "INACTIVE",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateStatus {
    #[default]
    None,
    UpdateInProgress,
    UpdateComplete,
    UpdateFailed,
}

impl UpdateStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::UpdateInProgress)
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::None => "NONE",
            Self::UpdateInProgress => "UPDATE_IN_PROGRESS",
            Self::UpdateComplete => "UPDATE_COMPLETE",
            Self::UpdateFailed => "UPDATE_FAILED",
        };
        f.write_str(s)
    }
}
