use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::descriptor::ResourceDescriptor;
use crate::drift::FieldDrift;

/// Failure reported by a [`RemoteGateway`](crate::gateway::RemoteGateway).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Network, throttling, or server-side hiccup. Worth retrying.
    #[error("transient remote error: {0}")]
    Transient(String),

    #[error("resource already exists: {0}")]
    Conflict(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    /// Authorization, malformed request, remote validation.
    #[error("remote error: {0}")]
    Permanent(String),
}

impl GatewayError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Deterministic planning failure. Retrying cannot change the outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("invalid spec: {field} {reason}")]
    InvalidSpec { field: String, reason: String },

    #[error("{field} cannot change after creation (desired {desired}, observed {observed})")]
    ImmutableFieldConflict {
        field: String,
        desired: String,
        observed: String,
    },

    #[error("no in-place update is available for: {}", join_fields(.drift))]
    UnsupportedUpdate { drift: Vec<FieldDrift> },

    #[error("observed state of {name} is unreliable (status UNKNOWN)")]
    ObservationUnreliable { name: String },
}

impl PlanError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

fn join_fields(drift: &[FieldDrift]) -> String {
    drift
        .iter()
        .map(|d| d.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The kind of remote call, for attempt accounting and error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallClass {
    Describe,
    Create,
    Delete,
}

impl fmt::Display for CallClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Describe => "describe",
            Self::Create => "create",
            Self::Delete => "delete",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Non-retryable remote failure, surfaced as-is.
    #[error("{call} rejected by remote: {source}")]
    Remote {
        call: CallClass,
        #[source]
        source: GatewayError,
    },

    #[error("convergence failed for {name}: {reason}")]
    ConvergenceFailed {
        name: String,
        reason: String,
        #[source]
        source: Option<GatewayError>,
    },

    #[error("{name} did not converge within {}s", .waited.as_secs())]
    ConvergenceTimeout {
        name: String,
        waited: Duration,
        /// Last descriptor seen before giving up.
        last: Option<Box<ResourceDescriptor>>,
    },
}
