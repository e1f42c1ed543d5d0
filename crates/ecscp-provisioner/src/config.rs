use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::retry::BackoffPolicy;

/// Tuning knobs for a [`Reconciler`](crate::reconcile::Reconciler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    pub backoff: BackoffPolicy,
    /// Upper bound on time spent polling an in-flight provider.
    pub wait_timeout_secs: u64,
    /// Deadline used when the caller doesn't supply one.
    pub deadline_secs: u64,
}

impl ReconcilerConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn default_deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            backoff: BackoffPolicy::default(),
            wait_timeout_secs: 120,
            deadline_secs: 300,
        }
    }
}
