//! ecscp-provisioner
//!
//! Reconciliation engine for a single ECS capacity provider.
//! Library consumed by the `ecscp` CLI.
//!
//! Public API:
//! - `plan()`: pure diff of desired spec against observed descriptor
//! - `Reconciler::run()`: describe → plan → apply → confirm, with backoff
//! - `Reconciler::preview()`: describe + plan, no mutation
//! - `reconcile()`: one run with default tuning
//!
//! The remote side is reached only through [`RemoteGateway`].

pub mod config;
pub mod descriptor;
pub mod drift;
pub mod error;
pub mod gateway;
pub mod plan;
pub mod reconcile;
pub mod resource;
pub mod retry;

pub use crate::config::ReconcilerConfig;
pub use crate::descriptor::{ResourceDescriptor, ResourceStatus, UpdateStatus};
pub use crate::drift::FieldDrift;
pub use crate::error::{CallClass, GatewayError, PlanError, ReconcileError};
pub use crate::gateway::{BoxFuture, RemoteGateway};
pub use crate::plan::{plan, Plan};
pub use crate::reconcile::{reconcile, Action, Preview, Reconciled, Reconciler};
pub use crate::resource::{Lifecycle, ManagedScaling, ResourceSpec, TerminationProtection};
pub use crate::retry::BackoffPolicy;
