//! ecscp-ecs
//!
//! [`RemoteGateway`](ecscp_provisioner::RemoteGateway) implementation over
//! the AWS ECS capacity provider API, plus SDK config construction.

pub mod aws;
pub mod convert;
pub mod error;
pub mod gateway;

pub use crate::aws::{build_sdk_config, CredentialSource};
pub use crate::error::EcsError;
pub use crate::gateway::EcsGateway;
