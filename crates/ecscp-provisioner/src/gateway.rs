use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::descriptor::ResourceDescriptor;
use crate::error::GatewayError;
use crate::resource::ResourceSpec;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The three remote operations the reconciler needs.
///
/// An impl wraps an authenticated client handle and holds no per-run state,
/// so one gateway may serve many concurrent runs.
///
/// Methods return boxed futures for dyn compatibility.
pub trait RemoteGateway: Send + Sync {
    /// Read current state. `None` = the name is unknown to the remote side.
    fn describe<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Option<ResourceDescriptor>, GatewayError>>;

    /// Create the resource described by `spec`.
    fn create<'a>(
        &'a self,
        spec: &'a ResourceSpec,
    ) -> BoxFuture<'a, Result<ResourceDescriptor, GatewayError>>;

    /// Delete the resource. `GatewayError::NotFound` if it never existed.
    fn delete<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<(), GatewayError>>;
}

impl<G: RemoteGateway + ?Sized> RemoteGateway for Arc<G> {
    fn describe<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Option<ResourceDescriptor>, GatewayError>> {
        (**self).describe(name)
    }

    fn create<'a>(
        &'a self,
        spec: &'a ResourceSpec,
    ) -> BoxFuture<'a, Result<ResourceDescriptor, GatewayError>> {
        (**self).create(spec)
    }

    fn delete<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<(), GatewayError>> {
        (**self).delete(name)
    }
}

impl<G: RemoteGateway + ?Sized> RemoteGateway for &G {
    fn describe<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Option<ResourceDescriptor>, GatewayError>> {
        (**self).describe(name)
    }

    fn create<'a>(
        &'a self,
        spec: &'a ResourceSpec,
    ) -> BoxFuture<'a, Result<ResourceDescriptor, GatewayError>> {
        (**self).create(spec)
    }

    fn delete<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<(), GatewayError>> {
        (**self).delete(name)
    }
}
