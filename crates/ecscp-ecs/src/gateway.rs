use aws_sdk_ecs::Client;
use ecscp_provisioner::{BoxFuture, GatewayError, RemoteGateway, ResourceDescriptor, ResourceSpec};

use crate::convert::{descriptor_from_sdk, provider_from_spec};
use crate::error::classify;

/// [`RemoteGateway`] backed by the ECS capacity provider API.
///
/// `Client` is a cheap handle around shared connection state; cloning the
/// gateway does not open new connections.
#[derive(Clone)]
pub struct EcsGateway {
    client: Client,
}

impl EcsGateway {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

impl RemoteGateway for EcsGateway {
    fn describe<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Option<ResourceDescriptor>, GatewayError>> {
        Box::pin(async move {
            let resp = self
                .client
                .describe_capacity_providers()
                .capacity_providers(name)
                .send()
                .await
                .map_err(|e| classify(&e))?;

            let found = resp
                .capacity_providers()
                .iter()
                .find(|cp| cp.name() == Some(name) || cp.capacity_provider_arn() == Some(name));

            if let Some(cp) = found {
                return Ok(Some(descriptor_from_sdk(cp)?));
            }

            // ECS reports an unknown name as a MISSING failure, not an error.
            if let Some(failure) = resp
                .failures()
                .iter()
                .find(|f| f.reason().is_some_and(|r| r != "MISSING"))
            {
                return Err(GatewayError::Permanent(format!(
                    "ecs:DescribeCapacityProviders failed for {name}: {}",
                    failure.detail().or(failure.reason()).unwrap_or_default()
                )));
            }

            tracing::debug!(name = %name, "capacity provider not found");
            Ok(None)
        })
    }

    fn create<'a>(
        &'a self,
        spec: &'a ResourceSpec,
    ) -> BoxFuture<'a, Result<ResourceDescriptor, GatewayError>> {
        Box::pin(async move {
            let provider = provider_from_spec(spec)?;

            let resp = self
                .client
                .create_capacity_provider()
                .name(&spec.name)
                .auto_scaling_group_provider(provider)
                .send()
                .await
                .map_err(|e| classify(&e))?;

            let cp = resp.capacity_provider().ok_or_else(|| {
                GatewayError::Permanent(format!(
                    "ecs:CreateCapacityProvider returned no capacity provider for {}",
                    spec.name
                ))
            })?;

            let descriptor = descriptor_from_sdk(cp)?;
            tracing::info!(name = %spec.name, arn = ?descriptor.arn, "ecs:CreateCapacityProvider accepted");
            Ok(descriptor)
        })
    }

    fn delete<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<(), GatewayError>> {
        Box::pin(async move {
            self.client
                .delete_capacity_provider()
                .capacity_provider(name)
                .send()
                .await
                .map_err(|e| classify(&e))?;

            tracing::info!(name = %name, "ecs:DeleteCapacityProvider accepted");
            Ok(())
        })
    }
}
