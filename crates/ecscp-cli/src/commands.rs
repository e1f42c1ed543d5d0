use std::path::Path;
use std::time::Duration;

use ecscp_provisioner::{Reconciler, RemoteGateway, ResourceSpec};
use serde_json::Value;

use crate::output;

/// Read a desired-state document.
pub fn load_spec(path: &Path) -> eyre::Result<ResourceSpec> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
    parse_spec(&contents)
}

pub fn parse_spec(contents: &str) -> eyre::Result<ResourceSpec> {
    let spec: ResourceSpec = serde_json::from_str(contents)?;
    spec.validate()?;
    Ok(spec)
}

/// Converge the provider and report the confirmed state.
pub async fn apply<G: RemoteGateway>(
    reconciler: &Reconciler<G>,
    spec: &ResourceSpec,
    deadline: Option<Duration>,
) -> eyre::Result<Value> {
    let deadline = deadline.unwrap_or_else(|| reconciler.config().default_deadline());
    tracing::info!(
        name = %spec.name,
        state = ?spec.lifecycle,
        deadline_secs = deadline.as_secs(),
        "reconciling capacity provider"
    );

    let result = reconciler.run(spec, deadline).await?;

    tracing::info!(name = %spec.name, action = %result.action, changed = result.changed, "reconciled");
    Ok(output::applied(
        result.action,
        result.changed,
        result.descriptor.as_ref(),
    ))
}

/// Report what `apply` would do, without changing anything.
pub async fn plan<G: RemoteGateway>(
    reconciler: &Reconciler<G>,
    spec: &ResourceSpec,
) -> eyre::Result<Value> {
    let preview = reconciler.preview(spec).await?;
    Ok(output::planned(
        preview.plan,
        preview.observed.as_ref(),
        &preview.drift,
    ))
}

/// Describe a provider by name.
pub async fn show<G: RemoteGateway>(reconciler: &Reconciler<G>, name: &str) -> eyre::Result<Value> {
    let observed = reconciler.observe(name).await?;
    Ok(serde_json::json!({
        "capacity_provider": observed.as_ref().map(output::capacity_provider),
    }))
}
