use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::config::ReconcilerConfig;
use crate::descriptor::ResourceDescriptor;
use crate::drift::{self, FieldDrift};
use crate::error::{CallClass, GatewayError, ReconcileError};
use crate::gateway::{BoxFuture, RemoteGateway};
use crate::plan::{self, Plan};
use crate::resource::{Lifecycle, ResourceSpec};

/// The mutation a run applied, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    NoOp,
    Create,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::NoOp => "no_op",
            Self::Create => "create",
            Self::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciled {
    pub action: Action,
    pub changed: bool,
    /// Confirmed remote state. `None` when the name is unknown remotely.
    pub descriptor: Option<ResourceDescriptor>,
}

/// What a run would do, computed without mutating anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub plan: Plan,
    pub observed: Option<ResourceDescriptor>,
    /// Fields that differ from a live provider. Empty when there is nothing
    /// to compare against.
    pub drift: Vec<FieldDrift>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Describing,
    Planning,
    ApplyingCreate,
    ApplyingDelete,
    Waiting,
    Confirming,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Describing => "describing",
            Self::Planning => "planning",
            Self::ApplyingCreate => "applying_create",
            Self::ApplyingDelete => "applying_delete",
            Self::Waiting => "waiting",
            Self::Confirming => "confirming",
            Self::Done => "done",
        };
        f.write_str(s)
    }
}

/// Bookkeeping for one invocation. Nothing here is shared between runs.
struct Run<'a> {
    name: &'a str,
    started: Instant,
    deadline: Instant,
    wait_started: Option<Instant>,
    last: Option<ResourceDescriptor>,
    /// A mutating call was retried after a transient failure, so an earlier
    /// attempt may have reached the remote side.
    mutation_retried: bool,
}

impl<'a> Run<'a> {
    fn new(name: &'a str, deadline: Duration) -> Self {
        let started = Instant::now();
        Self {
            name,
            started,
            deadline: started + deadline,
            wait_started: None,
            last: None,
            mutation_retried: false,
        }
    }

    fn enter(&self, phase: Phase) {
        tracing::debug!(name = %self.name, phase = %phase, "reconcile phase");
    }

    fn timeout(&self) -> ReconcileError {
        ReconcileError::ConvergenceTimeout {
            name: self.name.to_string(),
            waited: self.started.elapsed(),
            last: self.last.clone().map(Box::new),
        }
    }

    fn check_deadline(&self) -> Result<(), ReconcileError> {
        if Instant::now() >= self.deadline {
            return Err(self.timeout());
        }
        Ok(())
    }

    /// Sleep for `delay`, unless waking up would land past `limit`.
    async fn sleep(&self, delay: Duration, limit: Instant) -> Result<(), ReconcileError> {
        if Instant::now() + delay >= limit {
            return Err(self.timeout());
        }
        tokio::time::sleep(delay).await;
        Ok(())
    }
}

/// Converges one named capacity provider per call to [`run`](Self::run).
///
/// Holds only the injected gateway and immutable tuning, so a single
/// reconciler can serve concurrent runs for different names. Concurrent runs
/// against the same name are not serialized here.
pub struct Reconciler<G> {
    gateway: G,
    config: ReconcilerConfig,
}

impl<G: RemoteGateway> Reconciler<G> {
    pub fn new(gateway: G, config: ReconcilerConfig) -> Self {
        Self { gateway, config }
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Drive the provider named by `spec` to its desired state.
    ///
    /// Remote calls are strictly sequential. Once `deadline` has elapsed no
    /// further call is issued; a call already in flight is allowed to finish.
    pub async fn run(
        &self,
        spec: &ResourceSpec,
        deadline: Duration,
    ) -> Result<Reconciled, ReconcileError> {
        spec.validate()?;

        let mut run = Run::new(&spec.name, deadline);
        let mut applied: Option<Action> = None;
        let mut presumed: Option<Action> = None;
        let mut replanned_on_conflict = false;

        run.enter(Phase::Describing);
        let mut observed = self.describe(&mut run).await?;

        loop {
            run.enter(Phase::Planning);
            let action = match plan::plan(spec, observed.as_ref())? {
                Plan::NoOp => {
                    run.enter(Phase::Done);
                    let action = applied.or(presumed);
                    return Ok(Reconciled {
                        action: action.unwrap_or(Action::NoOp),
                        changed: action.is_some(),
                        descriptor: observed,
                    });
                }
                Plan::Wait => {
                    run.enter(Phase::Waiting);
                    observed = self
                        .wait_until(&mut run, |o: Option<&ResourceDescriptor>| {
                            o.is_some_and(|d| !d.is_settled())
                        })
                        .await?;
                    continue;
                }
                Plan::Create => Action::Create,
                Plan::Delete => Action::Delete,
            };

            if applied == Some(action) {
                let reason = match observed.as_ref().and_then(|d| d.update_reason.as_deref()) {
                    Some(remote) => format!("{action} did not take effect: {remote}"),
                    None => format!("{action} succeeded but remote state still requires it"),
                };
                return Err(ReconcileError::ConvergenceFailed {
                    name: spec.name.clone(),
                    reason,
                    source: None,
                });
            }

            match self.apply(&mut run, spec, action).await {
                Ok(()) => {
                    applied = Some(action);
                    run.enter(Phase::Confirming);
                    observed = self.confirm(&mut run, action).await?;
                }
                Err(ReconcileError::Remote {
                    source: GatewayError::Conflict(msg),
                    ..
                }) if !replanned_on_conflict => {
                    if run.mutation_retried {
                        tracing::info!(
                            name = %spec.name,
                            action = %action,
                            "conflict after a retried call, assuming an earlier attempt landed"
                        );
                        presumed = Some(action);
                    } else {
                        tracing::warn!(
                            name = %spec.name,
                            error = %msg,
                            "concurrent change detected, re-planning"
                        );
                    }
                    replanned_on_conflict = true;
                    run.enter(Phase::Describing);
                    observed = self.describe(&mut run).await?;
                }
                Err(ReconcileError::Remote {
                    source: source @ GatewayError::Conflict(_),
                    ..
                }) => {
                    return Err(ReconcileError::ConvergenceFailed {
                        name: spec.name.clone(),
                        reason: "conflict persisted after re-plan".into(),
                        source: Some(source),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Describe and plan without mutating anything.
    pub async fn preview(&self, spec: &ResourceSpec) -> Result<Preview, ReconcileError> {
        spec.validate()?;
        let mut run = Run::new(&spec.name, self.config.default_deadline());
        let observed = self.describe(&mut run).await?;
        let plan = plan::plan(spec, observed.as_ref())?;
        let drift = match &observed {
            Some(o) if spec.lifecycle == Lifecycle::Present && !o.is_logically_absent() => {
                drift::diff(spec, o)
            }
            _ => Vec::new(),
        };
        Ok(Preview {
            plan,
            observed,
            drift,
        })
    }

    /// Describe `name`, retrying transient failures.
    pub async fn observe(&self, name: &str) -> Result<Option<ResourceDescriptor>, ReconcileError> {
        let mut run = Run::new(name, self.config.default_deadline());
        self.describe(&mut run).await
    }

    async fn apply(
        &self,
        run: &mut Run<'_>,
        spec: &ResourceSpec,
        action: Action,
    ) -> Result<(), ReconcileError> {
        match action {
            Action::Create => {
                run.enter(Phase::ApplyingCreate);
                let created = self
                    .call(run, CallClass::Create, || self.gateway.create(spec))
                    .await?;
                tracing::info!(name = %spec.name, arn = ?created.arn, "capacity provider created");
            }
            Action::Delete => {
                run.enter(Phase::ApplyingDelete);
                match self
                    .call(run, CallClass::Delete, || self.gateway.delete(&spec.name))
                    .await
                {
                    Ok(()) => tracing::info!(name = %spec.name, "capacity provider deleted"),
                    Err(ReconcileError::Remote {
                        source: GatewayError::NotFound(_),
                        ..
                    }) => {
                        tracing::info!(name = %spec.name, "capacity provider already gone");
                    }
                    Err(e) => return Err(e),
                }
            }
            Action::NoOp => {}
        }
        Ok(())
    }

    /// Re-describe after a mutation. The create/delete response is never
    /// trusted; fields may be eventually consistent.
    async fn confirm(
        &self,
        run: &mut Run<'_>,
        action: Action,
    ) -> Result<Option<ResourceDescriptor>, ReconcileError> {
        // A settled descriptor goes back to planning, even when it reports a
        // failed transition.
        let pending: fn(Option<&ResourceDescriptor>) -> bool = match action {
            Action::Create => |o: Option<&ResourceDescriptor>| o.is_none_or(|d| !d.is_settled()),
            Action::Delete => |o: Option<&ResourceDescriptor>| o.is_some_and(|d| !d.is_settled()),
            Action::NoOp => |_: Option<&ResourceDescriptor>| false,
        };

        let observed = self.describe(run).await?;
        if pending(observed.as_ref()) {
            run.enter(Phase::Waiting);
            return self.wait_until(run, pending).await;
        }
        Ok(observed)
    }

    /// Poll on the backoff schedule while `pending` holds, bounded by the
    /// wait timeout (cumulative per run) and the run deadline.
    async fn wait_until(
        &self,
        run: &mut Run<'_>,
        pending: impl Fn(Option<&ResourceDescriptor>) -> bool,
    ) -> Result<Option<ResourceDescriptor>, ReconcileError> {
        let wait_started = *run.wait_started.get_or_insert_with(Instant::now);
        let limit = (wait_started + self.config.wait_timeout()).min(run.deadline);

        let mut poll = 0;
        loop {
            let delay = self.config.backoff.delay(poll);
            poll += 1;
            run.sleep(delay, limit).await?;

            let observed = self.describe(run).await?;
            if !pending(observed.as_ref()) {
                return Ok(observed);
            }
            tracing::debug!(
                name = %run.name,
                poll,
                status = ?observed.as_ref().map(|d| d.status),
                "still waiting for capacity provider to settle"
            );
        }
    }

    async fn describe(
        &self,
        run: &mut Run<'_>,
    ) -> Result<Option<ResourceDescriptor>, ReconcileError> {
        let name = run.name;
        let observed = self
            .call(run, CallClass::Describe, || self.gateway.describe(name))
            .await?;
        run.last.clone_from(&observed);
        Ok(observed)
    }

    /// Issue one remote call, retrying transient failures with backoff.
    ///
    /// Non-transient gateway errors come back as `ReconcileError::Remote` so
    /// callers can still act on `Conflict` / `NotFound`.
    async fn call<'g, T>(
        &self,
        run: &mut Run<'_>,
        class: CallClass,
        mut op: impl FnMut() -> BoxFuture<'g, Result<T, GatewayError>>,
    ) -> Result<T, ReconcileError> {
        let policy = self.config.backoff;
        let mut attempts = 0;

        loop {
            run.check_deadline()?;
            attempts += 1;

            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && policy.should_retry(attempts) => {
                    let delay = policy.delay(attempts - 1);
                    tracing::warn!(
                        name = %run.name,
                        call = %class,
                        attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "transient remote error, backing off"
                    );
                    if class != CallClass::Describe {
                        run.mutation_retried = true;
                    }
                    run.sleep(delay, run.deadline).await?;
                }
                Err(e) if e.is_transient() => {
                    return Err(ReconcileError::ConvergenceFailed {
                        name: run.name.to_string(),
                        reason: format!("{class} failed after {attempts} attempts"),
                        source: Some(e),
                    });
                }
                Err(source) => return Err(ReconcileError::Remote { call: class, source }),
            }
        }
    }
}

/// One-shot convenience: reconcile `spec` with default tuning.
pub async fn reconcile<G: RemoteGateway>(
    gateway: &G,
    spec: &ResourceSpec,
    deadline: Duration,
) -> Result<Reconciled, ReconcileError> {
    Reconciler::new(gateway, ReconcilerConfig::default())
        .run(spec, deadline)
        .await
}
