#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use ecscp_provisioner::{
    BoxFuture, GatewayError, ManagedScaling, RemoteGateway, ResourceDescriptor, ResourceSpec,
    ResourceStatus, TerminationProtection, UpdateStatus,
};

/// In-memory stand-in for the remote side.
///
/// Holds one stored provider. Scripted responses, when queued, are served
/// before falling back to the stored state.
#[derive(Clone, Default)]
pub struct FakeGateway {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    stored: Option<ResourceDescriptor>,
    describe_script: VecDeque<Result<Option<ResourceDescriptor>, GatewayError>>,
    create_errors: VecDeque<GatewayError>,
    delete_errors: VecDeque<GatewayError>,
    calls: Calls,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calls {
    pub describe: usize,
    pub create: usize,
    pub delete: usize,
}

impl Calls {
    pub fn mutating(&self) -> usize {
        self.create + self.delete
    }

    pub fn total(&self) -> usize {
        self.describe + self.create + self.delete
    }
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stored(descriptor: ResourceDescriptor) -> Self {
        let gw = Self::default();
        gw.inner.lock().unwrap().stored = Some(descriptor);
        gw
    }

    pub fn stored(&self) -> Option<ResourceDescriptor> {
        self.inner.lock().unwrap().stored.clone()
    }

    pub fn script_describe(&self, response: Result<Option<ResourceDescriptor>, GatewayError>) {
        self.inner
            .lock()
            .unwrap()
            .describe_script
            .push_back(response);
    }

    pub fn fail_create(&self, err: GatewayError) {
        self.inner.lock().unwrap().create_errors.push_back(err);
    }

    pub fn fail_delete(&self, err: GatewayError) {
        self.inner.lock().unwrap().delete_errors.push_back(err);
    }

    pub fn calls(&self) -> Calls {
        self.inner.lock().unwrap().calls
    }
}

impl RemoteGateway for FakeGateway {
    fn describe<'a>(
        &'a self,
        _name: &'a str,
    ) -> BoxFuture<'a, Result<Option<ResourceDescriptor>, GatewayError>> {
        Box::pin(async move {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.describe += 1;
            match inner.describe_script.pop_front() {
                Some(response) => response,
                None => Ok(inner.stored.clone()),
            }
        })
    }

    fn create<'a>(
        &'a self,
        spec: &'a ResourceSpec,
    ) -> BoxFuture<'a, Result<ResourceDescriptor, GatewayError>> {
        Box::pin(async move {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.create += 1;
            if let Some(err) = inner.create_errors.pop_front() {
                return Err(err);
            }
            let created = active(spec);
            inner.stored = Some(created.clone());
            Ok(created)
        })
    }

    fn delete<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<(), GatewayError>> {
        Box::pin(async move {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.delete += 1;
            if let Some(err) = inner.delete_errors.pop_front() {
                return Err(err);
            }
            match inner.stored.take() {
                Some(_) => Ok(()),
                None => Err(GatewayError::NotFound(name.to_string())),
            }
        })
    }
}

/// What the remote side reports for a freshly created provider.
pub fn active(spec: &ResourceSpec) -> ResourceDescriptor {
    ResourceDescriptor {
        name: spec.name.clone(),
        arn: Some(format!(
            "arn:aws:ecs:us-west-2:123456789012:capacity-provider/{}",
            spec.name
        )),
        status: ResourceStatus::Active,
        backing_group_ref: spec.backing_group_ref.clone(),
        termination_protection: match spec.termination_protection {
            TerminationProtection::Unset => TerminationProtection::Disabled,
            other => other,
        },
        managed_scaling: spec.managed_scaling,
        update_status: UpdateStatus::None,
        update_reason: None,
    }
}

pub fn with_status(
    mut descriptor: ResourceDescriptor,
    status: ResourceStatus,
    update_status: UpdateStatus,
) -> ResourceDescriptor {
    descriptor.status = status;
    descriptor.update_status = update_status;
    descriptor
}

pub const GROUP_X: &str = "arn:aws:autoscaling:us-west-2:123456789012:autoScalingGroup:uuid:autoScalingGroupName/grp-x";
pub const GROUP_Y: &str = "arn:aws:autoscaling:us-west-2:123456789012:autoScalingGroup:uuid:autoScalingGroupName/grp-y";

pub fn scaling() -> ManagedScaling {
    ManagedScaling {
        enabled: true,
        target_capacity_percent: 75,
        min_step_size: 1,
        max_step_size: 10,
        warmup_period_seconds: 300,
    }
}

pub fn cp1() -> ResourceSpec {
    ResourceSpec {
        managed_scaling: Some(scaling()),
        ..ResourceSpec::present("cp-1", GROUP_X)
    }
}
