//! The probe trait and its execution context

use crate::outcome::CheckOutcome;
use crate::registration::CheckRegistration;
use crate::scope::CheckScope;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// A health probe.
///
/// Every probe has the same shape: given its execution context and a
/// cancellation token, it produces a [`CheckOutcome`] or fails with a fault.
/// A fault is recorded as an unhealthy entry by the engine, except when it
/// downcasts to [`Cancelled`](crate::error::Cancelled), which aborts the
/// whole run.
#[async_trait]
pub trait HealthCheck: Send + Sync + fmt::Debug {
    /// Run the probe once
    async fn check(
        &self,
        cx: &CheckContext<'_>,
        cancel: CancellationToken,
    ) -> anyhow::Result<CheckOutcome>;
}

/// Execution context handed to a probe for one invocation.
///
/// Exposes the probe's own registration (name, tags, timeout) and the per-run
/// [`CheckScope`] shared read-only by every invocation of the run.
#[derive(Debug)]
pub struct CheckContext<'a> {
    registration: &'a CheckRegistration,
    scope: &'a CheckScope,
}

impl<'a> CheckContext<'a> {
    /// Build a context for one invocation
    pub fn new(registration: &'a CheckRegistration, scope: &'a CheckScope) -> Self {
        Self {
            registration,
            scope,
        }
    }

    /// The registration being invoked
    pub fn registration(&self) -> &CheckRegistration {
        self.registration
    }

    /// Name the probe was registered under
    pub fn name(&self) -> &str {
        self.registration.name()
    }

    /// Shared per-run resources
    pub fn scope(&self) -> &CheckScope {
        self.scope
    }
}

/// Adapter lifting a plain async closure into a [`HealthCheck`].
///
/// For probes that need the context or the cancellation token, implement the
/// trait directly.
pub struct FnCheck<F> {
    f: F,
}

impl<F> fmt::Debug for FnCheck<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCheck").finish_non_exhaustive()
    }
}

/// Wrap an async closure as a probe
pub fn from_fn<F, Fut>(f: F) -> FnCheck<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<CheckOutcome>> + Send,
{
    FnCheck { f }
}

#[async_trait]
impl<F, Fut> HealthCheck for FnCheck<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<CheckOutcome>> + Send,
{
    async fn check(
        &self,
        _cx: &CheckContext<'_>,
        _cancel: CancellationToken,
    ) -> anyhow::Result<CheckOutcome> {
        (self.f)().await
    }
}
