//! Sequential check execution and report aggregation

use crate::events::{EventSink, TracingSink};
use crate::registry::CheckRegistry;
use crate::stopwatch::Stopwatch;
use checkup_core::{
    Cancelled, CheckContext, CheckOutcome, CheckRegistration, CheckScope, EmptyScopeProvider,
    Error, HealthReport, ReportEntry, Result, ScopeProvider,
};
use indexmap::IndexMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Executes registered checks sequentially and folds their results into a
/// single [`HealthReport`].
///
/// Checks run in registration order, one at a time; a slow probe delays the
/// run, bounded only by the registration's own timeout and the caller's
/// cancellation token. A probe fault never escapes the runner: it becomes an
/// unhealthy entry while sibling checks still execute. The runner is cheap to
/// clone and safe to share; concurrent runs over the same registry are fine.
#[derive(Debug, Clone)]
pub struct CheckRunner {
    registry: CheckRegistry,
    scopes: Arc<dyn ScopeProvider>,
    sink: Arc<dyn EventSink>,
}

impl CheckRunner {
    /// Create a runner with an empty per-run scope and the tracing sink
    pub fn new(registry: CheckRegistry) -> Self {
        Self {
            registry,
            scopes: Arc::new(EmptyScopeProvider),
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the event sink
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Replace the per-run scope provider
    pub fn with_scope_provider(mut self, provider: impl ScopeProvider + 'static) -> Self {
        self.scopes = Arc::new(provider);
        self
    }

    /// The registry this runner executes
    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// Run every registered check.
    ///
    /// Returns [`Error::Cancelled`] without a report if `cancel` triggers
    /// before a check begins or a probe raises a cancellation fault.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<HealthReport> {
        self.run_filtered(|_| true, cancel).await
    }

    /// Run only the checks accepted by `predicate`.
    ///
    /// Rejected registrations are skipped entirely: no entry is recorded and
    /// no per-check events fire.
    pub async fn run_filtered<F>(
        &self,
        mut predicate: F,
        cancel: &CancellationToken,
    ) -> Result<HealthReport>
    where
        F: FnMut(&CheckRegistration) -> bool,
    {
        // Scope lives for the whole run and is dropped on every exit path,
        // including cancellation.
        let scope = self.scopes.create_scope();

        let mut entries = IndexMap::with_capacity(self.registry.len());
        let mut total = Stopwatch::start_new();
        self.sink.processing_begin();

        for registration in self.registry.iter() {
            if !predicate(registration) {
                continue;
            }
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let entry = self.invoke(registration, &scope, cancel).await?;
            // Registry names are unique, so no entry is ever overwritten.
            entries.insert(registration.name().to_string(), entry);
        }

        total.stop();
        let report = HealthReport::new(entries, total.elapsed());
        self.sink
            .processing_end(report.status(), report.total_duration());
        Ok(report)
    }

    /// Invoke a single registration and normalize its outcome or fault.
    async fn invoke(
        &self,
        registration: &CheckRegistration,
        scope: &CheckScope,
        cancel: &CancellationToken,
    ) -> Result<ReportEntry> {
        let cx = CheckContext::new(registration, scope);
        let mut watch = Stopwatch::start_new();
        self.sink.check_begin(registration.name());

        let outcome = invoke_probe(registration, &cx, cancel).await;
        watch.stop();
        let duration = watch.elapsed();

        match outcome {
            Ok(outcome) => {
                let entry = ReportEntry::from_outcome(outcome, duration);
                self.sink.check_end(
                    registration.name(),
                    entry.status,
                    duration,
                    entry.description.as_deref(),
                );
                if !entry.data.is_empty() {
                    self.sink.check_data(registration.name(), &entry.data);
                }
                Ok(entry)
            }
            Err(fault) if fault.is::<Cancelled>() => Err(Error::Cancelled),
            Err(fault) => {
                self.sink
                    .check_error(registration.name(), &fault, duration);
                Ok(ReportEntry::from_error(fault, duration))
            }
        }
    }
}

/// Drive the probe itself, enforcing the registration's declared timeout.
async fn invoke_probe(
    registration: &CheckRegistration,
    cx: &CheckContext<'_>,
    cancel: &CancellationToken,
) -> anyhow::Result<CheckOutcome> {
    let probe = registration.check().check(cx, cancel.clone());
    match registration.timeout() {
        Some(limit) => match tokio::time::timeout(limit, probe).await {
            Ok(result) => result,
            Err(_) => Err(anyhow::anyhow!(
                "health check timed out after {}ms",
                limit.as_millis()
            )),
        },
        None => probe.await,
    }
}
