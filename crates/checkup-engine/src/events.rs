//! Lifecycle event interface and the tracing-backed default sink

use checkup_core::HealthStatus;
use indexmap::IndexMap;
use serde_json::Value;
use std::cell::OnceCell;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Stable identifying codes for each event kind, so external log processors
/// can filter by event rather than by message text.
pub mod event_id {
    /// Aggregation run started
    pub const PROCESSING_BEGIN: u32 = 100;
    /// Aggregation run completed with a combined status
    pub const PROCESSING_END: u32 = 101;
    /// A single check is about to run
    pub const CHECK_BEGIN: u32 = 102;
    /// A single check completed with an outcome
    pub const CHECK_END: u32 = 103;
    /// A single check faulted unexpectedly
    pub const CHECK_ERROR: u32 = 104;
    /// Diagnostic payload attached to a completed check
    pub const CHECK_DATA: u32 = 105;
}

/// Receives lifecycle events from the runner.
///
/// Injected rather than global so the engine stays testable without a
/// process-wide logging subsystem; [`TracingSink`] is the default.
pub trait EventSink: Send + Sync + fmt::Debug {
    /// A run is starting
    fn processing_begin(&self);

    /// A run completed and its report was assembled
    fn processing_end(&self, status: HealthStatus, duration: Duration);

    /// A check invocation is starting
    fn check_begin(&self, name: &str);

    /// A check invocation completed with an outcome
    fn check_end(
        &self,
        name: &str,
        status: HealthStatus,
        duration: Duration,
        description: Option<&str>,
    );

    /// A check invocation faulted unexpectedly
    fn check_error(&self, name: &str, error: &anyhow::Error, duration: Duration);

    /// Diagnostic payload from a completed check
    fn check_data(&self, name: &str, data: &IndexMap<String, Value>);
}

/// Default sink emitting `tracing` events carrying stable `event_id` fields.
///
/// Check-end severity follows the resulting status: debug for healthy,
/// warning for degraded, error for unhealthy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn processing_begin(&self) {
        debug!(event_id = event_id::PROCESSING_BEGIN, "Running health checks");
    }

    fn processing_end(&self, status: HealthStatus, duration: Duration) {
        debug!(
            event_id = event_id::PROCESSING_END,
            status = %status,
            elapsed_ms = duration.as_millis() as u64,
            "Health check processing completed"
        );
    }

    fn check_begin(&self, name: &str) {
        debug!(
            event_id = event_id::CHECK_BEGIN,
            check = name,
            "Running health check"
        );
    }

    fn check_end(
        &self,
        name: &str,
        status: HealthStatus,
        duration: Duration,
        description: Option<&str>,
    ) {
        let elapsed_ms = duration.as_millis() as u64;
        let description = description.unwrap_or_default();
        match status {
            HealthStatus::Healthy => debug!(
                event_id = event_id::CHECK_END,
                check = name,
                status = %status,
                elapsed_ms,
                description,
                "Health check completed"
            ),
            HealthStatus::Degraded => warn!(
                event_id = event_id::CHECK_END,
                check = name,
                status = %status,
                elapsed_ms,
                description,
                "Health check completed"
            ),
            HealthStatus::Unhealthy => error!(
                event_id = event_id::CHECK_END,
                check = name,
                status = %status,
                elapsed_ms,
                description,
                "Health check completed"
            ),
        }
    }

    fn check_error(&self, name: &str, error: &anyhow::Error, duration: Duration) {
        error!(
            event_id = event_id::CHECK_ERROR,
            check = name,
            elapsed_ms = duration.as_millis() as u64,
            error = %error,
            "Health check failed with an unexpected error"
        );
    }

    fn check_data(&self, name: &str, data: &IndexMap<String, Value>) {
        if data.is_empty() || !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        let payload = DataPayload::new(name, data);
        debug!(
            event_id = event_id::CHECK_DATA,
            check = name,
            data = %payload,
            "Health check data"
        );
    }
}

/// Lazily rendered key/value payload for the check-data event.
///
/// Rendering happens inside `Display` and the result is cached, so the cost
/// is paid at most once and only when a subscriber actually records the
/// event.
struct DataPayload<'a> {
    name: &'a str,
    data: &'a IndexMap<String, Value>,
    rendered: OnceCell<String>,
}

impl<'a> DataPayload<'a> {
    fn new(name: &'a str, data: &'a IndexMap<String, Value>) -> Self {
        Self {
            name,
            data,
            rendered: OnceCell::new(),
        }
    }

    fn render(&self) -> String {
        let mut out = format!("health check data for {}:", self.name);
        for (key, value) in self.data {
            out.push_str("\n    ");
            out.push_str(key);
            out.push_str(": ");
            out.push_str(&value.to_string());
        }
        out
    }
}

impl fmt::Display for DataPayload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rendered.get_or_init(|| self.render()))
    }
}
