//! Probe outcome type

use crate::status::HealthStatus;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

/// The raw result a probe returns from a completed invocation.
///
/// Diagnostic `data` preserves insertion order so payloads read the way the
/// probe wrote them.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Status reported by the probe
    pub status: HealthStatus,
    /// Optional human-readable summary
    pub description: Option<String>,
    /// Ordered diagnostic payload
    pub data: IndexMap<String, Value>,
    /// Error that led the probe to report a non-healthy status, if any
    pub error: Option<Arc<anyhow::Error>>,
}

impl CheckOutcome {
    /// Create an outcome with the given status and nothing else
    pub fn new(status: HealthStatus) -> Self {
        Self {
            status,
            description: None,
            data: IndexMap::new(),
            error: None,
        }
    }

    /// Create a healthy outcome
    pub fn healthy() -> Self {
        Self::new(HealthStatus::Healthy)
    }

    /// Create a degraded outcome
    pub fn degraded() -> Self {
        Self::new(HealthStatus::Degraded)
    }

    /// Create an unhealthy outcome
    pub fn unhealthy() -> Self {
        Self::new(HealthStatus::Unhealthy)
    }

    /// Set the human-readable summary
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append one diagnostic key/value pair
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Attach the error behind a deliberately non-healthy outcome
    pub fn with_error(mut self, error: anyhow::Error) -> Self {
        self.error = Some(Arc::new(error));
        self
    }
}
