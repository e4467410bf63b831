//! Aggregate report types

use crate::outcome::CheckOutcome;
use crate::status::HealthStatus;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Normalized, timed record of one probe invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    /// Status of the probe
    pub status: HealthStatus,
    /// Human-readable summary; the fault message for faulted invocations
    pub description: Option<String>,
    /// Ordered diagnostic payload
    pub data: IndexMap<String, Value>,
    /// Elapsed time of this single invocation
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    /// Fault captured from the invocation, serialized as its message
    #[serde(serialize_with = "error_message")]
    pub error: Option<Arc<anyhow::Error>>,
}

fn error_message<S>(error: &Option<Arc<anyhow::Error>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(error) => serializer.serialize_some(&error.to_string()),
        None => serializer.serialize_none(),
    }
}

impl ReportEntry {
    /// Build an entry from a probe outcome, fields copied verbatim
    pub fn from_outcome(outcome: CheckOutcome, duration: Duration) -> Self {
        Self {
            status: outcome.status,
            description: outcome.description,
            data: outcome.data,
            duration,
            error: outcome.error,
        }
    }

    /// Build an unhealthy entry from an unexpected probe fault
    pub fn from_error(error: anyhow::Error, duration: Duration) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            description: Some(error.to_string()),
            data: IndexMap::new(),
            duration,
            error: Some(Arc::new(error)),
        }
    }
}

/// Immutable aggregate of one run: every recorded entry plus the combined
/// status and total wall-clock time.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    status: HealthStatus,
    #[serde(with = "humantime_serde")]
    total_duration: Duration,
    entries: IndexMap<String, ReportEntry>,
}

impl HealthReport {
    /// Assemble a report; the combined status is the worst entry status, or
    /// healthy when there are no entries
    pub fn new(entries: IndexMap<String, ReportEntry>, total_duration: Duration) -> Self {
        let status = entries
            .values()
            .map(|entry| entry.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);

        Self {
            status,
            total_duration,
            entries,
        }
    }

    /// Combined status across all entries
    pub fn status(&self) -> HealthStatus {
        self.status
    }

    /// Wall-clock time of the whole run, including orchestration overhead
    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    /// Entries keyed by registered name, in completion order
    pub fn entries(&self) -> &IndexMap<String, ReportEntry> {
        &self.entries
    }

    /// Look up an entry by name, case-insensitively
    pub fn get(&self, name: &str) -> Option<&ReportEntry> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, entry)| entry)
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the run recorded no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
