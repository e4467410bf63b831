//! Named probe registrations

use crate::check::HealthCheck;
use std::sync::Arc;
use std::time::Duration;

/// One named health probe, immutable after construction.
///
/// Registrations are cheap to clone and shared between concurrent runs; the
/// engine never mutates them.
#[derive(Debug, Clone)]
pub struct CheckRegistration {
    name: String,
    tags: Vec<String>,
    timeout: Option<Duration>,
    check: Arc<dyn HealthCheck>,
}

impl CheckRegistration {
    /// Register `check` under `name`
    pub fn new(name: impl Into<String>, check: impl HealthCheck + 'static) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            timeout: None,
            check: Arc::new(check),
        }
    }

    /// Attach filtering tags
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Bound the probe's invocation time; expiry is reported as unhealthy
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Registered name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filtering tags, in registration order
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns true if the registration carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Declared invocation timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The probe capability
    pub fn check(&self) -> &dyn HealthCheck {
        self.check.as_ref()
    }
}
