//! Fluent registration builder

use crate::registry::CheckRegistry;
use checkup_core::{CheckRegistration, HealthCheck, Result};

/// Builder for assembling a [`CheckRegistry`] programmatically.
///
/// Registration order is preserved; duplicate-name validation happens once at
/// [`build`](RegistryBuilder::build).
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registrations: Vec<CheckRegistration>,
}

impl RegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `check` under `name`
    pub fn add(self, name: impl Into<String>, check: impl HealthCheck + 'static) -> Self {
        self.register(CheckRegistration::new(name, check))
    }

    /// Register a fully configured registration (tags, timeout)
    pub fn register(mut self, registration: CheckRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    /// Validate names and build the registry
    pub fn build(self) -> Result<CheckRegistry> {
        CheckRegistry::new(self.registrations)
    }
}
