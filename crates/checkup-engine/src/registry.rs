//! Ordered, name-validated collection of check registrations

use checkup_core::{CheckRegistration, Error, Result};
use std::collections::HashMap;

/// Ordered collection of uniquely named check registrations.
///
/// Name uniqueness is validated eagerly at construction (case-insensitive),
/// so a misconfigured set of checks is rejected before anything executes.
/// After construction the registry is read-only.
#[derive(Debug, Clone, Default)]
pub struct CheckRegistry {
    registrations: Vec<CheckRegistration>,
}

impl CheckRegistry {
    /// Build a registry from registrations in the given order.
    ///
    /// Fails with [`Error::DuplicateRegistration`] naming every duplicated
    /// name when two or more registrations collide case-insensitively.
    pub fn new(registrations: Vec<CheckRegistration>) -> Result<Self> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for registration in &registrations {
            *counts
                .entry(registration.name().to_ascii_lowercase())
                .or_default() += 1;
        }

        // Report duplicates in registration order, first-seen casing, once each.
        let mut duplicates = Vec::new();
        for registration in &registrations {
            let folded = registration.name().to_ascii_lowercase();
            if counts.get(&folded).copied().unwrap_or(0) > 1
                && !duplicates
                    .iter()
                    .any(|name: &String| name.eq_ignore_ascii_case(registration.name()))
            {
                duplicates.push(registration.name().to_string());
            }
        }

        if !duplicates.is_empty() {
            return Err(Error::DuplicateRegistration { names: duplicates });
        }

        Ok(Self { registrations })
    }

    /// Iterate registrations in registration order
    pub fn iter(&self) -> impl Iterator<Item = &CheckRegistration> {
        self.registrations.iter()
    }

    /// Number of registrations
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns true if no checks are registered
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl<'a> IntoIterator for &'a CheckRegistry {
    type Item = &'a CheckRegistration;
    type IntoIter = std::slice::Iter<'a, CheckRegistration>;

    fn into_iter(self) -> Self::IntoIter {
        self.registrations.iter()
    }
}
