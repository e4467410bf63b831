//! # Checkup Core
//!
//! Core types and traits for the checkup health-check toolkit.
//!
//! This crate provides the foundational abstractions shared by the engine and
//! by probe implementations:
//! - Health status and probe outcome types
//! - Report entries and the aggregate report
//! - The [`HealthCheck`] probe trait and its execution context
//! - Error types

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod check;
pub mod error;
pub mod outcome;
pub mod registration;
pub mod report;
pub mod scope;
pub mod status;

pub use check::{from_fn, CheckContext, FnCheck, HealthCheck};
pub use error::{Cancelled, Error, Result};
pub use outcome::CheckOutcome;
pub use registration::CheckRegistration;
pub use report::{HealthReport, ReportEntry};
pub use scope::{CheckScope, EmptyScopeProvider, ScopeProvider};
pub use status::HealthStatus;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::check::{from_fn, CheckContext, FnCheck, HealthCheck};
    pub use crate::error::{Cancelled, Error, Result};
    pub use crate::outcome::CheckOutcome;
    pub use crate::registration::CheckRegistration;
    pub use crate::report::{HealthReport, ReportEntry};
    pub use crate::scope::{CheckScope, EmptyScopeProvider, ScopeProvider};
    pub use crate::status::HealthStatus;
}
