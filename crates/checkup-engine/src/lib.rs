//! # Checkup Engine
//!
//! Sequential health-check execution and aggregation:
//! - Name-validated check registry with a fluent builder
//! - Registration-order runner with a shared per-run dependency scope
//! - Cancellation-aware invocation with per-check timeouts
//! - Structured lifecycle events with stable identifying codes
//!
//! The runner walks the registry, drives each probe with isolation and
//! timing, classifies faults, and folds the entries into one immutable
//! [`HealthReport`](checkup_core::HealthReport) with a deterministic combined
//! status.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod builder;
pub mod checks;
pub mod events;
pub mod registry;
pub mod runner;
pub mod stopwatch;

pub use builder::RegistryBuilder;
pub use events::{event_id, EventSink, TracingSink};
pub use registry::CheckRegistry;
pub use runner::CheckRunner;
pub use stopwatch::Stopwatch;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::builder::RegistryBuilder;
    pub use crate::checks::TcpCheck;
    pub use crate::events::{event_id, EventSink, TracingSink};
    pub use crate::registry::CheckRegistry;
    pub use crate::runner::CheckRunner;
    pub use crate::stopwatch::Stopwatch;
    pub use checkup_core::prelude::*;
}
