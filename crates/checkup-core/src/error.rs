//! Error types for the checkup toolkit

/// Result type alias using [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Marker fault a probe raises to signal cooperative cancellation.
///
/// The runner downcasts probe faults against this type: a match aborts the
/// whole run instead of being recorded as an unhealthy entry.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("health check invocation was cancelled")]
pub struct Cancelled;

/// Main error type for the checkup toolkit
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two or more checks were registered under the same name
    #[error("duplicate health checks registered with the name(s): {}", .names.join(", "))]
    DuplicateRegistration {
        /// Every name that appeared more than once, compared case-insensitively
        names: Vec<String>,
    },

    /// The run was abandoned because cancellation was requested
    #[error("health check run was cancelled")]
    Cancelled,
}

impl Error {
    /// Returns true if this error represents run abandonment
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
