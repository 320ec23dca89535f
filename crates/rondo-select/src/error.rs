//! Error types for rondo-select.

use thiserror::Error;

/// Result type for rondo-select operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when setting up a selection run.
///
/// All variants are construction-time failures. A running selection never
/// errors: contention is resolved by retry and backoff, and a run that
/// exhausts its attempt budget reports a degraded [`Outcome`] instead of
/// failing.
///
/// [`Outcome`]: crate::Outcome
#[derive(Debug, Error)]
pub enum Error {
    /// The ring/quota dimensions are malformed.
    #[error("invalid configuration: {total} actors cannot supply a quota of {required}")]
    InvalidConfiguration { total: usize, required: usize },

    /// The quota exceeds the largest independent set the ring admits.
    ///
    /// Only raised when feasibility checking is enabled on the
    /// [`SelectionConfig`](crate::SelectionConfig).
    #[error("infeasible quota: {required} exceeds the independent-set bound {bound} of a {total}-actor ring")]
    InfeasibleQuota {
        total: usize,
        required: usize,
        bound: usize,
    },
}
