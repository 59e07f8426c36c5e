//! Errors raised by longitude providers.

use thiserror::Error;

/// Provider-side failures.
///
/// Only the eclipse stepping primitives are fallible; longitude, sidereal
/// time and obliquity are total functions.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// The search would leave the provider's supported time range.
    #[error("epoch outside supported range: JD {jd_ut}")]
    OutOfRange { jd_ut: f64 },
    /// An iterative search failed to bracket or converge.
    #[error("no convergence: {0}")]
    NoConvergence(&'static str),
    /// Provider configuration is unusable.
    #[error("invalid provider config: {0}")]
    InvalidConfig(&'static str),
}
