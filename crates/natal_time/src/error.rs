//! Error types for time conversions.

use thiserror::Error;

/// Errors from Julian Day -> calendar conversions.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Julian Day is NaN or infinite.
    #[error("julian day must be finite")]
    NonFinite,
    /// Julian Day maps to a date chrono cannot represent.
    #[error("julian day {jd} is outside the representable calendar range")]
    OutOfRange { jd: f64 },
}
