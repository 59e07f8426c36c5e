//! Error types for the natal engine.
//!
//! Computations themselves are infallible; these cover configuration
//! loading and the opt-in birth-data boundary check.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NatalError {
    /// A configuration value is out of its allowed range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// Configuration text is not valid TOML for [`EngineConfig`](crate::EngineConfig).
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// Configuration file could not be read.
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),
    /// Birth data failed the boundary check.
    #[error("invalid birth data: {0}")]
    InvalidBirthData(&'static str),
}
