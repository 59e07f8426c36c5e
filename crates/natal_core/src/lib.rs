//! Shared vocabulary between the natal engine and its longitude providers.
//!
//! The engine never computes orbital mechanics itself. It consumes a
//! [`LongitudeProvider`]: a reentrant, pure function of `(body, instant)`
//! plus sidereal time, obliquity and an eclipse stepping primitive.
//! Concrete providers (analytic series, JPL kernels, test fixtures) live
//! in downstream crates.

pub mod body;
pub mod eclipse;
pub mod error;
pub mod provider;

pub use body::{ALL_BODIES, Body};
pub use eclipse::{EclipseEvent, EclipseFamily, EclipseKind, LunarEclipseKind, SolarEclipseKind};
pub use error::ProviderError;
pub use provider::{EclipseIter, LongitudeProvider, lunar_eclipses_from, solar_eclipses_from};
