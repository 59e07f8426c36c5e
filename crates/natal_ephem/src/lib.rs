//! Analytic longitude provider for the natal engine.
//!
//! [`AnalyticEphemeris`] evaluates mean Keplerian elements of date with the
//! principal periodic perturbations, which is good to a few arcminutes over
//! the supported range. On top of it sit a syzygy (new/full moon) search and
//! a geometric eclipse classifier that back the provider's eclipse stepping
//! primitives.

pub mod config;
mod eclipse;
pub mod ephemeris;
mod moon;
mod orbit;
mod planets;
mod syzygy;

pub use config::EphemerisConfig;
pub use ephemeris::{AnalyticEphemeris, EclipticPoint};
