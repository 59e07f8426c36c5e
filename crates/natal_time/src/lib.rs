//! Time helpers for the natal engine.
//!
//! This crate provides:
//! - Julian Day <-> proleptic Gregorian calendar conversion
//! - Greenwich mean sidereal time and local sidereal time
//! - Bridging between `chrono` civil dates/instants and Julian Days
//!
//! All Julian Days here are on the UT scale. The engine works at daily
//! resolution, so the ~70 s UT/TT difference is deliberately ignored.

pub mod civil;
pub mod error;
pub mod julian;
pub mod sidereal;

pub use civil::{civil_to_utc, date_from_jd, jd_from_utc, noon_jd, utc_from_jd};
pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, calendar_to_jd, jd_to_calendar, jd_to_centuries,
};
pub use sidereal::{earth_rotation_angle_deg, gmst_hours, local_sidereal_deg};
