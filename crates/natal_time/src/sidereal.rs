//! Greenwich mean sidereal time and local sidereal time.
//!
//! Inputs are UT Julian Days; the engine treats UTC as UT1 (|DUT1| < 0.9 s
//! is far below daily resolution).
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.

use crate::julian::{DAYS_PER_CENTURY, J2000_JD};

/// Earth Rotation Angle in degrees [0, 360).
///
/// θ = 360° × (0.7790572732640 + 1.00273781191135448 × Du),
/// Du = JD_UT − 2451545.0.
pub fn earth_rotation_angle_deg(jd_ut: f64) -> f64 {
    let du = jd_ut - J2000_JD;
    // Split off whole days so the product keeps full precision.
    let turns = 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * du + du.fract();
    (turns.rem_euclid(1.0)) * 360.0
}

/// Greenwich mean sidereal time in hours [0, 24).
pub fn gmst_hours(jd_ut: f64) -> f64 {
    let t = (jd_ut - J2000_JD) / DAYS_PER_CENTURY;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t2
        - 0.00000044 * t3
        - 0.000029956 * t4
        - 0.0000000368 * t5;

    let deg = earth_rotation_angle_deg(jd_ut) + poly_arcsec / 3600.0;
    deg.rem_euclid(360.0) / 15.0
}

/// Local sidereal time in degrees [0, 360) from GMST hours and east longitude.
pub fn local_sidereal_deg(gmst_hours: f64, east_longitude_deg: f64) -> f64 {
    (gmst_hours * 15.0 + east_longitude_deg).rem_euclid(360.0)
}
