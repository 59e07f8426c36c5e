//! The analytic [`LongitudeProvider`].

use natal_core::{Body, EclipseEvent, LongitudeProvider, ProviderError};
use natal_time::{DAYS_PER_CENTURY, J2000_JD, gmst_hours};

use crate::config::EphemerisConfig;
use crate::eclipse;
use crate::planets::geocentric;

/// Kilometres per Earth equatorial radius, over kilometres per AU.
const EARTH_RADIUS_AU: f64 = 6378.137 / 149_597_870.7;

/// Geocentric ecliptic coordinates of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPoint {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub distance_au: f64,
}

/// Closed-form ephemeris good to a few arcminutes.
///
/// Longitudes, sidereal time and obliquity are defined for any instant;
/// only the eclipse searches are bounded by [`EphemerisConfig`]'s range.
#[derive(Debug, Clone, Default)]
pub struct AnalyticEphemeris {
    config: EphemerisConfig,
}

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EphemerisConfig) -> Result<Self, ProviderError> {
        config.validate().map_err(ProviderError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EphemerisConfig {
        &self.config
    }

    /// Full geocentric position of `body`.
    pub fn ecliptic(&self, body: Body, jd_ut: f64) -> EclipticPoint {
        let pos = geocentric(body, jd_ut);
        let distance_au = if body == Body::Moon {
            pos.r * EARTH_RADIUS_AU
        } else {
            pos.r
        };
        EclipticPoint {
            longitude_deg: pos.lon,
            latitude_deg: pos.lat,
            distance_au,
        }
    }
}

/// Mean obliquity of the ecliptic (IAU 1980), degrees.
pub fn mean_obliquity_deg(jd_ut: f64) -> f64 {
    let t = (jd_ut - J2000_JD) / DAYS_PER_CENTURY;
    let arcsec = 84_381.448 - 46.8150 * t - 0.000_59 * t * t + 0.001_813 * t * t * t;
    arcsec / 3600.0
}

impl LongitudeProvider for AnalyticEphemeris {
    fn longitude(&self, body: Body, jd_ut: f64) -> f64 {
        geocentric(body, jd_ut).lon
    }

    fn sidereal_time_hours(&self, jd_ut: f64) -> f64 {
        gmst_hours(jd_ut)
    }

    fn mean_obliquity_deg(&self, jd_ut: f64) -> f64 {
        mean_obliquity_deg(jd_ut)
    }

    fn next_lunar_eclipse(&self, after_jd_ut: f64) -> Result<Option<EclipseEvent>, ProviderError> {
        eclipse::next_lunar_eclipse(after_jd_ut, &self.config)
    }

    fn next_solar_eclipse(&self, after_jd_ut: f64) -> Result<Option<EclipseEvent>, ProviderError> {
        eclipse::next_solar_eclipse(after_jd_ut, &self.config)
    }
}
