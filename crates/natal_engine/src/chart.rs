//! Natal chart construction and the Ascendant.
//!
//! Ascendant formula (Meeus, "Astronomical Algorithms", Ch. 14):
//! `Asc = atan2(cos LST, -(sin LST cos eps + tan phi sin eps))`
//! with LST the local sidereal time, eps the mean obliquity and phi the
//! geographic latitude. The sign convention puts 0h LST at the equator on
//! 0 Cancer; swapping it silently moves the Ascendant by 180 degrees.

use chrono::{DateTime, Utc};
use natal_core::{ALL_BODIES, Body, LongitudeProvider};
use natal_time::{jd_from_utc, local_sidereal_deg};
use serde::Serialize;

use crate::angle::normalize_360;
use crate::aspect::{Aspect, detect_aspects};
use crate::birth::BirthData;
use crate::orbs::OrbTable;
use crate::position::PlanetPosition;
use crate::trace::trace_step;
use crate::zodiac::{ZodiacSign, sign_from_longitude};

/// Longitudes of all ten bodies at one instant, in canonical body order.
pub type Sky = [PlanetPosition; 10];

/// The rising point, or its Sun-sign stand-in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ascendant {
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub degree_in_sign: f64,
    /// True when this is the Sun-sign fallback rather than a computed
    /// Ascendant.
    pub is_approximate: bool,
}

impl Ascendant {
    fn at(longitude: f64, is_approximate: bool) -> Self {
        let longitude = normalize_360(longitude);
        let placement = sign_from_longitude(longitude);
        Self {
            longitude,
            sign: placement.sign,
            degree_in_sign: placement.degree_in_sign,
            is_approximate,
        }
    }
}

/// Planetary snapshot at birth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NatalChart {
    instant: DateTime<Utc>,
    positions: Sky,
    ascendant: Option<Ascendant>,
}

impl NatalChart {
    /// Birth instant in UTC.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn jd_ut(&self) -> f64 {
        jd_from_utc(&self.instant)
    }

    /// All ten positions in canonical body order.
    pub fn positions(&self) -> &[PlanetPosition] {
        &self.positions
    }

    pub fn position(&self, body: Body) -> &PlanetPosition {
        &self.positions[body.index() as usize]
    }

    pub fn sun(&self) -> &PlanetPosition {
        self.position(Body::Sun)
    }

    /// The computed Ascendant; `None` without birth time and coordinates.
    pub fn ascendant(&self) -> Option<&Ascendant> {
        self.ascendant.as_ref()
    }

    /// The Ascendant, or the Sun's position flagged `is_approximate`.
    pub fn rising(&self) -> Ascendant {
        self.ascendant
            .unwrap_or_else(|| Ascendant::at(self.sun().longitude(), true))
    }

    /// Natal-natal aspects.
    pub fn aspects(&self, table: &OrbTable) -> Vec<Aspect> {
        detect_aspects(&self.positions, table)
    }
}

/// Ecliptic longitude of the Ascendant in degrees [0, 360).
pub fn ascendant_longitude(lst_deg: f64, obliquity_deg: f64, latitude_deg: f64) -> f64 {
    let lst = lst_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    let phi = latitude_deg.to_radians();
    let asc = f64::atan2(
        lst.cos(),
        -(lst.sin() * eps.cos() + phi.tan() * eps.sin()),
    );
    normalize_360(asc.to_degrees())
}

/// All ten positions at a UT Julian Day, one provider call per body.
pub fn sky_at(provider: &dyn LongitudeProvider, jd_ut: f64) -> Sky {
    ALL_BODIES.map(|body| PlanetPosition::new(body, provider.longitude(body, jd_ut)))
}

/// Build the natal chart for `birth`.
pub fn build_chart(provider: &dyn LongitudeProvider, birth: &BirthData) -> NatalChart {
    let instant = birth.resolve_utc();
    let jd = jd_from_utc(&instant);
    let positions = sky_at(provider, jd);

    let ascendant = match (birth.time, birth.coordinates()) {
        (Some(_), Some((lat, lon))) => {
            let lst = local_sidereal_deg(provider.sidereal_time_hours(jd), lon);
            let eps = provider.mean_obliquity_deg(jd);
            Some(Ascendant::at(ascendant_longitude(lst, eps, lat), false))
        }
        _ => None,
    };
    trace_step!(
        "chart at JD {jd:.5}: sun {:.3}, ascendant {:?}",
        positions[0].longitude(),
        ascendant.map(|a| a.longitude)
    );

    NatalChart {
        instant,
        positions,
        ascendant,
    }
}
