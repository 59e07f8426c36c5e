//! A body's longitude together with its derived sign placement.

use natal_core::Body;
use serde::Serialize;

use crate::angle::normalize_360;
use crate::zodiac::{Dms, ZodiacSign, deg_to_dms, sign_from_longitude};

/// Where a body sits on the ecliptic.
///
/// Only constructible from `(body, longitude)`, so sign and degree can
/// never disagree with the longitude they were derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanetPosition {
    body: Body,
    longitude: f64,
    sign: ZodiacSign,
    degree_in_sign: f64,
}

impl PlanetPosition {
    pub fn new(body: Body, longitude_deg: f64) -> Self {
        let longitude = normalize_360(longitude_deg);
        let placement = sign_from_longitude(longitude);
        Self {
            body,
            longitude,
            sign: placement.sign,
            degree_in_sign: placement.degree_in_sign,
        }
    }

    pub fn body(&self) -> Body {
        self.body
    }

    /// Ecliptic longitude in [0, 360).
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn sign(&self) -> ZodiacSign {
        self.sign
    }

    /// Degrees within the sign, [0, 30).
    pub fn degree_in_sign(&self) -> f64 {
        self.degree_in_sign
    }

    pub fn dms(&self) -> Dms {
        deg_to_dms(self.degree_in_sign)
    }
}
