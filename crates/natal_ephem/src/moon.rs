//! Geocentric Moon from mean elements plus the largest periodic terms.
//!
//! The twelve longitude terms (evection, variation, yearly equation, ...)
//! bring the error down to a couple of arcminutes.

use crate::orbit::{Elements, Spherical, cos_d, sin_d};
use crate::planets::sun_elements;

pub(crate) fn moon_elements(d: f64) -> Elements {
    Elements {
        node: 125.1228 - 0.052_953_808_3 * d,
        incl: 5.1454,
        peri: 318.0634 + 0.164_357_322_3 * d,
        axis: 60.2666,
        ecc: 0.054_900,
        mean_anomaly: 115.3654 + 13.064_992_950_9 * d,
    }
}

/// Geocentric ecliptic Moon; `r` in Earth radii.
pub(crate) fn moon_geocentric(d: f64) -> Spherical {
    let moon = moon_elements(d);
    let sun = sun_elements(d);

    let ms = sun.mean_anomaly;
    let mm = moon.mean_anomaly;
    let lm = moon.mean_longitude();
    let ls = sun.mean_longitude();
    let dd = lm - ls;
    let f = lm - moon.node;

    let dlon = -1.274 * sin_d(mm - 2.0 * dd)
        + 0.658 * sin_d(2.0 * dd)
        - 0.186 * sin_d(ms)
        - 0.059 * sin_d(2.0 * mm - 2.0 * dd)
        - 0.057 * sin_d(mm - 2.0 * dd + ms)
        + 0.053 * sin_d(mm + 2.0 * dd)
        + 0.046 * sin_d(2.0 * dd - ms)
        + 0.041 * sin_d(mm - ms)
        - 0.035 * sin_d(dd)
        - 0.031 * sin_d(mm + ms)
        - 0.015 * sin_d(2.0 * f - 2.0 * dd)
        + 0.011 * sin_d(mm - 4.0 * dd);
    let dlat = -0.173 * sin_d(f - 2.0 * dd)
        - 0.055 * sin_d(mm - f - 2.0 * dd)
        - 0.046 * sin_d(mm + f - 2.0 * dd)
        + 0.033 * sin_d(f + 2.0 * dd)
        + 0.017 * sin_d(2.0 * mm + f);
    let dr = -0.58 * cos_d(mm - 2.0 * dd) - 0.46 * cos_d(2.0 * dd);

    let pos = moon.position();
    Spherical {
        lon: (pos.lon + dlon).rem_euclid(360.0),
        lat: pos.lat + dlat,
        r: pos.r + dr,
    }
}
