//! Sun and planet positions from mean elements of date.
//!
//! Element rates and perturbation terms follow Paul Schlyter's "How to
//! compute planetary positions". Elements are referred to the ecliptic and
//! equinox of date, so the resulting longitudes are tropical.

use natal_core::Body;

use crate::moon;
use crate::orbit::{Elements, Spherical, cos_d, day_number, sin_d};

/// Pluto's periodic fit is referred to J2000; general precession per day.
const PRECESSION_DEG_PER_DAY: f64 = 3.823_94e-5;

pub(crate) fn sun_elements(d: f64) -> Elements {
    Elements {
        node: 0.0,
        incl: 0.0,
        peri: 282.9404 + 4.709_35e-5 * d,
        axis: 1.0,
        ecc: 0.016_709 - 1.151e-9 * d,
        mean_anomaly: 356.0470 + 0.985_600_258_5 * d,
    }
}

fn planet_elements(body: Body, d: f64) -> Option<Elements> {
    let el = match body {
        Body::Mercury => Elements {
            node: 48.3313 + 3.245_87e-5 * d,
            incl: 7.0047 + 5.00e-8 * d,
            peri: 29.1241 + 1.014_44e-5 * d,
            axis: 0.387_098,
            ecc: 0.205_635 + 5.59e-10 * d,
            mean_anomaly: 168.6562 + 4.092_334_436_8 * d,
        },
        Body::Venus => Elements {
            node: 76.6799 + 2.465_90e-5 * d,
            incl: 3.3946 + 2.75e-8 * d,
            peri: 54.8910 + 1.383_74e-5 * d,
            axis: 0.723_330,
            ecc: 0.006_773 - 1.302e-9 * d,
            mean_anomaly: 48.0052 + 1.602_130_224_4 * d,
        },
        Body::Mars => Elements {
            node: 49.5574 + 2.110_81e-5 * d,
            incl: 1.8497 - 1.78e-8 * d,
            peri: 286.5016 + 2.929_61e-5 * d,
            axis: 1.523_688,
            ecc: 0.093_405 + 2.516e-9 * d,
            mean_anomaly: 18.6021 + 0.524_020_776_6 * d,
        },
        Body::Jupiter => Elements {
            node: 100.4542 + 2.768_54e-5 * d,
            incl: 1.3030 - 1.557e-7 * d,
            peri: 273.8777 + 1.645_05e-5 * d,
            axis: 5.202_56,
            ecc: 0.048_498 + 4.469e-9 * d,
            mean_anomaly: 19.8950 + 0.083_085_300_1 * d,
        },
        Body::Saturn => Elements {
            node: 113.6634 + 2.389_80e-5 * d,
            incl: 2.4886 - 1.081e-7 * d,
            peri: 339.3939 + 2.976_61e-5 * d,
            axis: 9.554_75,
            ecc: 0.055_546 - 9.499e-9 * d,
            mean_anomaly: 316.9670 + 0.033_444_228_2 * d,
        },
        Body::Uranus => Elements {
            node: 74.0005 + 1.3978e-5 * d,
            incl: 0.7733 + 1.9e-8 * d,
            peri: 96.6612 + 3.0565e-5 * d,
            axis: 19.181_71 - 1.55e-8 * d,
            ecc: 0.047_318 + 7.45e-9 * d,
            mean_anomaly: 142.5905 + 0.011_725_806 * d,
        },
        Body::Neptune => Elements {
            node: 131.7806 + 3.0173e-5 * d,
            incl: 1.7700 - 2.55e-7 * d,
            peri: 272.8461 - 6.027e-6 * d,
            axis: 30.058_26 + 3.313e-8 * d,
            ecc: 0.008_606 + 2.15e-9 * d,
            mean_anomaly: 260.2471 + 0.005_995_147 * d,
        },
        Body::Sun | Body::Moon | Body::Pluto => return None,
    };
    Some(el)
}

/// Geocentric Sun: longitude, zero latitude, distance in AU.
pub(crate) fn sun_geocentric(d: f64) -> Spherical {
    sun_elements(d).position()
}

/// Mutual Jupiter/Saturn/Uranus perturbations: (dlon, dlat) in degrees.
fn perturbation(body: Body, d: f64) -> (f64, f64) {
    let mean = |b| planet_elements(b, d).map_or(0.0, |el| el.mean_anomaly);
    let mj = mean(Body::Jupiter);
    let ms = mean(Body::Saturn);
    let mu = mean(Body::Uranus);
    match body {
        Body::Jupiter => (
            -0.332 * sin_d(2.0 * mj - 5.0 * ms - 67.6)
                - 0.056 * sin_d(2.0 * mj - 2.0 * ms + 21.0)
                + 0.042 * sin_d(3.0 * mj - 5.0 * ms + 21.0)
                - 0.036 * sin_d(mj - 2.0 * ms)
                + 0.022 * cos_d(mj - ms)
                + 0.023 * sin_d(2.0 * mj - 3.0 * ms + 52.0)
                - 0.016 * sin_d(mj - 5.0 * ms - 69.0),
            0.0,
        ),
        Body::Saturn => (
            0.812 * sin_d(2.0 * mj - 5.0 * ms - 67.6)
                - 0.229 * cos_d(2.0 * mj - 4.0 * ms - 2.0)
                + 0.119 * sin_d(mj - 2.0 * ms - 3.0)
                + 0.046 * sin_d(2.0 * mj - 6.0 * ms - 69.0)
                + 0.014 * sin_d(mj - 3.0 * ms + 32.0),
            -0.020 * cos_d(2.0 * mj - 4.0 * ms - 2.0) + 0.018 * sin_d(2.0 * mj - 6.0 * ms - 49.0),
        ),
        Body::Uranus => (
            0.040 * sin_d(ms - 2.0 * mu + 6.0)
                + 0.035 * sin_d(ms - 3.0 * mu + 33.0)
                - 0.015 * sin_d(mj - mu + 20.0),
            0.0,
        ),
        _ => (0.0, 0.0),
    }
}

/// Pluto from its periodic fit (valid roughly 1800..2200).
fn pluto_heliocentric(d: f64) -> Spherical {
    let s = 50.03 + 0.033_459_652 * d;
    let p = 238.95 + 0.003_968_789 * d;
    let lon = 238.9508 + 0.004_007_03 * d - 19.799 * sin_d(p) + 19.848 * cos_d(p)
        + 0.897 * sin_d(2.0 * p)
        - 4.956 * cos_d(2.0 * p)
        + 0.610 * sin_d(3.0 * p)
        + 1.211 * cos_d(3.0 * p)
        - 0.341 * sin_d(4.0 * p)
        - 0.190 * cos_d(4.0 * p)
        + 0.128 * sin_d(5.0 * p)
        - 0.034 * cos_d(5.0 * p)
        - 0.038 * sin_d(6.0 * p)
        + 0.031 * cos_d(6.0 * p)
        + 0.020 * sin_d(s - p)
        - 0.010 * cos_d(s - p);
    let lat = -3.9082 - 5.453 * sin_d(p) - 14.975 * cos_d(p) + 3.527 * sin_d(2.0 * p)
        + 1.673 * cos_d(2.0 * p)
        - 1.051 * sin_d(3.0 * p)
        + 0.328 * cos_d(3.0 * p)
        + 0.179 * sin_d(4.0 * p)
        - 0.292 * cos_d(4.0 * p)
        + 0.019 * sin_d(5.0 * p)
        + 0.100 * cos_d(5.0 * p)
        - 0.031 * sin_d(6.0 * p)
        - 0.026 * cos_d(6.0 * p)
        + 0.011 * cos_d(s - p);
    let r = 40.72 + 6.68 * sin_d(p) + 6.90 * cos_d(p) - 1.18 * sin_d(2.0 * p)
        - 0.03 * cos_d(2.0 * p)
        + 0.15 * sin_d(3.0 * p)
        - 0.14 * cos_d(3.0 * p);
    Spherical {
        lon: (lon + PRECESSION_DEG_PER_DAY * d).rem_euclid(360.0),
        lat,
        r,
    }
}

/// Heliocentric ecliptic position of a planet (not Sun/Moon).
fn heliocentric(body: Body, d: f64) -> Option<Spherical> {
    if body == Body::Pluto {
        return Some(pluto_heliocentric(d));
    }
    let mut pos = planet_elements(body, d)?.position();
    let (dlon, dlat) = perturbation(body, d);
    pos.lon = (pos.lon + dlon).rem_euclid(360.0);
    pos.lat += dlat;
    Some(pos)
}

/// Geocentric ecliptic position of `body` at a UT Julian Day.
///
/// Distances are AU for every body except the Moon, which is in Earth radii.
pub(crate) fn geocentric(body: Body, jd_ut: f64) -> Spherical {
    let d = day_number(jd_ut);
    let sun = sun_geocentric(d);
    match body {
        Body::Sun => sun,
        Body::Moon => moon::moon_geocentric(d),
        _ => match heliocentric(body, d) {
            Some(helio) => {
                let h = helio.to_rect();
                let s = sun.to_rect();
                Spherical::from_rect([h[0] + s[0], h[1] + s[1], h[2] + s[2]])
            }
            None => sun,
        },
    }
}
