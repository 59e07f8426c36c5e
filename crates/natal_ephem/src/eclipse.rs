//! Eclipse detection at syzygies.
//!
//! Lunar: find full moons, locate greatest eclipse (minimum distance of the
//! Moon from the shadow axis), compare against Earth's shadow radii enlarged
//! by the Danjon 2% atmosphere factor.
//!
//! Solar (global): find new moons, locate minimum geocentric Sun-Moon
//! separation and decide whether the penumbra touches Earth at all, and
//! whether the shadow axis does (central eclipse: total or annular).
//!
//! Sources: Meeus, "Astronomical Algorithms", Ch. 54 shadow geometry;
//! IAU 2015 nominal radii.

use natal_core::{
    Body, EclipseEvent, EclipseKind, LunarEclipseKind, ProviderError, SolarEclipseKind,
};

use crate::config::EphemerisConfig;
use crate::orbit::{Spherical, angular_separation};
use crate::planets::geocentric;
use crate::syzygy::{FULL_MOON_DEG, NEW_MOON_DEG, next_syzygy};

/// Earth equatorial radius in km (IAU 2015 Resolution B3).
const EARTH_RADIUS_KM: f64 = 6378.137;

/// Sun nominal radius in km (IAU 2015 Resolution B3).
const SUN_RADIUS_KM: f64 = 696_000.0;

/// Moon mean radius in km (IAU 2015).
const MOON_RADIUS_KM: f64 = 1737.4;

const AU_KM: f64 = 149_597_870.7;

/// Atmospheric enlargement of Earth's shadow (Danjon).
const DANJON_ENLARGEMENT: f64 = 1.02;

/// Moon latitude beyond which no eclipse is possible at a syzygy.
/// Generous; exact geometry filters afterward.
const ECLIPSE_LAT_THRESHOLD_DEG: f64 = 2.0;

/// Half-width of the window searched for greatest eclipse around a syzygy.
const PEAK_WINDOW_DAYS: f64 = 0.3;

const PEAK_ITERATIONS: u32 = 40;

/// Sun and Moon with distances in km.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    sun: Spherical,
    moon: Spherical,
}

impl Geometry {
    fn at(jd_ut: f64) -> Self {
        let sun = geocentric(Body::Sun, jd_ut);
        let moon = geocentric(Body::Moon, jd_ut);
        Self {
            sun: Spherical { r: sun.r * AU_KM, ..sun },
            moon: Spherical { r: moon.r * EARTH_RADIUS_KM, ..moon },
        }
    }

    fn anti_sun(&self) -> Spherical {
        Spherical {
            lon: (self.sun.lon + 180.0).rem_euclid(360.0),
            lat: -self.sun.lat,
            r: self.sun.r,
        }
    }

    fn shadow_offset_deg(&self) -> f64 {
        angular_separation(self.moon, self.anti_sun())
    }

    fn sun_moon_separation_deg(&self) -> f64 {
        angular_separation(self.sun, self.moon)
    }

    fn sun_parallax_deg(&self) -> f64 {
        (EARTH_RADIUS_KM / self.sun.r).asin().to_degrees()
    }

    fn moon_parallax_deg(&self) -> f64 {
        (EARTH_RADIUS_KM / self.moon.r).asin().to_degrees()
    }

    fn sun_radius_deg(&self) -> f64 {
        (SUN_RADIUS_KM / self.sun.r).asin().to_degrees()
    }

    fn moon_radius_deg(&self) -> f64 {
        (MOON_RADIUS_KM / self.moon.r).asin().to_degrees()
    }

    /// Earth shadow radii at the Moon's distance: (penumbral, umbral).
    fn shadow_radii_deg(&self) -> (f64, f64) {
        let pi_sun = self.sun_parallax_deg();
        let pi_moon = self.moon_parallax_deg();
        let s_sun = self.sun_radius_deg();
        (
            DANJON_ENLARGEMENT * (pi_moon + pi_sun + s_sun),
            DANJON_ENLARGEMENT * (pi_moon + pi_sun - s_sun),
        )
    }
}

/// Golden-section search for the minimum of `f` on [a, b].
fn minimize(mut a: f64, mut b: f64, f: impl Fn(f64) -> f64) -> f64 {
    let ratio = (5.0_f64.sqrt() - 1.0) / 2.0;
    let mut c = b - ratio * (b - a);
    let mut d = a + ratio * (b - a);
    let mut fc = f(c);
    let mut fd = f(d);
    for _ in 0..PEAK_ITERATIONS {
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - ratio * (b - a);
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + ratio * (b - a);
            fd = f(d);
        }
    }
    0.5 * (a + b)
}

fn classify_lunar(
    shadow_offset_deg: f64,
    moon_radius_deg: f64,
    umbral_radius_deg: f64,
    penumbral_radius_deg: f64,
) -> Option<LunarEclipseKind> {
    let near_edge = shadow_offset_deg - moon_radius_deg;
    let far_edge = shadow_offset_deg + moon_radius_deg;

    if near_edge >= penumbral_radius_deg {
        None
    } else if far_edge <= umbral_radius_deg {
        Some(LunarEclipseKind::Total)
    } else if near_edge < umbral_radius_deg {
        Some(LunarEclipseKind::Partial)
    } else {
        Some(LunarEclipseKind::Penumbral)
    }
}

/// Global solar eclipse class from geocentric quantities (all degrees).
///
/// Some observer sees an eclipse when the separation is below the sum of
/// the semidiameters plus the parallax difference. The shadow axis meets
/// Earth when the separation is below the parallax difference alone; the
/// Moon's semidiameter is then taken from the axis point on Earth's surface.
fn classify_solar(
    separation_deg: f64,
    sun_radius_deg: f64,
    moon_radius_deg: f64,
    moon_parallax_deg: f64,
    sun_parallax_deg: f64,
) -> Option<SolarEclipseKind> {
    let parallax = moon_parallax_deg - sun_parallax_deg;
    if separation_deg >= sun_radius_deg + moon_radius_deg + parallax {
        return None;
    }
    if separation_deg >= parallax {
        return Some(SolarEclipseKind::Partial);
    }
    let gamma = separation_deg / parallax;
    // Moon distance shrinks by R_earth * sqrt(1 - gamma^2) for the axis observer.
    let moon_dist_earth_radii = 1.0 / moon_parallax_deg.to_radians().sin();
    let topo_dist = moon_dist_earth_radii - (1.0 - gamma * gamma).sqrt();
    let topo_moon_radius = moon_radius_deg.to_radians().sin() * moon_dist_earth_radii / topo_dist;
    if topo_moon_radius.asin().to_degrees() >= sun_radius_deg {
        Some(SolarEclipseKind::Total)
    } else {
        Some(SolarEclipseKind::Annular)
    }
}

fn lunar_eclipse_at(full_moon_jd: f64) -> Option<EclipseEvent> {
    if Geometry::at(full_moon_jd).moon.lat.abs() > ECLIPSE_LAT_THRESHOLD_DEG {
        return None;
    }
    let peak = minimize(
        full_moon_jd - PEAK_WINDOW_DAYS,
        full_moon_jd + PEAK_WINDOW_DAYS,
        |t| Geometry::at(t).shadow_offset_deg(),
    );
    let g = Geometry::at(peak);
    let (penumbral, umbral) = g.shadow_radii_deg();
    classify_lunar(g.shadow_offset_deg(), g.moon_radius_deg(), umbral, penumbral).map(|kind| {
        EclipseEvent {
            kind: EclipseKind::Lunar(kind),
            peak_jd_ut: peak,
        }
    })
}

fn solar_eclipse_at(new_moon_jd: f64) -> Option<EclipseEvent> {
    if Geometry::at(new_moon_jd).moon.lat.abs() > ECLIPSE_LAT_THRESHOLD_DEG {
        return None;
    }
    let peak = minimize(
        new_moon_jd - PEAK_WINDOW_DAYS,
        new_moon_jd + PEAK_WINDOW_DAYS,
        |t| Geometry::at(t).sun_moon_separation_deg(),
    );
    let g = Geometry::at(peak);
    classify_solar(
        g.sun_moon_separation_deg(),
        g.sun_radius_deg(),
        g.moon_radius_deg(),
        g.moon_parallax_deg(),
        g.sun_parallax_deg(),
    )
    .map(|kind| EclipseEvent {
        kind: EclipseKind::Solar(kind),
        peak_jd_ut: peak,
    })
}

fn next_eclipse(
    after_jd_ut: f64,
    target_deg: f64,
    config: &EphemerisConfig,
    classify: fn(f64) -> Option<EclipseEvent>,
) -> Result<Option<EclipseEvent>, ProviderError> {
    if !config.contains(after_jd_ut) {
        return Err(ProviderError::OutOfRange { jd_ut: after_jd_ut });
    }
    let mut search_jd = after_jd_ut;
    for _ in 0..config.max_lunations {
        let syzygy = match next_syzygy(search_jd, target_deg, config) {
            Ok(jd) => jd,
            Err(e) => {
                log::debug!("eclipse search stopped at JD {search_jd:.3}: {e}");
                return Err(e);
            }
        };
        if let Some(event) = classify(syzygy) {
            if event.peak_jd_ut > after_jd_ut {
                return Ok(Some(event));
            }
        }
        search_jd = syzygy + 1.0;
    }
    log::debug!(
        "no eclipse within {} lunations after JD {after_jd_ut:.3}",
        config.max_lunations
    );
    Ok(None)
}

pub(crate) fn next_lunar_eclipse(
    after_jd_ut: f64,
    config: &EphemerisConfig,
) -> Result<Option<EclipseEvent>, ProviderError> {
    next_eclipse(after_jd_ut, FULL_MOON_DEG, config, lunar_eclipse_at)
}

pub(crate) fn next_solar_eclipse(
    after_jd_ut: f64,
    config: &EphemerisConfig,
) -> Result<Option<EclipseEvent>, ProviderError> {
    next_eclipse(after_jd_ut, NEW_MOON_DEG, config, solar_eclipse_at)
}
