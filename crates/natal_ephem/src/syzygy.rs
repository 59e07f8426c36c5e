//! New/full moon search.
//!
//! Coarse scan + bisection on f(t) = normalize(lon_moon(t) - lon_sun(t) - target),
//! wrapped to [-180, +180] so zero-crossings are the target elongation.

use natal_core::{Body, ProviderError};

use crate::config::EphemerisConfig;
use crate::orbit::normalize_to_pm180;
use crate::planets::geocentric;

/// Elongation of a new moon.
pub(crate) const NEW_MOON_DEG: f64 = 0.0;

/// Elongation of a full moon.
pub(crate) const FULL_MOON_DEG: f64 = 180.0;

/// Longest gap between successive syzygies of one kind (~29.8 d) plus slack.
const MAX_SCAN_DAYS: f64 = 35.0;

fn elongation_offset(jd_ut: f64, target_deg: f64) -> f64 {
    let moon = geocentric(Body::Moon, jd_ut).lon;
    let sun = geocentric(Body::Sun, jd_ut).lon;
    normalize_to_pm180(moon - sun - target_deg)
}

/// A sign change is genuine unless it's the +180/-180 wrap.
fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 270.0
}

fn bisect(
    mut t_a: f64,
    mut f_a: f64,
    mut t_b: f64,
    target_deg: f64,
    config: &EphemerisConfig,
) -> f64 {
    for _ in 0..config.max_iterations {
        let t_mid = 0.5 * (t_a + t_b);
        let f_mid = elongation_offset(t_mid, target_deg);
        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }
        if (t_b - t_a).abs() < config.convergence_days {
            break;
        }
    }
    0.5 * (t_a + t_b)
}

/// First instant after `after_jd_ut` at which the Moon-Sun elongation
/// equals `target_deg`.
pub(crate) fn next_syzygy(
    after_jd_ut: f64,
    target_deg: f64,
    config: &EphemerisConfig,
) -> Result<f64, ProviderError> {
    let step = config.syzygy_step_days;
    let max_steps = (MAX_SCAN_DAYS / step).ceil() as usize;

    let mut t_prev = after_jd_ut;
    let mut f_prev = elongation_offset(t_prev, target_deg);
    for _ in 0..max_steps {
        let t_curr = t_prev + step;
        if t_curr > config.max_jd_ut {
            return Err(ProviderError::OutOfRange { jd_ut: t_curr });
        }
        let f_curr = elongation_offset(t_curr, target_deg);
        if is_genuine_crossing(f_prev, f_curr) {
            return Ok(bisect(t_prev, f_prev, t_curr, target_deg, config));
        }
        t_prev = t_curr;
        f_prev = f_curr;
    }
    Err(ProviderError::NoConvergence("syzygy not bracketed"))
}
