//! Circular angle arithmetic.
//!
//! [`orb`] is the single tolerance metric used by every aspect, transit,
//! and eclipse computation in the crate.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-17 + 360 rounds to 360
    if r >= 360.0 { 0.0 } else { r }
}

/// Shortest angular separation between two longitudes, in [0, 180].
pub fn circular_diff(a: f64, b: f64) -> f64 {
    let d = (normalize_360(a) - normalize_360(b)).abs();
    if d > 180.0 { 360.0 - d } else { d }
}

/// Deviation of the separation of `a` and `b` from `target_angle`.
pub fn orb(a: f64, b: f64, target_angle: f64) -> f64 {
    (circular_diff(a, b) - target_angle).abs()
}

/// Signed difference `a - b` wrapped to (-180, 180].
///
/// Positive when `a` lies ahead of `b` in the direction of increasing
/// longitude.
pub fn signed_diff(a: f64, b: f64) -> f64 {
    let d = normalize_360(a - b);
    if d > 180.0 { d - 360.0 } else { d }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn normalize_zero() {
        assert!((normalize_360(0.0) - 0.0).abs() < EPS);
    }

    #[test]
    fn normalize_360_wraps() {
        assert!((normalize_360(360.0) - 0.0).abs() < EPS);
    }

    #[test]
    fn normalize_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < EPS);
    }

    #[test]
    fn normalize_large() {
        assert!((normalize_360(730.0) - 10.0).abs() < EPS);
        assert!((normalize_360(-370.0) - 350.0).abs() < EPS);
    }

    #[test]
    fn normalize_tiny_negative_stays_in_range() {
        let r = normalize_360(-1e-17);
        assert!((0.0..360.0).contains(&r), "r = {r}");
    }

    #[test]
    fn normalize_periodic() {
        for &x in &[0.0, 12.5, 179.99, 359.5, -45.25] {
            for k in -3..=3 {
                let shifted = normalize_360(x + 360.0 * f64::from(k));
                assert!(
                    (shifted - normalize_360(x)).abs() < 1e-9,
                    "x = {x}, k = {k}: {shifted}"
                );
            }
        }
    }

    #[test]
    fn circular_diff_across_zero() {
        assert!((circular_diff(350.0, 10.0) - 20.0).abs() < EPS);
        assert!((circular_diff(10.0, 350.0) - 20.0).abs() < EPS);
    }

    #[test]
    fn circular_diff_max_is_180() {
        assert!((circular_diff(0.0, 180.0) - 180.0).abs() < EPS);
        assert!((circular_diff(90.0, 270.0) - 180.0).abs() < EPS);
    }

    #[test]
    fn orb_symmetric() {
        let samples = [0.0, 3.7, 95.0, 181.2, 285.0, 359.9, -20.0, 725.0];
        for &a in &samples {
            for &b in &samples {
                for &target in &[0.0, 60.0, 90.0, 120.0, 180.0] {
                    let (ab, ba) = (orb(a, b, target), orb(b, a, target));
                    assert_eq!(ab, ba, "a={a} b={b} t={target}");
                }
            }
        }
    }

    #[test]
    fn orb_of_trine() {
        assert!((orb(10.0, 128.0, 120.0) - 2.0).abs() < EPS);
    }

    #[test]
    fn signed_diff_direction() {
        assert!((signed_diff(10.0, 350.0) - 20.0).abs() < EPS);
        assert!((signed_diff(350.0, 10.0) + 20.0).abs() < EPS);
        assert!((signed_diff(180.0, 0.0) - 180.0).abs() < EPS);
    }
}
