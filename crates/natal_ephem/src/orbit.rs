//! Keplerian orbit evaluation and spherical/rectangular conversion.
//!
//! Angles are degrees unless a name says otherwise.

/// Day number of the element epoch: d = 0 at 1999-12-31 00:00 UT.
const ELEMENT_EPOCH_JD: f64 = 2_451_543.5;

const KEPLER_MAX_ITER: u32 = 30;
const KEPLER_TOLERANCE_RAD: f64 = 1e-12;

/// Days since the element epoch.
pub(crate) fn day_number(jd_ut: f64) -> f64 {
    jd_ut - ELEMENT_EPOCH_JD
}

pub(crate) fn sin_d(deg: f64) -> f64 {
    deg.to_radians().sin()
}

pub(crate) fn cos_d(deg: f64) -> f64 {
    deg.to_radians().cos()
}

/// Normalize an angle to [-180, +180].
pub(crate) fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Ecliptic spherical coordinates: longitude, latitude, radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Spherical {
    pub lon: f64,
    pub lat: f64,
    pub r: f64,
}

impl Spherical {
    pub(crate) fn to_rect(self) -> [f64; 3] {
        let (cl, sl) = (cos_d(self.lat), sin_d(self.lat));
        [
            self.r * cl * cos_d(self.lon),
            self.r * cl * sin_d(self.lon),
            self.r * sl,
        ]
    }

    pub(crate) fn from_rect(v: [f64; 3]) -> Self {
        let [x, y, z] = v;
        Self {
            lon: y.atan2(x).to_degrees().rem_euclid(360.0),
            lat: z.atan2(x.hypot(y)).to_degrees(),
            r: (x * x + y * y + z * z).sqrt(),
        }
    }
}

/// Angular separation between two ecliptic directions, in degrees.
pub(crate) fn angular_separation(a: Spherical, b: Spherical) -> f64 {
    let ua = Spherical { r: 1.0, ..a }.to_rect();
    let ub = Spherical { r: 1.0, ..b }.to_rect();
    let cross = [
        ua[1] * ub[2] - ua[2] * ub[1],
        ua[2] * ub[0] - ua[0] * ub[2],
        ua[0] * ub[1] - ua[1] * ub[0],
    ];
    let sin_sq = cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2];
    let sin = sin_sq.sqrt();
    let cos = ua[0] * ub[0] + ua[1] * ub[1] + ua[2] * ub[2];
    sin.atan2(cos).to_degrees()
}

/// Mean orbital elements of date.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Elements {
    /// Longitude of the ascending node.
    pub node: f64,
    /// Inclination to the ecliptic.
    pub incl: f64,
    /// Argument of perihelion.
    pub peri: f64,
    /// Semi-major axis (AU, or Earth radii for the Moon).
    pub axis: f64,
    pub ecc: f64,
    /// Mean anomaly.
    pub mean_anomaly: f64,
}

/// Solve Kepler's equation E - e sin E = M by Newton iteration.
/// Returns E in radians.
pub(crate) fn eccentric_anomaly(mean_anomaly_deg: f64, ecc: f64) -> f64 {
    let m = mean_anomaly_deg.rem_euclid(360.0).to_radians();
    let mut e_anom = m + ecc * m.sin() * (1.0 + ecc * m.cos());
    for _ in 0..KEPLER_MAX_ITER {
        let delta = (e_anom - ecc * e_anom.sin() - m) / (1.0 - ecc * e_anom.cos());
        e_anom -= delta;
        if delta.abs() < KEPLER_TOLERANCE_RAD {
            break;
        }
    }
    e_anom
}

impl Elements {
    /// Mean longitude N + w + M.
    pub(crate) fn mean_longitude(&self) -> f64 {
        self.node + self.peri + self.mean_anomaly
    }

    /// True anomaly (deg) and radius vector.
    pub(crate) fn anomaly_and_radius(&self) -> (f64, f64) {
        let e_anom = eccentric_anomaly(self.mean_anomaly, self.ecc);
        let xv = self.axis * (e_anom.cos() - self.ecc);
        let yv = self.axis * (1.0 - self.ecc * self.ecc).sqrt() * e_anom.sin();
        (yv.atan2(xv).to_degrees(), xv.hypot(yv))
    }

    /// Position in the ecliptic frame of the orbit's focus.
    pub(crate) fn position(&self) -> Spherical {
        let (v, r) = self.anomaly_and_radius();
        let u = v + self.peri;
        let (sn, cn) = (sin_d(self.node), cos_d(self.node));
        let (su, cu) = (sin_d(u), cos_d(u));
        let ci = cos_d(self.incl);
        let x = r * (cn * cu - sn * su * ci);
        let y = r * (sn * cu + cn * su * ci);
        let z = r * su * sin_d(self.incl);
        Spherical::from_rect([x, y, z])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn kepler_circular_orbit() {
        let e = eccentric_anomaly(123.0, 0.0);
        assert!((e.to_degrees() - 123.0).abs() < EPS);
    }

    #[test]
    fn kepler_satisfies_equation() {
        let ecc = 0.2056;
        let m = 47.0_f64;
        let e = eccentric_anomaly(m, ecc);
        let back = (e - ecc * e.sin()).to_degrees();
        assert!((back - m).abs() < 1e-8, "M back = {back}");
    }

    #[test]
    fn rect_roundtrip() {
        let s = Spherical { lon: 215.5, lat: -3.25, r: 5.2 };
        let back = Spherical::from_rect(s.to_rect());
        assert!((back.lon - s.lon).abs() < 1e-9);
        assert!((back.lat - s.lat).abs() < 1e-9);
        assert!((back.r - s.r).abs() < 1e-9);
    }

    #[test]
    fn separation_on_ecliptic_is_longitude_gap() {
        let a = Spherical { lon: 359.0, lat: 0.0, r: 1.0 };
        let b = Spherical { lon: 2.0, lat: 0.0, r: 1.0 };
        assert!((angular_separation(a, b) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn separation_includes_latitude() {
        let a = Spherical { lon: 10.0, lat: 0.5, r: 1.0 };
        let b = Spherical { lon: 10.0, lat: -0.25, r: 1.0 };
        assert!((angular_separation(a, b) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn pm180_wraps() {
        assert!((normalize_to_pm180(190.0) + 170.0).abs() < EPS);
        assert!((normalize_to_pm180(-190.0) - 170.0).abs() < EPS);
        assert!((normalize_to_pm180(180.0) - 180.0).abs() < EPS);
        assert!((normalize_to_pm180(-180.0) - 180.0).abs() < EPS);
    }

    #[test]
    fn zero_inclination_longitude_is_true_longitude() {
        let el = Elements {
            node: 0.0,
            incl: 0.0,
            peri: 100.0,
            axis: 1.0,
            ecc: 0.0,
            mean_anomaly: 20.0,
        };
        let p = el.position();
        assert!((p.lon - 120.0).abs() < 1e-9);
        assert!(p.lat.abs() < 1e-12);
        assert!((p.r - 1.0).abs() < 1e-12);
    }
}
