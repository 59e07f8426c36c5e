//! Search configuration for [`AnalyticEphemeris`](crate::AnalyticEphemeris).

/// JD of 1800-01-01 00:00 UT.
pub const DEFAULT_MIN_JD_UT: f64 = 2_378_496.5;

/// JD of 2200-01-01 00:00 UT.
pub const DEFAULT_MAX_JD_UT: f64 = 2_524_593.5;

/// Tunables for the syzygy and eclipse searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisConfig {
    /// Earliest instant a search may visit (UT JD).
    pub min_jd_ut: f64,
    /// Latest instant a search may visit (UT JD).
    pub max_jd_ut: f64,
    /// Coarse scan step for new/full moon bracketing, in days.
    /// The Sun-Moon elongation moves ~12.2 deg/day, so anything up to a
    /// few days still brackets every crossing.
    pub syzygy_step_days: f64,
    /// Maximum bisection iterations when refining a crossing.
    pub max_iterations: u32,
    /// Bisection stops once the bracket is narrower than this (days).
    pub convergence_days: f64,
    /// Lunations examined per eclipse search before giving up.
    pub max_lunations: u32,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self {
            min_jd_ut: DEFAULT_MIN_JD_UT,
            max_jd_ut: DEFAULT_MAX_JD_UT,
            syzygy_step_days: 0.5,
            max_iterations: 50,
            convergence_days: 1e-5,
            max_lunations: 50,
        }
    }
}

impl EphemerisConfig {
    /// Default search settings over a custom time range.
    pub fn with_range(min_jd_ut: f64, max_jd_ut: f64) -> Self {
        Self {
            min_jd_ut,
            max_jd_ut,
            ..Self::default()
        }
    }

    pub fn contains(&self, jd_ut: f64) -> bool {
        jd_ut >= self.min_jd_ut && jd_ut <= self.max_jd_ut
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.min_jd_ut.is_finite() || !self.max_jd_ut.is_finite() {
            return Err("time range must be finite");
        }
        if self.min_jd_ut >= self.max_jd_ut {
            return Err("min_jd_ut must be before max_jd_ut");
        }
        if !(self.syzygy_step_days > 0.0 && self.syzygy_step_days <= 5.0) {
            return Err("syzygy_step_days must be in (0, 5]");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !(self.convergence_days > 0.0 && self.convergence_days.is_finite()) {
            return Err("convergence_days must be positive");
        }
        if self.max_lunations == 0 {
            return Err("max_lunations must be > 0");
        }
        Ok(())
    }
}
