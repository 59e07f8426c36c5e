//! Solar return: the day, and optionally the instant, the Sun comes back
//! to its natal longitude.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use natal_core::{Body, LongitudeProvider};
use natal_time::{noon_jd, utc_from_jd};

use crate::angle::{circular_diff, signed_diff};
use crate::trace::trace_step;

const MAX_BISECTION_ITERATIONS: u32 = 50;
const CONVERGENCE_DAYS: f64 = 1e-7;

/// Every day of one calendar year with the Sun's noon distance to a target
/// longitude. Lazy; stop consuming to cancel.
pub struct SolarReturnDays<'a> {
    provider: &'a dyn LongitudeProvider,
    target_lon: f64,
    year: i32,
    next: Option<NaiveDate>,
}

impl<'a> SolarReturnDays<'a> {
    pub fn new(provider: &'a dyn LongitudeProvider, natal_sun_lon: f64, year: i32) -> Self {
        Self {
            provider,
            target_lon: natal_sun_lon,
            year,
            next: NaiveDate::from_ymd_opt(year, 1, 1),
        }
    }
}

impl Iterator for SolarReturnDays<'_> {
    type Item = (NaiveDate, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.next?;
        self.next = date
            .checked_add_days(Days::new(1))
            .filter(|d| d.year() == self.year);
        let sun = self.provider.longitude(Body::Sun, noon_jd(date));
        Some((date, circular_diff(sun, self.target_lon)))
    }
}

/// Day of `year` whose noon Sun is closest to `natal_sun_lon`.
///
/// The earliest day wins ties. A year outside chrono's calendar yields
/// `NaiveDate::default()`.
pub fn find_solar_return(
    provider: &dyn LongitudeProvider,
    natal_sun_lon: f64,
    year: i32,
) -> NaiveDate {
    let mut best: Option<(NaiveDate, f64)> = None;
    for (date, distance) in SolarReturnDays::new(provider, natal_sun_lon, year) {
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((date, distance));
        }
    }
    trace_step!("solar return {year}: {best:?}");
    best.map(|(date, _)| date).unwrap_or_default()
}

/// Instant of the solar return, refined by bisection within a day either
/// side of the chosen noon. Falls back to that noon when the Sun does not
/// cross the natal longitude inside the bracket.
pub fn solar_return_instant(
    provider: &dyn LongitudeProvider,
    natal_sun_lon: f64,
    year: i32,
) -> DateTime<Utc> {
    let day = find_solar_return(provider, natal_sun_lon, year);
    let noon = day
        .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default())
        .and_utc();
    let f = |jd: f64| signed_diff(provider.longitude(Body::Sun, jd), natal_sun_lon);

    let jd_noon = noon_jd(day);
    let (mut lo, mut hi) = (jd_noon - 1.0, jd_noon + 1.0);
    if !(f(lo) <= 0.0 && f(hi) >= 0.0) {
        return noon;
    }
    for _ in 0..MAX_BISECTION_ITERATIONS {
        if hi - lo < CONVERGENCE_DAYS {
            break;
        }
        let mid = 0.5 * (lo + hi);
        if f(mid) <= 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    utc_from_jd(0.5 * (lo + hi)).unwrap_or(noon)
}
