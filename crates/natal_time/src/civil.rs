//! Bridging between `chrono` civil values and UT Julian Days.

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};

use crate::error::TimeError;
use crate::julian::{calendar_to_jd, jd_to_calendar};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// UT Julian Day of a UTC instant (millisecond precision).
pub fn jd_from_utc(instant: &DateTime<Utc>) -> f64 {
    let seconds = instant.num_seconds_from_midnight() as f64
        + f64::from(instant.nanosecond() / 1_000_000) / 1000.0;
    calendar_to_jd(
        instant.year(),
        instant.month(),
        f64::from(instant.day()) + seconds / SECONDS_PER_DAY,
    )
}

/// UT Julian Day of 12:00 UTC on `date`.
pub fn noon_jd(date: NaiveDate) -> f64 {
    calendar_to_jd(date.year(), date.month(), f64::from(date.day()) + 0.5)
}

/// UTC instant for a UT Julian Day, rounded to the millisecond.
pub fn utc_from_jd(jd: f64) -> Result<DateTime<Utc>, TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::NonFinite);
    }
    let (year, month, day_frac) = jd_to_calendar(jd);
    let day = day_frac.floor();
    let midnight = NaiveDate::from_ymd_opt(year, month, day as u32)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or(TimeError::OutOfRange { jd })?;
    let millis = ((day_frac - day) * SECONDS_PER_DAY * 1000.0).round() as i64;
    midnight
        .checked_add_signed(Duration::milliseconds(millis))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or(TimeError::OutOfRange { jd })
}

/// UTC calendar date containing a UT Julian Day.
pub fn date_from_jd(jd: f64) -> Result<NaiveDate, TimeError> {
    utc_from_jd(jd).map(|instant| instant.date_naive())
}

/// UTC instant for a local civil date/time at a fixed offset east of UTC.
///
/// `utc_offset_minutes = 330` means local time is UTC+05:30.
pub fn civil_to_utc(date: NaiveDate, time: NaiveTime, utc_offset_minutes: i32) -> DateTime<Utc> {
    let local = NaiveDateTime::new(date, time);
    let utc = local - Duration::minutes(i64::from(utc_offset_minutes));
    Utc.from_utc_datetime(&utc)
}
