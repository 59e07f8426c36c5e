//! Year-ahead report: one solar year of transits, eclipses and numbers.
//!
//! The solar year runs from the solar-return day in the requested calendar
//! year to the same month and day twelve months later. Everything in the
//! report is a pure function of `(birth data, year, config)`; only
//! `generated_at` is left for callers to stamp.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use natal_core::LongitudeProvider;
use natal_time::noon_jd;
use serde::Serialize;

use crate::birth::BirthData;
use crate::chart::build_chart;
use crate::config::EngineConfig;
use crate::eclipse::{EclipseHit, find_eclipses};
use crate::numerology::{life_path, personal_year};
use crate::solar_return::find_solar_return;
use crate::trace::trace_step;
use crate::transit::{TransitHit, compare_by_rank, scan_day, scan_range};

/// Day of month sampled for monthly snapshots.
pub const SNAPSHOT_DAY: u32 = 15;

/// A near-exact transit pinned to the date it was tightest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyDate {
    pub date: NaiveDate,
    pub transit: TransitHit,
}

/// Strongest transits on one mid-month sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSnapshot {
    pub year: i32,
    pub month: u32,
    pub sample_date: NaiveDate,
    /// In scanner order.
    pub dominant: Vec<TransitHit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearAheadReport {
    pub year: i32,
    pub solar_return_date: NaiveDate,
    pub solar_year_end: NaiveDate,
    pub personal_year: u32,
    pub life_path: u32,
    /// Ranked by significance, then orb.
    pub major_transits: Vec<TransitHit>,
    /// Chronological.
    pub key_dates: Vec<KeyDate>,
    /// Twelve mid-month samples inside the solar year.
    pub months: Vec<MonthSnapshot>,
    pub eclipses: Vec<EclipseHit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl YearAheadReport {
    /// Copy with a generation timestamp attached.
    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }
}

fn ranked(mut hits: Vec<TransitHit>, limit: usize) -> Vec<TransitHit> {
    hits.sort_by(compare_by_rank);
    hits.truncate(limit);
    hits
}

/// Twelve consecutive mid-month days, the first on or after `start`.
fn sample_dates(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let skip = u32::from(start.day() > SNAPSHOT_DAY);
    let first = start.with_day(SNAPSHOT_DAY);
    (skip..skip + 12).filter_map(move |i| first?.checked_add_months(Months::new(i)))
}

/// Build the year-ahead report, or `None` without birth data.
pub fn generate_report(
    provider: &dyn LongitudeProvider,
    birth: Option<&BirthData>,
    year: i32,
    config: &EngineConfig,
) -> Option<YearAheadReport> {
    let birth = birth?;
    let chart = build_chart(provider, birth);
    let natal = chart.positions();
    let orbs = &config.orbs;
    let cadence = &config.cadence;
    let limits = &config.limits;
    let policy = &config.policy;

    let start = find_solar_return(provider, chart.sun().longitude(), year);
    let end = start.checked_add_months(Months::new(12)).unwrap_or(start);

    let yearly = scan_range(
        provider,
        natal,
        start,
        end,
        cadence.yearly_days,
        &orbs.transit_yearly,
        policy,
    );
    let major_transits = ranked(yearly, limits.major_transits);

    let near_exact = scan_range(
        provider,
        natal,
        start,
        end,
        cadence.key_date_days,
        &orbs.key_date,
        policy,
    );
    let mut key_dates: Vec<KeyDate> = ranked(near_exact, limits.key_dates)
        .into_iter()
        .map(|transit| KeyDate {
            date: transit.peak_date,
            transit,
        })
        .collect();
    key_dates.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| compare_by_rank(&a.transit, &b.transit))
    });

    let months: Vec<MonthSnapshot> = sample_dates(start)
        .map(|sample_date| {
            let mut dominant = scan_day(provider, natal, sample_date, &orbs.transit_yearly, policy);
            dominant.truncate(limits.monthly_dominant);
            MonthSnapshot {
                year: sample_date.year(),
                month: sample_date.month(),
                sample_date,
                dominant,
            }
        })
        .collect();

    let eclipses = find_eclipses(
        provider,
        natal,
        noon_jd(start),
        noon_jd(end),
        &orbs.eclipse,
    );

    trace_step!(
        "report {year}: solar year {start}..{end}, {} major, {} key dates, {} eclipses",
        major_transits.len(),
        key_dates.len(),
        eclipses.len()
    );

    Some(YearAheadReport {
        year,
        solar_return_date: start,
        solar_year_end: end,
        personal_year: personal_year(birth.date, year),
        life_path: life_path(birth.date),
        major_transits,
        key_dates,
        months,
        eclipses,
        generated_at: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::normalize_360;
    use natal_core::Body;

    /// Mean daily motions, roughly real.
    const RATES: [f64; 10] = [
        0.9856, 13.176, 1.383, 1.602, 0.524, 0.083, 0.0335, 0.0117, 0.006, 0.004,
    ];

    struct Mean {
        epoch: f64,
    }

    impl LongitudeProvider for Mean {
        fn longitude(&self, body: Body, jd_ut: f64) -> f64 {
            let i = body.index() as usize;
            normalize_360(i as f64 * 37.0 + RATES[i] * (jd_ut - self.epoch))
        }
        fn sidereal_time_hours(&self, _jd_ut: f64) -> f64 {
            0.0
        }
        fn mean_obliquity_deg(&self, _jd_ut: f64) -> f64 {
            23.44
        }
    }

    fn born(date: NaiveDate) -> Mean {
        Mean {
            epoch: noon_jd(date),
        }
    }

    fn provider() -> Mean {
        born(NaiveDate::from_ymd_opt(1990, 1, 5).unwrap())
    }

    fn birth() -> BirthData {
        BirthData::new(NaiveDate::from_ymd_opt(1990, 1, 5).unwrap())
    }

    fn report_with(config: &EngineConfig, year: i32) -> YearAheadReport {
        let report = generate_report(&provider(), Some(&birth()), year, config);
        report.unwrap()
    }

    fn report(year: i32) -> YearAheadReport {
        report_with(&EngineConfig::default(), year)
    }

    #[test]
    fn none_without_birth_data() {
        let config = EngineConfig::default();
        let report = generate_report(&provider(), None, 2025, &config);
        assert!(report.is_none());
    }

    #[test]
    fn solar_year_bounds() {
        let r = report(2025);
        assert_eq!(r.solar_return_date.year(), 2025);
        assert_eq!(
            r.solar_year_end,
            r.solar_return_date
                .checked_add_months(Months::new(12))
                .unwrap()
        );
        assert_eq!(r.year, 2025);
        assert!(r.generated_at.is_none());
    }

    #[test]
    fn months_start_at_return_month() {
        let r = report(2025);
        assert_eq!(r.months.len(), 12);
        assert_eq!(r.months[0].month, r.solar_return_date.month());
        for w in r.months.windows(2) {
            assert!(w[0].sample_date < w[1].sample_date);
        }
        for m in &r.months {
            assert_eq!(m.sample_date.day(), SNAPSHOT_DAY);
            assert!(m.dominant.len() <= 4);
        }
    }

    #[test]
    fn late_month_return_samples_stay_inside_solar_year() {
        let date = NaiveDate::from_ymd_opt(1990, 7, 25).unwrap();
        let config = EngineConfig::default();
        let birth = BirthData::new(date);
        let r = generate_report(&born(date), Some(&birth), 2025, &config);
        let r = r.unwrap();
        let (start, end) = (r.solar_return_date, r.solar_year_end);
        assert!(start.day() > SNAPSHOT_DAY, "{start}");
        assert_eq!(r.months.len(), 12);
        assert_eq!(r.months[0].month, start.month() % 12 + 1);
        for m in &r.months {
            let d = m.sample_date;
            assert!(d >= start && d <= end, "{d} outside {start}..{end}");
        }
    }

    #[test]
    fn sample_dates_roll_past_late_start() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        let early: Vec<_> = sample_dates(d(2025, 3, 15)).collect();
        assert_eq!(early.first(), Some(&d(2025, 3, 15)));
        assert_eq!(early.last(), Some(&d(2026, 2, 15)));
        let late: Vec<_> = sample_dates(d(2025, 12, 16)).collect();
        assert_eq!(late.first(), Some(&d(2026, 1, 15)));
        assert_eq!(late.last(), Some(&d(2026, 12, 15)));
    }

    #[test]
    fn lists_respect_limits_and_order() {
        let r = report(2025);
        assert!(r.major_transits.len() <= 12);
        assert!(!r.major_transits.is_empty());
        for w in r.major_transits.windows(2) {
            assert!(w[0].significance <= w[1].significance);
            if w[0].significance == w[1].significance {
                assert!(w[0].orb <= w[1].orb);
            }
        }
        assert!(r.key_dates.len() <= 15);
        for w in r.key_dates.windows(2) {
            assert!(w[0].date <= w[1].date);
        }
        assert!(r.key_dates.iter().all(|k| k.transit.orb <= 1.0));
        for k in &r.key_dates {
            assert!(k.date >= r.solar_return_date && k.date <= r.solar_year_end);
        }
    }

    #[test]
    fn custom_limits() {
        let mut config = EngineConfig::default();
        config.limits.major_transits = 3;
        config.limits.monthly_dominant = 1;
        let r = report_with(&config, 2025);
        assert!(r.major_transits.len() <= 3);
        assert!(r.months.iter().all(|m| m.dominant.len() <= 1));
        let full = report(2025);
        assert_eq!(
            r.major_transits[..],
            full.major_transits[..r.major_transits.len()]
        );
    }

    #[test]
    fn numerology_fields() {
        let r = report(2024);
        assert_eq!(r.life_path, 7);
        assert_eq!(r.personal_year, 5);
    }

    #[test]
    fn stamped_sets_timestamp() {
        let at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(report(2025).stamped(at).generated_at, Some(at));
    }
}
