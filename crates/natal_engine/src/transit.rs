//! Transit scanning: the moving sky against a fixed natal chart.
//!
//! A single scan compares two snapshots one day apart against the natal
//! positions; the second snapshot only decides applying vs separating.
//! Range scans repeat the single scan at a fixed cadence and keep the
//! tightest observation per `(transit body, natal body, aspect)`.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};
use natal_core::{Body, LongitudeProvider};
use natal_time::noon_jd;
use serde::{Deserialize, Serialize};

use crate::angle::orb;
use crate::aspect::match_aspect;
use crate::chart::sky_at;
use crate::config::EngineConfig;
use crate::orbs::{AspectKind, AspectNature, OrbTable};
use crate::position::PlanetPosition;
use crate::trace::trace_step;
use crate::zodiac::ZodiacSign;

/// Orb below which a transit counts as exact today.
pub const EXACT_ORB_DEG: f64 = 1.0;

/// Importance tier of a transit, by transiting body.
///
/// Ordered `Major < Moderate < Minor` so ascending sort puts major first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    Major,
    Moderate,
    Minor,
}

impl Significance {
    pub const fn for_body(body: Body) -> Self {
        match body {
            Body::Saturn | Body::Uranus | Body::Neptune | Body::Pluto => Self::Major,
            Body::Jupiter | Body::Mars => Self::Moderate,
            Body::Sun | Body::Moon | Body::Mercury | Body::Venus => Self::Minor,
        }
    }
}

/// Which transit pairs a scan considers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanPolicy {
    /// Bodies never used as the transiting side.
    pub excluded: Vec<Body>,
    /// Bodies whose returns (transit to their own natal place) are skipped.
    pub fast_bodies: Vec<Body>,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            excluded: vec![Body::Moon],
            fast_bodies: vec![Body::Sun, Body::Mercury, Body::Venus],
        }
    }
}

impl ScanPolicy {
    fn skips_source(&self, body: Body) -> bool {
        self.excluded.contains(&body)
    }

    fn skips_pair(&self, transit: Body, natal: Body) -> bool {
        transit == natal && self.fast_bodies.contains(&transit)
    }
}

/// A transiting body aspecting a natal body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitHit {
    pub transit_body: Body,
    pub natal_body: Body,
    pub kind: AspectKind,
    pub exact_angle: f64,
    pub orb: f64,
    pub nature: AspectNature,
    /// Orb is shrinking towards the next sample.
    pub is_applying: bool,
    /// Sample date of this observation (the tightest one after range dedup).
    pub peak_date: NaiveDate,
    pub significance: Significance,
    pub is_exact_today: bool,
    pub transit_longitude: f64,
    pub transit_sign: ZodiacSign,
}

/// Dedup key for range scans.
pub type HitKey = (Body, Body, AspectKind);

impl TransitHit {
    /// `(transit body, natal body, aspect)`.
    pub fn key(&self) -> HitKey {
        (self.transit_body, self.natal_body, self.kind)
    }
}

/// Presentation order: exact-today first, then significance, then orb,
/// then body and aspect order.
pub fn compare_hits(a: &TransitHit, b: &TransitHit) -> Ordering {
    b.is_exact_today
        .cmp(&a.is_exact_today)
        .then_with(|| a.significance.cmp(&b.significance))
        .then_with(|| a.orb.total_cmp(&b.orb))
        .then_with(|| a.key().cmp(&b.key()))
}

/// Order by significance, then orb; ignores the exact-today flag.
pub fn compare_by_rank(a: &TransitHit, b: &TransitHit) -> Ordering {
    a.significance
        .cmp(&b.significance)
        .then_with(|| a.orb.total_cmp(&b.orb))
        .then_with(|| a.key().cmp(&b.key()))
}

fn position_of(sky: &[PlanetPosition], body: Body) -> Option<&PlanetPosition> {
    sky.iter().find(|p| p.body() == body)
}

/// Compare one pair of sky snapshots against the natal positions.
///
/// Returned hits are in [`compare_hits`] order.
pub fn scan(
    transit_sky: &[PlanetPosition],
    next_sky: &[PlanetPosition],
    natal: &[PlanetPosition],
    table: &OrbTable,
    policy: &ScanPolicy,
    date: NaiveDate,
) -> Vec<TransitHit> {
    let mut hits = Vec::new();
    for t in transit_sky {
        if policy.skips_source(t.body()) {
            continue;
        }
        let next = position_of(next_sky, t.body());
        for n in natal {
            if policy.skips_pair(t.body(), n.body()) {
                continue;
            }
            let Some(m) = match_aspect(t.longitude(), n.longitude(), table) else {
                continue;
            };
            let is_applying =
                next.is_some_and(|nx| orb(nx.longitude(), n.longitude(), m.exact_angle) < m.orb);
            hits.push(TransitHit {
                transit_body: t.body(),
                natal_body: n.body(),
                kind: m.kind,
                exact_angle: m.exact_angle,
                orb: m.orb,
                nature: m.nature,
                is_applying,
                peak_date: date,
                significance: Significance::for_body(t.body()),
                is_exact_today: m.orb < EXACT_ORB_DEG,
                transit_longitude: t.longitude(),
                transit_sign: t.sign(),
            });
        }
    }
    hits.sort_by(compare_hits);
    hits
}

/// Scan one calendar day: noon UTC against noon UTC the next day.
pub fn scan_day(
    provider: &dyn LongitudeProvider,
    natal: &[PlanetPosition],
    date: NaiveDate,
    table: &OrbTable,
    policy: &ScanPolicy,
) -> Vec<TransitHit> {
    let jd = noon_jd(date);
    let sky = sky_at(provider, jd);
    let next = sky_at(provider, jd + 1.0);
    scan(&sky, &next, natal, table, policy, date)
}

/// Lazy per-sample scans over `start, start + cadence, ... <= end`.
///
/// Dropping the iterator stops the scan.
pub struct TransitSamples<'a> {
    provider: &'a dyn LongitudeProvider,
    natal: &'a [PlanetPosition],
    table: &'a OrbTable,
    policy: &'a ScanPolicy,
    next_date: Option<NaiveDate>,
    end: NaiveDate,
    cadence: Days,
}

impl<'a> TransitSamples<'a> {
    pub fn new(
        provider: &'a dyn LongitudeProvider,
        natal: &'a [PlanetPosition],
        start: NaiveDate,
        end: NaiveDate,
        cadence_days: u32,
        table: &'a OrbTable,
        policy: &'a ScanPolicy,
    ) -> Self {
        Self {
            provider,
            natal,
            table,
            policy,
            next_date: (start <= end).then_some(start),
            end,
            cadence: Days::new(u64::from(cadence_days.max(1))),
        }
    }
}

impl Iterator for TransitSamples<'_> {
    type Item = (NaiveDate, Vec<TransitHit>);

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.next_date?;
        self.next_date = date
            .checked_add_days(self.cadence)
            .filter(|d| *d <= self.end);
        let hits = scan_day(self.provider, self.natal, date, self.table, self.policy);
        Some((date, hits))
    }
}

/// Keep the tightest observation per key; the earlier one wins ties.
fn merge_tightest(
    best: &mut BTreeMap<HitKey, TransitHit>,
    hits: impl IntoIterator<Item = TransitHit>,
) {
    for hit in hits {
        best.entry(hit.key())
            .and_modify(|kept| {
                if hit.orb < kept.orb {
                    *kept = hit;
                }
            })
            .or_insert(hit);
    }
}

/// Sample `[start, end]` every `cadence_days` and deduplicate by key,
/// keeping the tightest orb. Result is in [`compare_hits`] order.
pub fn scan_range(
    provider: &dyn LongitudeProvider,
    natal: &[PlanetPosition],
    start: NaiveDate,
    end: NaiveDate,
    cadence_days: u32,
    table: &OrbTable,
    policy: &ScanPolicy,
) -> Vec<TransitHit> {
    let mut best = BTreeMap::new();
    let mut samples = 0usize;
    for (_, hits) in TransitSamples::new(provider, natal, start, end, cadence_days, table, policy) {
        samples += 1;
        merge_tightest(&mut best, hits);
    }
    trace_step!(
        "scan_range {start}..{end} every {cadence_days}d: {samples} samples, {} unique hits",
        best.len()
    );
    let mut out: Vec<TransitHit> = best.into_values().collect();
    out.sort_by(compare_hits);
    out
}

/// Transits partitioned around a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitOutlook {
    pub date: NaiveDate,
    /// Found in today's sky.
    pub active: Vec<TransitHit>,
    /// Found on one of the following days and not already active.
    pub coming: Vec<TransitHit>,
    /// Found on one of the preceding days and not already active.
    pub passed: Vec<TransitHit>,
}

/// Active, coming and passed transits around `today`, with the daily orbs.
pub fn transit_outlook(
    provider: &dyn LongitudeProvider,
    natal: &[PlanetPosition],
    today: NaiveDate,
    config: &EngineConfig,
) -> TransitOutlook {
    let table = &config.orbs.transit_daily;
    let policy = &config.policy;
    let step = config.cadence.daily_days.max(1);

    let active = scan_day(provider, natal, today, table, policy);
    let active_keys: BTreeSet<HitKey> = active.iter().map(TransitHit::key).collect();

    let window = |forward: bool, days: u32| {
        let mut best = BTreeMap::new();
        let mut offset = step;
        while offset <= days {
            let shift = Days::new(u64::from(offset));
            let date = if forward {
                today.checked_add_days(shift)
            } else {
                today.checked_sub_days(shift)
            };
            if let Some(date) = date {
                let hits = scan_day(provider, natal, date, table, policy)
                    .into_iter()
                    .filter(|h| !active_keys.contains(&h.key()));
                merge_tightest(&mut best, hits);
            }
            offset += step;
        }
        let mut out: Vec<TransitHit> = best.into_values().collect();
        out.sort_by(compare_hits);
        out
    };

    let coming = window(true, config.cadence.outlook_coming_days);
    let passed = window(false, config.cadence.outlook_passed_days);
    trace_step!(
        "outlook {today}: {} active, {} coming, {} passed",
        active.len(),
        coming.len(),
        passed.len()
    );

    TransitOutlook {
        date: today,
        active,
        coming,
        passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use natal_core::ALL_BODIES;

    const EPS: f64 = 1e-10;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pos(body: Body, lon: f64) -> PlanetPosition {
        PlanetPosition::new(body, lon)
    }

    fn saturn_hits(hits: &[TransitHit]) -> Vec<&TransitHit> {
        hits.iter()
            .filter(|h| h.transit_body == Body::Saturn)
            .collect()
    }

    /// Daily-orb scan on 2024-01-01 with the default policy.
    fn daily(
        sky: &[PlanetPosition],
        next: &[PlanetPosition],
        natal: &[PlanetPosition],
    ) -> Vec<TransitHit> {
        let table = OrbTable::transit_daily();
        scan(sky, next, natal, &table, &ScanPolicy::default(), date(2024, 1, 1))
    }

    /// Each body moves linearly: `start + rate * (jd - epoch)`.
    struct Linear {
        epoch: f64,
        start: [f64; 10],
        rate: [f64; 10],
    }

    impl LongitudeProvider for Linear {
        fn longitude(&self, body: Body, jd_ut: f64) -> f64 {
            let i = body.index() as usize;
            crate::angle::normalize_360(self.start[i] + self.rate[i] * (jd_ut - self.epoch))
        }
        fn sidereal_time_hours(&self, _jd_ut: f64) -> f64 {
            0.0
        }
        fn mean_obliquity_deg(&self, _jd_ut: f64) -> f64 {
            23.44
        }
    }

    /// Every body parked far from 0 deg except Saturn, which moves 0.1 deg/day.
    fn saturn_only(saturn_start: f64) -> Linear {
        let mut start = [0.0; 10];
        for (i, s) in start.iter_mut().enumerate() {
            *s = 200.0 + i as f64 * 3.0;
        }
        start[Body::Saturn.index() as usize] = saturn_start;
        let mut rate = [0.0; 10];
        rate[Body::Saturn.index() as usize] = 0.1;
        Linear {
            epoch: noon_jd(date(2024, 1, 1)),
            start,
            rate,
        }
    }

    #[test]
    fn saturn_on_natal_sun_is_major_exact_conjunction() {
        let natal = [pos(Body::Sun, 285.0)];
        let sky = [pos(Body::Saturn, 285.0)];
        let next = [pos(Body::Saturn, 285.03)];
        let hits = daily(&sky, &next, &natal);
        assert_eq!(hits.len(), 1);
        let h = hits[0];
        assert_eq!(h.kind, AspectKind::Conjunction);
        assert!(h.orb.abs() < EPS);
        assert_eq!(h.significance, Significance::Major);
        assert!(h.is_exact_today);
        assert!(!h.is_applying, "moving away from exact");
        assert_eq!(h.transit_sign, ZodiacSign::Capricorn);
    }

    #[test]
    fn applying_when_orb_shrinks() {
        let natal = [pos(Body::Sun, 100.0)];
        let sky = [pos(Body::Mars, 97.0)];
        let next = [pos(Body::Mars, 97.6)];
        let hits = daily(&sky, &next, &natal);
        assert!(hits[0].is_applying);
        assert_eq!(hits[0].significance, Significance::Moderate);
        assert!(!hits[0].is_exact_today);
    }

    #[test]
    fn moon_excluded_as_transit_source() {
        let natal = [pos(Body::Sun, 10.0)];
        let sky = [pos(Body::Moon, 10.0)];
        let hits = daily(&sky, &sky, &natal);
        assert!(hits.is_empty());
    }

    #[test]
    fn fast_returns_skipped_slow_returns_kept() {
        let natal = [pos(Body::Sun, 10.0), pos(Body::Saturn, 50.0)];
        let sky = [pos(Body::Sun, 10.0), pos(Body::Saturn, 50.0)];
        let hits = daily(&sky, &sky, &natal);
        let keys: Vec<_> = hits
            .iter()
            .map(|h| (h.transit_body, h.natal_body))
            .collect();
        assert!(!keys.contains(&(Body::Sun, Body::Sun)));
        assert!(keys.contains(&(Body::Saturn, Body::Saturn)));
    }

    #[test]
    fn presentation_order() {
        let natal = [pos(Body::Sun, 0.0), pos(Body::Moon, 150.0)];
        let sky = [
            pos(Body::Venus, 0.5),   // minor, exact
            pos(Body::Pluto, 3.0),   // major, orb 3
            pos(Body::Jupiter, 2.0), // moderate, orb 2
            pos(Body::Saturn, 0.8),  // major, exact
        ];
        let hits = daily(&sky, &sky, &natal);
        let order: Vec<_> = hits.iter().map(|h| h.transit_body).collect();
        let expected = [Body::Saturn, Body::Venus, Body::Pluto, Body::Jupiter];
        assert_eq!(order, expected);
    }

    #[test]
    fn scan_day_uses_next_noon_for_direction() {
        let provider = saturn_only(284.0);
        let natal = [pos(Body::Sun, 285.0)];
        let table = OrbTable::transit_daily();
        let policy = ScanPolicy::default();
        let hits = scan_day(&provider, &natal, date(2024, 1, 1), &table, &policy);
        let saturn = saturn_hits(&hits);
        assert_eq!(saturn.len(), 1);
        assert!((saturn[0].orb - 1.0).abs() < 1e-9);
        assert!(saturn[0].is_applying);
    }

    #[test]
    fn samples_are_lazy_and_bounded() {
        let provider = saturn_only(280.0);
        let natal = [pos(Body::Sun, 285.0)];
        let policy = ScanPolicy::default();
        let table = OrbTable::transit_daily();
        let samples = |start, end, cadence| {
            TransitSamples::new(&provider, &natal, start, end, cadence, &table, &policy)
        };
        let dates: Vec<_> = samples(date(2024, 1, 1), date(2024, 1, 31), 15)
            .map(|(d, _)| d)
            .collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 1), date(2024, 1, 16), date(2024, 1, 31)]
        );
        let empty = samples(date(2024, 2, 1), date(2024, 1, 1), 1);
        assert_eq!(empty.count(), 0);
    }

    #[test]
    fn range_keeps_tightest_sample() {
        // Saturn reaches 285 exactly on day 50 (2024-02-20)
        let provider = saturn_only(280.0);
        let natal = [pos(Body::Sun, 285.0)];
        let hits = scan_range(
            &provider,
            &natal,
            date(2024, 1, 1),
            date(2024, 4, 30),
            5,
            &OrbTable::transit_daily(),
            &ScanPolicy::default(),
        );
        let saturn = saturn_hits(&hits);
        assert_eq!(saturn.len(), 1, "deduplicated to one hit");
        assert_eq!(saturn[0].peak_date, date(2024, 2, 20));
        assert!(saturn[0].orb < 1e-9);
    }

    #[test]
    fn range_tie_keeps_earliest() {
        // 284 on day 0, 286 on day 20: orb 1 on both samples
        let provider = saturn_only(284.0);
        let natal = [pos(Body::Sun, 285.0)];
        let hits = scan_range(
            &provider,
            &natal,
            date(2024, 1, 1),
            date(2024, 1, 21),
            20,
            &OrbTable::transit_daily(),
            &ScanPolicy::default(),
        );
        let saturn = saturn_hits(&hits);
        assert_eq!(saturn[0].peak_date, date(2024, 1, 1));
    }

    #[test]
    fn outlook_partitions() {
        // orb 6.55 - 0.1 * day: inside the 6-deg daily orb from day 6
        let provider = saturn_only(278.45);
        let natal = [pos(Body::Sun, 285.0)];
        let config = EngineConfig::default();
        let today = date(2024, 1, 1);
        let outlook = transit_outlook(&provider, &natal, today, &config);
        assert!(saturn_hits(&outlook.active).is_empty());
        let coming = saturn_hits(&outlook.coming);
        assert_eq!(coming.len(), 1);
        assert_eq!(coming[0].peak_date, date(2024, 1, 8));
        assert!(saturn_hits(&outlook.passed).is_empty());
    }

    #[test]
    fn outlook_skips_active_keys() {
        let provider = saturn_only(285.0);
        let natal = [pos(Body::Sun, 285.0)];
        let config = EngineConfig::default();
        let outlook = transit_outlook(&provider, &natal, date(2024, 1, 1), &config);
        assert!(!saturn_hits(&outlook.active).is_empty());
        assert!(saturn_hits(&outlook.coming).is_empty());
        assert!(saturn_hits(&outlook.passed).is_empty());
    }

    #[test]
    fn significance_table() {
        for b in ALL_BODIES {
            let expected = match b {
                Body::Saturn | Body::Uranus | Body::Neptune | Body::Pluto => Significance::Major,
                Body::Jupiter | Body::Mars => Significance::Moderate,
                _ => Significance::Minor,
            };
            assert_eq!(Significance::for_body(b), expected);
        }
        assert!(Significance::Major < Significance::Moderate);
        assert!(Significance::Moderate < Significance::Minor);
    }
}
