//! Caller-owned caching of year-ahead reports.
//!
//! The engine keeps no state; a cache is passed in explicitly and keyed by
//! `(user, year)`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use natal_core::LongitudeProvider;

use crate::birth::BirthData;
use crate::config::EngineConfig;
use crate::trace::trace_step;
use crate::year_ahead::{YearAheadReport, generate_report};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReportKey {
    pub user: String,
    pub year: i32,
}

impl ReportKey {
    pub fn new(user: impl Into<String>, year: i32) -> Self {
        Self {
            user: user.into(),
            year,
        }
    }
}

/// Storage for generated reports.
pub trait ReportCache: Send + Sync {
    fn get(&self, key: &ReportKey) -> Option<YearAheadReport>;
    fn put(&self, key: ReportKey, report: YearAheadReport);
}

/// Process-local cache behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryReportCache {
    entries: Mutex<HashMap<ReportKey, YearAheadReport>>,
}

impl MemoryReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ReportKey, YearAheadReport>> {
        // a panicking writer leaves either the old or the new entry
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn invalidate(&self, key: &ReportKey) -> Option<YearAheadReport> {
        self.entries().remove(key)
    }

    pub fn clear(&self) {
        self.entries().clear();
    }
}

impl ReportCache for MemoryReportCache {
    fn get(&self, key: &ReportKey) -> Option<YearAheadReport> {
        self.entries().get(key).cloned()
    }

    fn put(&self, key: ReportKey, report: YearAheadReport) {
        self.entries().insert(key, report);
    }
}

/// Cached report for `key`, generating and storing it on a miss.
///
/// Without birth data nothing is generated or stored.
pub fn cached_report(
    cache: &dyn ReportCache,
    provider: &dyn LongitudeProvider,
    key: ReportKey,
    birth: Option<&BirthData>,
    config: &EngineConfig,
) -> Option<YearAheadReport> {
    if let Some(hit) = cache.get(&key) {
        trace_step!("report cache hit: {} {}", key.user, key.year);
        return Some(hit);
    }
    let report = generate_report(provider, birth, key.year, config)?;
    cache.put(key, report.clone());
    Some(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use natal_core::Body;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Static sky that counts Sun lookups.
    #[derive(Default)]
    struct Counting {
        sun_calls: AtomicUsize,
    }

    impl LongitudeProvider for Counting {
        fn longitude(&self, body: Body, _jd_ut: f64) -> f64 {
            if body == Body::Sun {
                self.sun_calls.fetch_add(1, Ordering::Relaxed);
            }
            f64::from(body.index()) * 33.0
        }
        fn sidereal_time_hours(&self, _jd_ut: f64) -> f64 {
            0.0
        }
        fn mean_obliquity_deg(&self, _jd_ut: f64) -> f64 {
            23.44
        }
    }

    fn birth() -> BirthData {
        BirthData::new(NaiveDate::from_ymd_opt(1992, 7, 14).unwrap())
    }

    #[test]
    fn second_call_served_from_cache() {
        let cache = MemoryReportCache::new();
        let provider = Counting::default();
        let config = EngineConfig::default();
        let birth = birth();
        let key = || ReportKey::new("ada", 2025);
        let first = cached_report(&cache, &provider, key(), Some(&birth), &config);
        assert!(first.is_some());
        let calls = provider.sun_calls.load(Ordering::Relaxed);
        assert!(calls > 0);
        let second = cached_report(&cache, &provider, key(), Some(&birth), &config);
        assert_eq!(
            provider.sun_calls.load(Ordering::Relaxed),
            calls,
            "provider consulted on hit"
        );
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_are_per_user_and_year() {
        let cache = MemoryReportCache::new();
        let provider = Counting::default();
        let config = EngineConfig::default();
        let birth = birth();
        for (user, year) in [("ada", 2025), ("ada", 2026), ("bo", 2025)] {
            let key = ReportKey::new(user, year);
            cached_report(&cache, &provider, key, Some(&birth), &config);
        }
        assert_eq!(cache.len(), 3);
        assert!(cache.invalidate(&ReportKey::new("bo", 2025)).is_some());
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn missing_birth_data_not_cached() {
        let cache = MemoryReportCache::new();
        let provider = Counting::default();
        let config = EngineConfig::default();
        let key = ReportKey::new("new", 2025);
        let out = cached_report(&cache, &provider, key, None, &config);
        assert!(out.is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryReportCache>();
    }
}
