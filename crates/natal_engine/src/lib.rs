//! Natal chart and transit engine.
//!
//! This crate provides:
//! - Circular angle algebra and zodiac placement
//! - Natal chart construction with an optional Ascendant
//! - Aspect detection against context-keyed orb tables
//! - Transit scanning (single day, ranges, and a today/coming/passed outlook)
//! - Solar return search
//! - Eclipses matched against a natal chart
//! - Year-ahead report aggregation with numerology and a caller-owned cache
//!
//! All computation goes through a [`natal_core::LongitudeProvider`]; the
//! engine holds no state and every function is safe to call from any thread.

pub mod angle;
pub mod aspect;
pub mod birth;
pub mod cache;
pub mod chart;
pub mod config;
pub mod eclipse;
pub mod error;
pub mod numerology;
pub mod orbs;
pub mod position;
pub mod solar_return;
mod trace;
pub mod transit;
pub mod year_ahead;
pub mod zodiac;

pub use angle::{circular_diff, normalize_360, orb, signed_diff};
pub use aspect::{Aspect, AspectMatch, detect_aspects, detect_cross_aspects, match_aspect};
pub use birth::BirthData;
pub use cache::{MemoryReportCache, ReportCache, ReportKey, cached_report};
pub use chart::{Ascendant, NatalChart, Sky, ascendant_longitude, build_chart, sky_at};
pub use config::{EngineConfig, ReportLimits, ScanCadence};
pub use eclipse::{EclipseContact, EclipseHit, find_eclipses};
pub use error::NatalError;
pub use numerology::{life_path, personal_year, reduce};
pub use orbs::{ALL_ASPECTS, AspectKind, AspectNature, OrbConfig, OrbContext, OrbTable};
pub use position::PlanetPosition;
pub use solar_return::{SolarReturnDays, find_solar_return, solar_return_instant};
pub use transit::{
    ScanPolicy, Significance, TransitHit, TransitOutlook, TransitSamples, scan, scan_day,
    scan_range, transit_outlook,
};
pub use year_ahead::{KeyDate, MonthSnapshot, YearAheadReport, generate_report};
pub use zodiac::{
    ALL_SIGNS, Compatibility, Dms, Element, Modality, SignPlacement, ZodiacSign, compatibility,
    deg_to_dms, dms_to_deg, sign_from_longitude,
};
