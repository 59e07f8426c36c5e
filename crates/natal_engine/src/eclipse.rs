//! Eclipses reinterpreted as contacts against a natal chart.

use chrono::{DateTime, NaiveDate, Utc};
use natal_core::{
    Body, EclipseEvent, EclipseKind, LongitudeProvider, lunar_eclipses_from, solar_eclipses_from,
};
use natal_time::utc_from_jd;
use serde::Serialize;

use crate::aspect::match_aspect;
use crate::orbs::{AspectKind, AspectNature, OrbTable};
use crate::position::PlanetPosition;
use crate::trace::trace_step;
use crate::zodiac::{ZodiacSign, sign_from_longitude};

/// The eclipse point aspecting one natal body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EclipseContact {
    pub natal_body: Body,
    pub kind: AspectKind,
    pub exact_angle: f64,
    pub orb: f64,
    pub nature: AspectNature,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EclipseHit {
    /// UTC date of the peak.
    pub date: NaiveDate,
    pub peak: DateTime<Utc>,
    pub kind: EclipseKind,
    /// Moon for lunar eclipses, Sun for solar ones.
    pub body: Body,
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub degree_in_sign: f64,
    /// Sorted by orb, then natal body.
    pub natal_aspects: Vec<EclipseContact>,
}

fn contacts(longitude: f64, natal: &[PlanetPosition], table: &OrbTable) -> Vec<EclipseContact> {
    let mut out: Vec<EclipseContact> = natal
        .iter()
        .filter_map(|n| {
            match_aspect(longitude, n.longitude(), table).map(|m| EclipseContact {
                natal_body: n.body(),
                kind: m.kind,
                exact_angle: m.exact_angle,
                orb: m.orb,
                nature: m.nature,
            })
        })
        .collect();
    out.sort_by(|a, b| {
        a.orb
            .total_cmp(&b.orb)
            .then_with(|| a.natal_body.cmp(&b.natal_body))
    });
    out
}

fn classify(
    provider: &dyn LongitudeProvider,
    event: EclipseEvent,
    natal: &[PlanetPosition],
    table: &OrbTable,
) -> Option<EclipseHit> {
    let peak = match utc_from_jd(event.peak_jd_ut) {
        Ok(peak) => peak,
        Err(_e) => {
            let jd = event.peak_jd_ut;
            trace_step!("eclipse peak JD {jd} not representable: {_e}");
            return None;
        }
    };
    let body = event.kind.eclipsed_body();
    let longitude = provider.longitude(body, event.peak_jd_ut);
    let placement = sign_from_longitude(longitude);
    Some(EclipseHit {
        date: peak.date_naive(),
        peak,
        kind: event.kind,
        body,
        longitude,
        sign: placement.sign,
        degree_in_sign: placement.degree_in_sign,
        natal_aspects: contacts(longitude, natal, table),
    })
}

/// Non-penumbral eclipses peaking in `(start_jd, end_jd]`, each matched
/// against the natal positions, in ascending peak order.
///
/// A provider error ends that family's walk; eclipses found before it are
/// kept.
pub fn find_eclipses(
    provider: &dyn LongitudeProvider,
    natal: &[PlanetPosition],
    start_jd: f64,
    end_jd: f64,
    table: &OrbTable,
) -> Vec<EclipseHit> {
    let mut events = Vec::new();
    let walks = [
        lunar_eclipses_from(provider, start_jd),
        solar_eclipses_from(provider, start_jd),
    ];
    for walk in walks {
        for step in walk {
            match step {
                Ok(event) if event.peak_jd_ut > end_jd => break,
                Ok(event) => events.push(event),
                Err(_e) => {
                    trace_step!("eclipse walk stopped: {_e}");
                    break;
                }
            }
        }
    }

    let mut hits: Vec<EclipseHit> = events
        .into_iter()
        .filter(|e| !e.kind.is_penumbral())
        .filter_map(|e| classify(provider, e, natal, table))
        .collect();
    hits.sort_by(|a, b| a.peak.cmp(&b.peak));
    trace_step!("{} eclipses in JD {start_jd:.1}..{end_jd:.1}", hits.len());
    hits
}
