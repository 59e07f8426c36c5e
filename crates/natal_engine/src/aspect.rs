//! Aspect detection between body longitudes.

use std::cmp::Ordering;

use natal_core::Body;
use serde::Serialize;

use crate::angle::orb;
use crate::orbs::{AspectKind, AspectNature, OrbTable};
use crate::position::PlanetPosition;

/// The aspect a pair of longitudes forms, if any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectMatch {
    pub kind: AspectKind,
    pub exact_angle: f64,
    /// Deviation from `exact_angle`, degrees.
    pub orb: f64,
    pub nature: AspectNature,
}

/// An aspect between two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aspect {
    pub body_a: Body,
    pub body_b: Body,
    pub kind: AspectKind,
    pub exact_angle: f64,
    pub orb: f64,
    pub nature: AspectNature,
}

impl Aspect {
    fn from_match(body_a: Body, body_b: Body, m: AspectMatch) -> Self {
        Self {
            body_a,
            body_b,
            kind: m.kind,
            exact_angle: m.exact_angle,
            orb: m.orb,
            nature: m.nature,
        }
    }
}

/// Closest aspect within orb between two longitudes.
///
/// Every definition in `table` is evaluated; among those within their orb
/// (inclusive) the smallest orb wins, ties going to catalog order.
pub fn match_aspect(lon_a: f64, lon_b: f64, table: &OrbTable) -> Option<AspectMatch> {
    let mut best: Option<AspectMatch> = None;
    for (kind, max_orb) in table.definitions() {
        let o = orb(lon_a, lon_b, kind.angle());
        if o > max_orb {
            continue;
        }
        if best.is_none_or(|b| o < b.orb) {
            best = Some(AspectMatch {
                kind,
                exact_angle: kind.angle(),
                orb: o,
                nature: kind.nature(),
            });
        }
    }
    best
}

fn by_orb_then_bodies(a: &Aspect, b: &Aspect) -> Ordering {
    a.orb
        .total_cmp(&b.orb)
        .then_with(|| a.body_a.cmp(&b.body_a))
        .then_with(|| a.body_b.cmp(&b.body_b))
}

/// Aspects among one set of positions, at most one per unordered pair.
///
/// `body_a` is always the lower-indexed body. Sorted by ascending orb,
/// ties by `(body_a, body_b)`.
pub fn detect_aspects(positions: &[PlanetPosition], table: &OrbTable) -> Vec<Aspect> {
    let mut out = Vec::new();
    for (i, p) in positions.iter().enumerate() {
        for q in &positions[i + 1..] {
            if p.body() == q.body() {
                continue;
            }
            let (a, b) = if p.body() < q.body() { (p, q) } else { (q, p) };
            if let Some(m) = match_aspect(a.longitude(), b.longitude(), table) {
                out.push(Aspect::from_match(a.body(), b.body(), m));
            }
        }
    }
    out.sort_by(by_orb_then_bodies);
    out
}

/// Aspects from each `moving` position to each `fixed` position.
///
/// `body_a` is the moving body, `body_b` the fixed one; same-body pairs are
/// included. Sorted like [`detect_aspects`].
pub fn detect_cross_aspects(
    moving: &[PlanetPosition],
    fixed: &[PlanetPosition],
    table: &OrbTable,
) -> Vec<Aspect> {
    let mut out = Vec::new();
    for m in moving {
        for f in fixed {
            if let Some(hit) = match_aspect(m.longitude(), f.longitude(), table) {
                out.push(Aspect::from_match(m.body(), f.body(), hit));
            }
        }
    }
    out.sort_by(by_orb_then_bodies);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use natal_core::ALL_BODIES;

    const EPS: f64 = 1e-10;

    fn pos(body: Body, lon: f64) -> PlanetPosition {
        PlanetPosition::new(body, lon)
    }

    #[test]
    fn exact_conjunction() {
        let m = match_aspect(285.0, 285.0, &OrbTable::natal()).unwrap();
        assert_eq!(m.kind, AspectKind::Conjunction);
        assert!(m.orb.abs() < EPS);
        assert_eq!(m.nature, AspectNature::Neutral);
    }

    #[test]
    fn trine_across_zero() {
        let m = match_aspect(355.0, 117.0, &OrbTable::natal()).unwrap();
        assert_eq!(m.kind, AspectKind::Trine);
        assert!((m.orb - 2.0).abs() < EPS, "orb = {}", m.orb);
    }

    #[test]
    fn orb_boundary_is_inclusive() {
        let m = match_aspect(0.0, 64.0, &OrbTable::natal());
        assert_eq!(m.map(|m| m.kind), Some(AspectKind::Sextile));
        assert!(match_aspect(0.0, 64.5, &OrbTable::natal()).is_none());
    }

    #[test]
    fn overlapping_windows_pick_closest() {
        // 25-degree orbs overlap sextile (60) and square (90) at 80 deg
        let wide = OrbTable::uniform(25.0);
        let m = match_aspect(0.0, 80.0, &wide).unwrap();
        assert_eq!(m.kind, AspectKind::Square);
        assert!((m.orb - 10.0).abs() < EPS);
        // exactly between: catalog order wins
        let m = match_aspect(0.0, 75.0, &wide).unwrap();
        assert_eq!(m.kind, AspectKind::Sextile);
    }

    #[test]
    fn no_aspect_in_gap() {
        assert!(match_aspect(0.0, 40.0, &OrbTable::natal()).is_none());
    }

    #[test]
    fn one_aspect_per_pair() {
        let positions: Vec<_> = ALL_BODIES
            .iter()
            .enumerate()
            .map(|(i, &b)| pos(b, i as f64 * 37.0))
            .collect();
        let aspects = detect_aspects(&positions, &OrbTable::uniform(30.0));
        let mut seen = std::collections::BTreeSet::new();
        for a in &aspects {
            assert!(a.body_a < a.body_b);
            let pair = (a.body_a, a.body_b);
            assert!(seen.insert(pair), "duplicate pair {pair:?}");
        }
    }

    #[test]
    fn sorted_by_orb_then_bodies() {
        let positions = [
            pos(Body::Sun, 0.0),
            pos(Body::Moon, 92.0),
            pos(Body::Mars, 180.0),
            pos(Body::Venus, 62.0),
        ];
        let aspects = detect_aspects(&positions, &OrbTable::natal());
        let orbs: Vec<f64> = aspects.iter().map(|a| a.orb).collect();
        for w in orbs.windows(2) {
            assert!(w[0] <= w[1], "unsorted: {orbs:?}");
        }
        let first = aspects[0];
        assert_eq!((first.body_a, first.body_b), (Body::Sun, Body::Mars));
        assert_eq!(first.kind, AspectKind::Opposition);
        // Sun-Moon square and Sun-Venus sextile both have orb 2: Moon sorts first
        let pairs: Vec<_> = aspects.iter().map(|a| (a.body_a, a.body_b)).collect();
        assert_eq!(pairs[1], (Body::Sun, Body::Moon));
        assert_eq!(pairs[2], (Body::Sun, Body::Venus));
    }

    #[test]
    fn pair_order_normalized() {
        let positions = [pos(Body::Saturn, 10.0), pos(Body::Sun, 12.0)];
        let aspects = detect_aspects(&positions, &OrbTable::natal());
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects[0].body_a, Body::Sun);
        assert_eq!(aspects[0].body_b, Body::Saturn);
    }

    #[test]
    fn cross_aspects_keep_direction() {
        let moving = [pos(Body::Saturn, 285.0)];
        let fixed = [pos(Body::Sun, 285.5), pos(Body::Saturn, 105.0)];
        let aspects = detect_cross_aspects(&moving, &fixed, &OrbTable::eclipse());
        assert_eq!(aspects.len(), 2);
        assert_eq!(aspects[0].body_b, Body::Saturn);
        assert_eq!(aspects[0].kind, AspectKind::Opposition);
        assert_eq!(aspects[1].body_a, Body::Saturn);
        assert_eq!(aspects[1].body_b, Body::Sun);
    }
}
