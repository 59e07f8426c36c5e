//! Eclipse event types produced by provider eclipse searches.

use serde::Serialize;

use crate::body::Body;

/// Lunar eclipse classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LunarEclipseKind {
    /// Moon passes through the penumbra only.
    Penumbral,
    /// Moon partially enters the umbra.
    Partial,
    /// Moon entirely inside the umbra.
    Total,
}

/// Global solar eclipse classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SolarEclipseKind {
    /// Only the penumbral shadow touches Earth.
    Partial,
    /// Central eclipse with the Moon's disk smaller than the Sun's.
    Annular,
    /// Central eclipse with the Moon's disk covering the Sun's.
    Total,
}

/// Which eclipse family a search walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EclipseFamily {
    Lunar,
    Solar,
}

/// Eclipse classification across both families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "family", content = "kind", rename_all = "lowercase")]
pub enum EclipseKind {
    Lunar(LunarEclipseKind),
    Solar(SolarEclipseKind),
}

impl EclipseKind {
    /// The body being darkened: the Moon in a lunar eclipse, the Sun in a solar one.
    pub const fn eclipsed_body(self) -> Body {
        match self {
            Self::Lunar(_) => Body::Moon,
            Self::Solar(_) => Body::Sun,
        }
    }

    pub const fn is_penumbral(self) -> bool {
        matches!(self, Self::Lunar(LunarEclipseKind::Penumbral))
    }

    /// Human-readable label, e.g. "total lunar".
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lunar(LunarEclipseKind::Penumbral) => "penumbral lunar",
            Self::Lunar(LunarEclipseKind::Partial) => "partial lunar",
            Self::Lunar(LunarEclipseKind::Total) => "total lunar",
            Self::Solar(SolarEclipseKind::Partial) => "partial solar",
            Self::Solar(SolarEclipseKind::Annular) => "annular solar",
            Self::Solar(SolarEclipseKind::Total) => "total solar",
        }
    }
}

/// An eclipse found by a provider search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EclipseEvent {
    pub kind: EclipseKind,
    /// Instant of greatest eclipse, UT Julian Day.
    pub peak_jd_ut: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOTAL_LUNAR: EclipseKind = EclipseKind::Lunar(LunarEclipseKind::Total);
    const ANNULAR: EclipseKind = EclipseKind::Solar(SolarEclipseKind::Annular);

    #[test]
    fn eclipsed_body_by_family() {
        assert_eq!(TOTAL_LUNAR.eclipsed_body(), Body::Moon);
        assert_eq!(ANNULAR.eclipsed_body(), Body::Sun);
    }

    #[test]
    fn labels_name_magnitude_and_family() {
        assert_eq!(TOTAL_LUNAR.label(), "total lunar");
        assert_eq!(ANNULAR.label(), "annular solar");
        let penumbral = EclipseKind::Lunar(LunarEclipseKind::Penumbral);
        assert_eq!(penumbral.label(), "penumbral lunar");
    }

    #[test]
    fn only_lunar_penumbral_is_penumbral() {
        let (lunar, solar) = (EclipseKind::Lunar, EclipseKind::Solar);
        assert!(lunar(LunarEclipseKind::Penumbral).is_penumbral());
        assert!(!lunar(LunarEclipseKind::Partial).is_penumbral());
        assert!(!solar(SolarEclipseKind::Partial).is_penumbral());
    }

    #[test]
    fn kind_serializes_tagged() {
        let kind = EclipseKind::Solar(SolarEclipseKind::Total);
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, r#"{"family":"solar","kind":"total"}"#);
    }
}
