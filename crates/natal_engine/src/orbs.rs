//! Aspect catalog and the context-keyed orb tables.

use serde::{Deserialize, Serialize};

/// Largest orb any table may carry.
pub const MAX_ORB_DEG: f64 = 30.0;

/// The five Ptolemaic aspects, in catalog (and tie-break) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

pub const ALL_ASPECTS: [AspectKind; 5] = [
    AspectKind::Conjunction,
    AspectKind::Sextile,
    AspectKind::Square,
    AspectKind::Trine,
    AspectKind::Opposition,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectNature {
    Harmonious,
    Challenging,
    Neutral,
}

impl AspectKind {
    /// Exact separation in degrees.
    pub const fn angle(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Sextile => 60.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Opposition => 180.0,
        }
    }

    pub const fn nature(self) -> AspectNature {
        match self {
            Self::Conjunction => AspectNature::Neutral,
            Self::Sextile | Self::Trine => AspectNature::Harmonious,
            Self::Square | Self::Opposition => AspectNature::Challenging,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::Sextile => "Sextile",
            Self::Square => "Square",
            Self::Trine => "Trine",
            Self::Opposition => "Opposition",
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Conjunction => "☌",
            Self::Sextile => "⚹",
            Self::Square => "□",
            Self::Trine => "△",
            Self::Opposition => "☍",
        }
    }
}

/// Calling contexts that carry their own orb table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbContext {
    Natal,
    TransitDaily,
    TransitYearly,
    Eclipse,
    KeyDate,
}

/// Maximum orb (degrees) per aspect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbTable {
    pub conjunction: f64,
    pub sextile: f64,
    pub square: f64,
    pub trine: f64,
    pub opposition: f64,
}

impl OrbTable {
    /// Same orb for every aspect.
    pub const fn uniform(orb: f64) -> Self {
        Self {
            conjunction: orb,
            sextile: orb,
            square: orb,
            trine: orb,
            opposition: orb,
        }
    }

    /// Natal-natal aspects: the widest table.
    pub const fn natal() -> Self {
        Self {
            conjunction: 8.0,
            sextile: 4.0,
            square: 7.0,
            trine: 7.0,
            opposition: 8.0,
        }
    }

    /// Daily transit alerts.
    pub const fn transit_daily() -> Self {
        Self {
            conjunction: 6.0,
            sextile: 3.0,
            square: 5.0,
            trine: 5.0,
            opposition: 6.0,
        }
    }

    /// Year-long transit scans.
    pub const fn transit_yearly() -> Self {
        Self::natal()
    }

    /// Eclipse points against natal bodies.
    pub const fn eclipse() -> Self {
        Self::uniform(5.0)
    }

    /// Near-exact hits for key dates.
    pub const fn key_date() -> Self {
        Self::uniform(1.0)
    }

    pub const fn orb_for(&self, kind: AspectKind) -> f64 {
        match kind {
            AspectKind::Conjunction => self.conjunction,
            AspectKind::Sextile => self.sextile,
            AspectKind::Square => self.square,
            AspectKind::Trine => self.trine,
            AspectKind::Opposition => self.opposition,
        }
    }

    /// `(kind, max orb)` in catalog order.
    pub fn definitions(&self) -> impl Iterator<Item = (AspectKind, f64)> + '_ {
        ALL_ASPECTS.iter().map(move |&k| (k, self.orb_for(k)))
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        for (_, orb) in self.definitions() {
            if !(orb.is_finite() && orb > 0.0 && orb <= MAX_ORB_DEG) {
                return Err("orbs must be finite and in (0, 30]");
            }
        }
        Ok(())
    }
}

/// Orbs named in a config file; unnamed aspects keep the context default.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OrbOverrides {
    conjunction: Option<f64>,
    sextile: Option<f64>,
    square: Option<f64>,
    trine: Option<f64>,
    opposition: Option<f64>,
}

impl OrbOverrides {
    fn over(self, base: OrbTable) -> OrbTable {
        OrbTable {
            conjunction: self.conjunction.unwrap_or(base.conjunction),
            sextile: self.sextile.unwrap_or(base.sextile),
            square: self.square.unwrap_or(base.square),
            trine: self.trine.unwrap_or(base.trine),
            opposition: self.opposition.unwrap_or(base.opposition),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OrbConfigOverrides {
    natal: OrbOverrides,
    transit_daily: OrbOverrides,
    transit_yearly: OrbOverrides,
    eclipse: OrbOverrides,
    key_date: OrbOverrides,
}

impl From<OrbConfigOverrides> for OrbConfig {
    fn from(o: OrbConfigOverrides) -> Self {
        Self {
            natal: o.natal.over(OrbTable::natal()),
            transit_daily: o.transit_daily.over(OrbTable::transit_daily()),
            transit_yearly: o.transit_yearly.over(OrbTable::transit_yearly()),
            eclipse: o.eclipse.over(OrbTable::eclipse()),
            key_date: o.key_date.over(OrbTable::key_date()),
        }
    }
}

/// One orb table per calling context.
///
/// Deserializing fills every aspect a document leaves out from that
/// context's own default table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "OrbConfigOverrides")]
pub struct OrbConfig {
    pub natal: OrbTable,
    pub transit_daily: OrbTable,
    pub transit_yearly: OrbTable,
    pub eclipse: OrbTable,
    pub key_date: OrbTable,
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            natal: OrbTable::natal(),
            transit_daily: OrbTable::transit_daily(),
            transit_yearly: OrbTable::transit_yearly(),
            eclipse: OrbTable::eclipse(),
            key_date: OrbTable::key_date(),
        }
    }
}

impl OrbConfig {
    pub fn table(&self, context: OrbContext) -> &OrbTable {
        match context {
            OrbContext::Natal => &self.natal,
            OrbContext::TransitDaily => &self.transit_daily,
            OrbContext::TransitYearly => &self.transit_yearly,
            OrbContext::Eclipse => &self.eclipse,
            OrbContext::KeyDate => &self.key_date,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        self.natal.validate()?;
        self.transit_daily.validate()?;
        self.transit_yearly.validate()?;
        self.eclipse.validate()?;
        self.key_date.validate()
    }
}
