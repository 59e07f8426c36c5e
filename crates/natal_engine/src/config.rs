//! Engine-wide tunables: orb tables, scan cadences and report limits.
//!
//! Every field has a default, so a TOML file only needs to name what it
//! overrides:
//!
//! ```toml
//! [orbs.transit_daily]
//! conjunction = 5.0
//!
//! [cadence]
//! yearly_days = 10
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::NatalError;
use crate::orbs::OrbConfig;
use crate::transit::ScanPolicy;

/// Sampling steps for the range scans, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanCadence {
    /// Step for short outlook windows.
    pub daily_days: u32,
    /// Step for the year-long major-transit scan.
    pub yearly_days: u32,
    /// Step for the near-exact key-date scan.
    pub key_date_days: u32,
    /// Days scanned forward for "coming" transits.
    pub outlook_coming_days: u32,
    /// Days scanned backward for "passed" transits.
    pub outlook_passed_days: u32,
}

impl Default for ScanCadence {
    fn default() -> Self {
        Self {
            daily_days: 1,
            yearly_days: 15,
            key_date_days: 5,
            outlook_coming_days: 7,
            outlook_passed_days: 3,
        }
    }
}

/// Caps on the year-ahead report lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLimits {
    pub major_transits: usize,
    pub key_dates: usize,
    /// Transits kept per monthly snapshot.
    pub monthly_dominant: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            major_transits: 12,
            key_dates: 15,
            monthly_dominant: 4,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub orbs: OrbConfig,
    pub cadence: ScanCadence,
    pub limits: ReportLimits,
    pub policy: ScanPolicy,
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, NatalError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NatalError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), NatalError> {
        self.orbs.validate().map_err(NatalError::InvalidConfig)?;
        let c = &self.cadence;
        if c.daily_days == 0 || c.yearly_days == 0 || c.key_date_days == 0 {
            return Err(NatalError::InvalidConfig("scan cadences must be >= 1 day"));
        }
        if c.outlook_coming_days == 0 || c.outlook_passed_days == 0 {
            return Err(NatalError::InvalidConfig("outlook windows must be >= 1 day"));
        }
        Ok(())
    }
}
