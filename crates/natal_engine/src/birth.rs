//! Strongly-typed birth input.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use natal_time::civil_to_utc;
use serde::{Deserialize, Serialize};

use crate::error::NatalError;

/// Largest real-world UTC offset magnitude, in minutes.
const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

/// Birth date with optional time, zone offset and location.
///
/// Missing pieces are valid states, not errors:
/// - no `time`: local noon is assumed (an approximation);
/// - no `utc_offset_minutes`: UTC is assumed;
/// - no coordinates (or no time): the chart has no Ascendant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    /// Local time minus UTC, in minutes (UTC+05:30 is 330).
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
    /// Geographic latitude, degrees north positive.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Geographic longitude, degrees east positive.
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl BirthData {
    /// Birth date only.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            time: None,
            utc_offset_minutes: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_utc_offset(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = Some(minutes);
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// `(latitude, longitude)` when both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// UTC instant of birth: given time or local noon, at the given offset or UTC.
    pub fn resolve_utc(&self) -> DateTime<Utc> {
        let time = self.time.unwrap_or_else(local_noon);
        civil_to_utc(self.date, time, self.utc_offset_minutes.unwrap_or(0))
    }

    /// Opt-in boundary check; the engine itself never calls this.
    pub fn validate(&self) -> Result<(), NatalError> {
        if let Some(lat) = self.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(NatalError::InvalidBirthData("latitude must be in [-90, 90]"));
            }
        }
        if let Some(lon) = self.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(NatalError::InvalidBirthData("longitude must be in [-180, 180]"));
            }
        }
        if let Some(offset) = self.utc_offset_minutes {
            if offset.abs() > MAX_UTC_OFFSET_MINUTES {
                return Err(NatalError::InvalidBirthData("utc offset must be within ±18h"));
            }
        }
        Ok(())
    }
}

fn local_noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()
}
