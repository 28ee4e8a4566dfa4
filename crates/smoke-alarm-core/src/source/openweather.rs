//! OpenWeatherMap air pollution responses.
//!
//! `/data/2.5/air_pollution`, `/forecast` and `/history` all return the same
//! shape: a `list` of timestamped entries whose `components` are mass
//! concentrations in µg/m³ (co, no, no2, o3, so2, pm2_5, pm10, nh3).

use crate::error::AqiError;
use crate::model::Reading;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// OpenWeatherMap's own 1-5 index. Kept for reference, never used for the
/// EPA computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderIndex {
    pub aqi: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirPollutionEntry {
    /// Unix timestamp, seconds.
    pub dt: i64,
    pub components: BTreeMap<String, f64>,
    #[serde(default)]
    pub main: Option<ProviderIndex>,
}

impl AirPollutionEntry {
    /// Every component as a µg/m³ reading. Components without an EPA table
    /// (no, nh3) are left for the engine to ignore.
    pub fn readings(&self) -> Vec<Reading> {
        self.components
            .iter()
            .map(|(key, value)| Reading::ugm3(key.clone(), *value))
            .collect()
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.dt, 0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirPollutionResponse {
    #[serde(default)]
    pub coord: Option<Coord>,
    pub list: Vec<AirPollutionEntry>,
}

impl AirPollutionResponse {
    /// The current-conditions endpoint returns a single entry; for lists the
    /// first entry is the current one.
    pub fn latest(&self) -> Option<&AirPollutionEntry> {
        self.list.first()
    }
}

pub fn parse_response(json: &str) -> Result<AirPollutionResponse, AqiError> {
    serde_json::from_str(json)
        .map_err(|e| AqiError::ParseError(format!("invalid air pollution response: {e}")))
}
