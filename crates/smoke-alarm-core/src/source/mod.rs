//! Where readings come from.
//!
//! The engine only consumes resolved, unit-tagged readings. Everything about
//! obtaining them (providers, locations, what to do when a lookup fails)
//! lives behind [`PollutionSource`].

pub mod fallback;
pub mod file;
pub mod openweather;

use crate::error::AqiError;
use crate::model::Reading;
use chrono::{DateTime, Utc};
use openweather::AirPollutionResponse;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A place to look up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::City(name) => write!(f, "{name}"),
            // Four decimals (~11 m) is plenty for an air quality lookup.
            Location::Coordinates { lat, lon } => write!(f, "{lat:.4},{lon:.4}"),
        }
    }
}

/// Readings for one location at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutionSnapshot {
    /// Label to show for the location (e.g. the resolved city name).
    pub label: String,
    #[serde(default)]
    pub observed_at: Option<DateTime<Utc>>,
    pub readings: Vec<Reading>,
}

/// Trait for pollution data providers.
pub trait PollutionSource: Send + Sync {
    /// Fetch the current readings for a location.
    fn fetch(&self, location: &Location) -> Result<PollutionSnapshot, AqiError>;

    /// Name of this source (for diagnostics).
    fn source_name(&self) -> &str;
}

/// A plain readings document: `{"location": "...", "readings": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingsDocument {
    #[serde(default)]
    pub location: Option<String>,
    pub readings: Vec<Reading>,
}

/// Any input document the CLI and file source accept.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InputDocument {
    OpenWeather(AirPollutionResponse),
    Readings(ReadingsDocument),
    Bare(Vec<Reading>),
}

impl InputDocument {
    pub fn parse(json: &str) -> Result<InputDocument, AqiError> {
        serde_json::from_str(json).map_err(|e| {
            AqiError::ParseError(format!(
                "expected an OpenWeatherMap air pollution response or a readings document: {e}"
            ))
        })
    }

    /// The current snapshot in this document, labelled with `fallback_label`
    /// when the document does not name its location.
    pub fn into_snapshot(self, fallback_label: &str) -> Result<PollutionSnapshot, AqiError> {
        match self {
            InputDocument::OpenWeather(response) => {
                let entry = response.latest().ok_or_else(|| {
                    AqiError::ParseError("air pollution response has an empty list".into())
                })?;
                Ok(PollutionSnapshot {
                    label: response
                        .coord
                        .as_ref()
                        .map(|c| Location::Coordinates { lat: c.lat, lon: c.lon }.to_string())
                        .unwrap_or_else(|| fallback_label.to_string()),
                    observed_at: entry.observed_at(),
                    readings: entry.readings(),
                })
            }
            InputDocument::Readings(doc) => Ok(PollutionSnapshot {
                label: doc.location.unwrap_or_else(|| fallback_label.to_string()),
                observed_at: None,
                readings: doc.readings,
            }),
            InputDocument::Bare(readings) => Ok(PollutionSnapshot {
                label: fallback_label.to_string(),
                observed_at: None,
                readings,
            }),
        }
    }
}
