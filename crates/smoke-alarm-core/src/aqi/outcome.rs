use crate::aqi::category::{AqiCategory, Severity};
use crate::error::ReadingError;
use crate::model::{ConcentrationUnit, Pollutant, WeatherField};
use crate::trace::TraceBundle;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a concentration fell in its breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowMatch {
    BelowRange,
    /// Index into the table's breakpoints.
    Row(usize),
    AboveRange,
}

/// How the cigarette equivalent was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CigaretteBasis {
    /// Directly from a PM2.5 reading.
    MeasuredPm25,
    /// PM2.5 back-derived from the overall AQI.
    DerivedFromAqi,
    /// No PM2.5 reading and no PM2.5 table to invert.
    Unavailable,
}

/// Sub-index for a single pollutant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubAqi {
    pub pollutant: Pollutant,
    /// The value as reported, before conversion.
    pub input_value: f64,
    pub input_unit: ConcentrationUnit,
    /// Value in the table unit, unrounded.
    pub concentration: f64,
    pub unit: ConcentrationUnit,
    /// Concentration after truncation to the table precision. `Decimal::MAX`
    /// for a clamped value too large to represent.
    pub truncated: Decimal,
    pub row: RowMatch,
    pub aqi: u32,
    pub severity: Severity,
    /// Human-readable explanation of the lookup.
    pub reason: String,
}

/// A reading that could not be used, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedReading {
    pub key: String,
    pub error: ReadingError,
}

/// Aggregate result for one set of readings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AqiResult {
    /// Name of the breakpoint table set that was applied.
    pub table_set: String,
    /// Maximum of all sub-indices, 0 if there are none.
    pub overall_aqi: u32,
    pub category: AqiCategory,
    pub overall_reason: String,
    /// Pollutant whose sub-index is the overall AQI.
    pub dominant_pollutant: Option<Pollutant>,
    pub sub_aqis: BTreeMap<Pollutant, SubAqi>,
    /// Unrounded; rounding is up to the caller.
    pub cigarette_equivalent: f64,
    pub cigarette_basis: CigaretteBasis,
    /// Weather fields, passed through unchanged.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub weather: BTreeMap<WeatherField, f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedReading>,
    /// Keys that are neither pollutants nor weather fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored_keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceBundle>,
}

impl AqiResult {
    pub fn sub_aqi(&self, pollutant: Pollutant) -> Option<&SubAqi> {
        self.sub_aqis.get(&pollutant)
    }

    pub fn dominant(&self) -> Option<&SubAqi> {
        self.dominant_pollutant.and_then(|p| self.sub_aqis.get(&p))
    }

    pub fn skipped_error(&self, key: &str) -> Option<&ReadingError> {
        self.skipped.iter().find(|s| s.key == key).map(|s| &s.error)
    }

    /// True when the overall AQI is above the "Good" range.
    pub fn is_above_safe_limit(&self) -> bool {
        self.overall_aqi > 50
    }
}
