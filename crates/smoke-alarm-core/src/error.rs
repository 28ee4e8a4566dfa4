use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::model::ConcentrationUnit;

#[derive(Debug, thiserror::Error)]
pub enum AqiError {
    #[error("failed to load breakpoint tables from {path}: {reason}")]
    TableLoad { path: PathBuf, reason: String },

    #[error("invalid breakpoint tables: {0}")]
    TableInvalid(String),

    #[error("failed to parse input: {0}")]
    ParseError(String),

    #[error("source '{source_name}' failed for {location}: {reason}")]
    Source {
        source_name: String,
        location: String,
        reason: String,
    },

    #[error(transparent)]
    Reading(#[from] ReadingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a concentration value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    NotANumber,
    Infinite,
    Negative,
    /// Finite, but too large to represent as an exact decimal.
    OutOfRange,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::NotANumber => write!(f, "not a number"),
            InvalidReason::Infinite => write!(f, "infinite"),
            InvalidReason::Negative => write!(f, "negative"),
            InvalidReason::OutOfRange => write!(f, "out of representable range"),
        }
    }
}

/// A failure local to a single reading. These are collected next to the
/// result instead of aborting the whole computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReadingError {
    #[error("invalid measurement for '{key}': {reason}")]
    InvalidMeasurement { key: String, reason: InvalidReason },

    #[error("'{key}' cannot be reported in {unit}")]
    UnsupportedUnit {
        key: String,
        unit: ConcentrationUnit,
    },

    #[error("'{key}' has no unit; pollutant readings must declare one")]
    MissingUnit { key: String },

    #[error("duplicate reading for '{key}', keeping the first one")]
    DuplicateReading { key: String },

    #[error("no breakpoint table for '{key}'")]
    MissingTable { key: String },
}

impl ReadingError {
    /// Key of the reading this error belongs to.
    pub fn key(&self) -> &str {
        match self {
            ReadingError::InvalidMeasurement { key, .. }
            | ReadingError::UnsupportedUnit { key, .. }
            | ReadingError::MissingUnit { key }
            | ReadingError::DuplicateReading { key }
            | ReadingError::MissingTable { key } => key,
        }
    }
}
