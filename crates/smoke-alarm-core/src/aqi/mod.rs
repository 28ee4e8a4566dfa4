pub mod category;
pub mod cigarette;
pub mod engine;
pub mod outcome;

pub use category::{AqiCategory, Severity};
pub use engine::{compute, concentration_for_index, interpolate};
pub use outcome::{AqiResult, CigaretteBasis, RowMatch, SkippedReading, SubAqi};

use serde::{Deserialize, Serialize};

/// What to do with concentrations above the top breakpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AboveRangePolicy {
    /// Report the top row's upper index, however large the value.
    #[default]
    Clamp,
    /// Continue the top row's slope, up to
    /// [`MAX_EXTRAPOLATED_AQI`](engine::MAX_EXTRAPOLATED_AQI). Values beyond
    /// decimal range are rejected as out of range.
    Extrapolate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineOptions {
    #[serde(default)]
    pub above_range: AboveRangePolicy,
    /// Attach a step-by-step trace to the result.
    #[serde(default)]
    pub with_trace: bool,
}
