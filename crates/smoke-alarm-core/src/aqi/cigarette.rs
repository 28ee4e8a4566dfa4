//! Cigarette-equivalent exposure.
//!
//! Berkeley Earth's rule of thumb: breathing 22 µg/m³ of PM2.5 for a day is
//! comparable to smoking one cigarette. The measured PM2.5 concentration is
//! used when there is one; otherwise PM2.5 is back-derived from the overall
//! AQI through the PM2.5 table.

use crate::aqi::engine::concentration_for_index;
use crate::aqi::outcome::CigaretteBasis;
use crate::aqi::AboveRangePolicy;
use crate::breakpoints::schema::BreakpointTable;

/// µg/m³ of PM2.5 per cigarette per day.
pub const PM25_PER_CIGARETTE: f64 = 22.0;

pub fn cigarettes_from_pm25(pm25_ugm3: f64) -> f64 {
    pm25_ugm3 / PM25_PER_CIGARETTE
}

/// Unrounded cigarettes per day, and where the PM2.5 figure came from.
pub fn cigarette_equivalent(
    measured_pm25: Option<f64>,
    overall_aqi: u32,
    pm25_table: Option<&BreakpointTable>,
    policy: AboveRangePolicy,
) -> (f64, CigaretteBasis) {
    if let Some(pm25) = measured_pm25 {
        return (cigarettes_from_pm25(pm25), CigaretteBasis::MeasuredPm25);
    }
    match pm25_table {
        Some(table) => {
            let pm25 = concentration_for_index(table, overall_aqi, policy);
            (cigarettes_from_pm25(pm25), CigaretteBasis::DerivedFromAqi)
        }
        None => (0.0, CigaretteBasis::Unavailable),
    }
}
