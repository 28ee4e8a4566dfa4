//! Gas concentration unit conversion.
//!
//! Mass concentrations (µg/m³) and mixing ratios (ppb/ppm) are related
//! through the molar volume of an ideal gas at 25 °C and 1 atm:
//!
//! - ppb = µg/m³ × 24.45 / MW
//! - ppm = mg/m³ × 24.45 / MW, with mg/m³ = µg/m³ / 1000
//!
//! Particulates are only ever reported by mass and are never converted.

use crate::error::ReadingError;
use crate::model::{ConcentrationUnit, Pollutant};

/// Litres per mole of ideal gas at 25 °C and 1 atm.
pub const MOLAR_VOLUME: f64 = 24.45;

/// µg/m³ → ppb.
pub fn ugm3_to_ppb(ugm3: f64, molecular_weight: f64) -> f64 {
    (ugm3 * MOLAR_VOLUME) / molecular_weight
}

/// ppb → µg/m³.
pub fn ppb_to_ugm3(ppb: f64, molecular_weight: f64) -> f64 {
    (ppb * molecular_weight) / MOLAR_VOLUME
}

/// µg/m³ → ppm, going through mg/m³ first.
pub fn ugm3_to_ppm(ugm3: f64, molecular_weight: f64) -> f64 {
    let mgm3 = ugm3 / 1000.0;
    (mgm3 * MOLAR_VOLUME) / molecular_weight
}

/// ppm → µg/m³, the exact reverse of [`ugm3_to_ppm`].
pub fn ppm_to_ugm3(ppm: f64, molecular_weight: f64) -> f64 {
    let mgm3 = (ppm * molecular_weight) / MOLAR_VOLUME;
    mgm3 * 1000.0
}

/// Convert `value` for `pollutant` from unit `from` into unit `to`.
pub fn convert(
    pollutant: Pollutant,
    value: f64,
    from: ConcentrationUnit,
    to: ConcentrationUnit,
) -> Result<f64, ReadingError> {
    use ConcentrationUnit::*;

    if from == to {
        return Ok(value);
    }

    let Some(mw) = pollutant.molecular_weight() else {
        // Particulates: the only valid unit is µg/m³, and from != to here.
        let unit = if from == MicrogramsPerCubicMeter { to } else { from };
        return Err(ReadingError::UnsupportedUnit {
            key: pollutant.key().to_string(),
            unit,
        });
    };

    let converted = match (from, to) {
        (MicrogramsPerCubicMeter, Ppb) => ugm3_to_ppb(value, mw),
        (MicrogramsPerCubicMeter, Ppm) => ugm3_to_ppm(value, mw),
        (Ppb, MicrogramsPerCubicMeter) => ppb_to_ugm3(value, mw),
        (Ppm, MicrogramsPerCubicMeter) => ppm_to_ugm3(value, mw),
        (Ppb, Ppm) => value / 1000.0,
        (Ppm, Ppb) => value * 1000.0,
        _ => value,
    };
    Ok(converted)
}
