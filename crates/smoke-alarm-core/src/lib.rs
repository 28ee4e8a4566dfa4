pub mod aqi;
pub mod breakpoints;
pub mod convert;
pub mod error;
pub mod forecast;
pub mod model;
pub mod share;
pub mod source;
pub mod trace;

use aqi::{AqiResult, EngineOptions};
use breakpoints::schema::TableSetDef;
use error::AqiError;
use model::Reading;
use source::{InputDocument, PollutionSnapshot};

/// Main API entry point: compute the EPA AQI for a set of readings.
///
/// Never fails as a whole. Readings that cannot be used are listed in
/// `AqiResult::skipped` and the rest still count.
pub fn compute_aqi(readings: &[Reading], tables: &TableSetDef, options: &EngineOptions) -> AqiResult {
    aqi::compute(readings, tables, options)
}

/// Compute against a builtin table preset (see `breakpoints::builtin::PRESETS`).
pub fn compute_with_preset(
    readings: &[Reading],
    preset: &str,
    options: &EngineOptions,
) -> Result<AqiResult, AqiError> {
    let tables = breakpoints::builtin::load_preset(preset)?;
    Ok(aqi::compute(readings, &tables, options))
}

/// Parse an input document (OpenWeatherMap response, readings document or
/// bare readings array) and compute its current snapshot.
pub fn compute_document(
    json: &str,
    tables: &TableSetDef,
    options: &EngineOptions,
) -> Result<(PollutionSnapshot, AqiResult), AqiError> {
    let snapshot = InputDocument::parse(json)?.into_snapshot("input")?;
    tracing::info!(
        location = %snapshot.label,
        readings = snapshot.readings.len(),
        "computing AQI"
    );
    let result = aqi::compute(&snapshot.readings, tables, options);
    Ok((snapshot, result))
}
