use crate::aqi::category::{AqiCategory, Severity};
use crate::aqi::cigarette;
use crate::aqi::outcome::{AqiResult, RowMatch, SkippedReading, SubAqi};
use crate::aqi::{AboveRangePolicy, EngineOptions};
use crate::breakpoints::schema::{Breakpoint, BreakpointTable, TableSetDef};
use crate::convert;
use crate::error::{InvalidReason, ReadingError};
use crate::model::{Pollutant, Reading, WeatherField};
use crate::trace;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Ceiling for extrapolated indices.
pub const MAX_EXTRAPOLATED_AQI: u32 = 9_999;

/// Compute the sub-indices, overall AQI and cigarette equivalent for a set
/// of readings.
///
/// Never fails as a whole: a reading that cannot be used is recorded in
/// `skipped` and the others are computed normally. Keys that are neither
/// pollutants nor weather fields are listed in `ignored_keys`.
pub fn compute(readings: &[Reading], tables: &TableSetDef, options: &EngineOptions) -> AqiResult {
    let mut sub_aqis: BTreeMap<Pollutant, SubAqi> = BTreeMap::new();
    let mut weather = BTreeMap::new();
    let mut skipped = Vec::new();
    let mut ignored_keys = Vec::new();

    for reading in readings {
        if let Some(pollutant) = Pollutant::from_key(&reading.key) {
            let outcome = if sub_aqis.contains_key(&pollutant) || was_skipped(&skipped, pollutant.key()) {
                Err(ReadingError::DuplicateReading {
                    key: pollutant.key().to_string(),
                })
            } else {
                sub_index(pollutant, reading, tables, options.above_range)
            };

            match outcome {
                Ok(sub) => {
                    tracing::debug!(pollutant = %pollutant, aqi = sub.aqi, "{}", sub.reason);
                    sub_aqis.insert(pollutant, sub);
                }
                Err(error) => {
                    tracing::warn!(key = %reading.key, "skipping reading: {error}");
                    skipped.push(SkippedReading {
                        key: pollutant.key().to_string(),
                        error,
                    });
                }
            }
        } else if let Some(field) = WeatherField::from_key(&reading.key) {
            let key = field.key();
            let error = if weather.contains_key(&field) || was_skipped(&skipped, key) {
                ReadingError::DuplicateReading {
                    key: key.to_string(),
                }
            } else if reading.value.is_finite() {
                weather.insert(field, reading.value);
                continue;
            } else {
                ReadingError::InvalidMeasurement {
                    key: key.to_string(),
                    reason: non_finite_reason(reading.value),
                }
            };
            tracing::warn!(key = %reading.key, "skipping weather field: {error}");
            skipped.push(SkippedReading {
                key: key.to_string(),
                error,
            });
        } else {
            tracing::debug!(key = %reading.key, "ignoring unknown key");
            ignored_keys.push(reading.key.clone());
        }
    }

    let (overall_aqi, dominant_pollutant, overall_reason) = determine_overall(&sub_aqis);

    let measured_pm25 = sub_aqis.get(&Pollutant::Pm25).map(|s| s.concentration);
    let (cigarette_equivalent, cigarette_basis) = cigarette::cigarette_equivalent(
        measured_pm25,
        overall_aqi,
        tables.table(Pollutant::Pm25),
        options.above_range,
    );

    let mut result = AqiResult {
        table_set: tables.name.clone(),
        overall_aqi,
        category: AqiCategory::from_aqi(i64::from(overall_aqi)),
        overall_reason,
        dominant_pollutant,
        sub_aqis,
        cigarette_equivalent,
        cigarette_basis,
        weather,
        skipped,
        ignored_keys,
        trace: None,
    };

    if options.with_trace {
        result.trace = Some(trace::build_trace(&result, tables));
    }

    result
}

/// The first reading for a key decides, even when it was rejected.
fn was_skipped(skipped: &[SkippedReading], key: &str) -> bool {
    skipped.iter().any(|s| s.key == key)
}

/// Sub-index for one pollutant reading.
fn sub_index(
    pollutant: Pollutant,
    reading: &Reading,
    tables: &TableSetDef,
    policy: AboveRangePolicy,
) -> Result<SubAqi, ReadingError> {
    let key = pollutant.key();
    let value = validate_value(key, reading.value)?;
    let unit = reading.unit.ok_or_else(|| ReadingError::MissingUnit {
        key: key.to_string(),
    })?;

    let table = tables
        .table(pollutant)
        .ok_or_else(|| ReadingError::MissingTable {
            key: key.to_string(),
        })?;

    let concentration = convert::convert(pollutant, value, unit, table.unit)?;
    let exact = match to_decimal(key, concentration) {
        Ok(exact) => exact,
        // Beyond decimal range is necessarily above the table; clamping
        // needs no exact value.
        Err(_) if policy == AboveRangePolicy::Clamp && table.last().is_some() => Decimal::MAX,
        Err(e) => return Err(e),
    };
    let truncated = truncate(table, exact);
    let row = locate(table, truncated);
    let aqi = index_for(table, truncated, row, policy);

    let reason = match row {
        RowMatch::BelowRange => format!(
            "{}: {} {} is below the table -> AQI {}",
            key, truncated, table.unit, aqi
        ),
        RowMatch::Row(i) => {
            let bp = &table.breakpoints[i];
            format!(
                "{}: {} {} in [{}, {}] -> AQI {} (range {}-{})",
                key, truncated, table.unit, bp.c_low, bp.c_high, aqi, bp.i_low, bp.i_high
            )
        }
        RowMatch::AboveRange => {
            let how = match policy {
                AboveRangePolicy::Clamp => "clamped",
                AboveRangePolicy::Extrapolate => "extrapolated",
            };
            format!(
                "{}: {} {} exceeds the table -> AQI {} ({})",
                key, concentration, table.unit, aqi, how
            )
        }
    };

    Ok(SubAqi {
        pollutant,
        input_value: reading.value,
        input_unit: unit,
        concentration,
        unit: table.unit,
        truncated,
        row,
        aqi,
        severity: Severity::from_aqi(aqi),
        reason,
    })
}

/// Reject values that must not flow into the aggregate.
pub fn validate_value(key: &str, value: f64) -> Result<f64, ReadingError> {
    if !value.is_finite() {
        return Err(ReadingError::InvalidMeasurement {
            key: key.to_string(),
            reason: non_finite_reason(value),
        });
    }
    if value < 0.0 {
        return Err(ReadingError::InvalidMeasurement {
            key: key.to_string(),
            reason: InvalidReason::Negative,
        });
    }
    Ok(value)
}

fn non_finite_reason(value: f64) -> InvalidReason {
    if value.is_nan() {
        InvalidReason::NotANumber
    } else {
        InvalidReason::Infinite
    }
}

/// Exact decimal for a converted concentration.
///
/// Fixed to six places first, which also absorbs binary noise from unit
/// conversion (35.39999999 reads as 35.4) before truncation.
fn to_decimal(key: &str, value: f64) -> Result<Decimal, ReadingError> {
    Decimal::from_str(&format!("{value:.6}")).map_err(|_| ReadingError::InvalidMeasurement {
        key: key.to_string(),
        reason: InvalidReason::OutOfRange,
    })
}

/// Truncate toward zero to the table precision.
pub fn truncate(table: &BreakpointTable, concentration: Decimal) -> Decimal {
    concentration.round_dp_with_strategy(table.precision, RoundingStrategy::ToZero)
}

/// Find the row for an already-truncated concentration.
pub fn locate(table: &BreakpointTable, concentration: Decimal) -> RowMatch {
    let (Some(first), Some(last)) = (table.first(), table.last()) else {
        return RowMatch::BelowRange;
    };
    if concentration < first.c_low {
        return RowMatch::BelowRange;
    }
    if concentration > last.c_high {
        return RowMatch::AboveRange;
    }
    match table
        .breakpoints
        .iter()
        .rposition(|bp| bp.c_low <= concentration)
    {
        Some(i) => RowMatch::Row(i),
        None => RowMatch::BelowRange,
    }
}

/// Concentration to index for one table: truncate, look up the row, apply
/// the EPA linear formula.
///
/// Below the table the first row's lower index is returned; nothing is ever
/// extrapolated downwards. Above the table `policy` decides.
pub fn interpolate(table: &BreakpointTable, concentration: Decimal, policy: AboveRangePolicy) -> u32 {
    let truncated = truncate(table, concentration);
    let row = locate(table, truncated);
    index_for(table, truncated, row, policy)
}

fn index_for(table: &BreakpointTable, c: Decimal, row: RowMatch, policy: AboveRangePolicy) -> u32 {
    match row {
        RowMatch::BelowRange => table.first().map(|bp| bp.i_low).unwrap_or(0),
        RowMatch::Row(i) => {
            let bp = &table.breakpoints[i];
            if bp.contains(c) {
                linear(bp, c)
            } else {
                // Gap between rows; only reachable with an unvalidated table.
                bp.i_high
            }
        }
        RowMatch::AboveRange => match (table.last(), policy) {
            (Some(bp), AboveRangePolicy::Clamp) => bp.i_high,
            (Some(bp), AboveRangePolicy::Extrapolate) => linear(bp, c),
            (None, _) => 0,
        },
    }
}

/// `round(((i_high - i_low) / (c_high - c_low)) * (c - c_low) + i_low)`
///
/// Saturates at [`MAX_EXTRAPOLATED_AQI`] when extrapolating far above a table.
fn linear(bp: &Breakpoint, c: Decimal) -> u32 {
    let slope = (Decimal::from(bp.i_high) - Decimal::from(bp.i_low)) / (bp.c_high - bp.c_low);
    slope
        .checked_mul(c - bp.c_low)
        .and_then(|v| v.checked_add(Decimal::from(bp.i_low)))
        .map(|v| v.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|v| v.to_u32())
        .map_or(MAX_EXTRAPOLATED_AQI, |v| v.min(MAX_EXTRAPOLATED_AQI))
}

/// Index to concentration: the inverse of [`interpolate`] within a row.
///
/// Returns a value in the table unit. Above the top row the same
/// `policy` applies as for the forward direction.
pub fn concentration_for_index(table: &BreakpointTable, aqi: u32, policy: AboveRangePolicy) -> f64 {
    let Some(last) = table.last() else {
        return 0.0;
    };

    let target = Decimal::from(aqi);
    let bp = match table.breakpoints.iter().find(|bp| bp.contains_index(target)) {
        Some(bp) => bp,
        None if aqi > last.i_high => match policy {
            AboveRangePolicy::Clamp => return last.c_high.to_f64().unwrap_or(0.0),
            AboveRangePolicy::Extrapolate => last,
        },
        None => return 0.0,
    };

    let c_low = bp.c_low.to_f64().unwrap_or(0.0);
    let c_high = bp.c_high.to_f64().unwrap_or(0.0);
    if bp.i_high <= bp.i_low {
        return c_low;
    }
    let fraction =
        (f64::from(aqi) - f64::from(bp.i_low)) / (f64::from(bp.i_high) - f64::from(bp.i_low));
    fraction * (c_high - c_low) + c_low
}

/// Overall AQI is the maximum sub-index. Ties go to the first pollutant in
/// canonical order, which is the map's iteration order.
fn determine_overall(sub_aqis: &BTreeMap<Pollutant, SubAqi>) -> (u32, Option<Pollutant>, String) {
    let mut best: Option<&SubAqi> = None;
    for sub in sub_aqis.values() {
        match best {
            Some(current) if sub.aqi <= current.aqi => {}
            _ => best = Some(sub),
        }
    }

    match best {
        None => (0, None, "No pollutant readings".to_string()),
        Some(dominant) => {
            let tied: Vec<&str> = sub_aqis
                .values()
                .filter(|s| s.aqi == dominant.aqi && s.pollutant != dominant.pollutant)
                .map(|s| s.pollutant.key())
                .collect();
            let reason = if tied.is_empty() {
                format!("Determined by {} (AQI {})", dominant.pollutant, dominant.aqi)
            } else {
                format!(
                    "Determined by {} (AQI {}), tied with {}",
                    dominant.pollutant,
                    dominant.aqi,
                    tied.join(", ")
                )
            };
            (dominant.aqi, Some(dominant.pollutant), reason)
        }
    }
}

/// Convenience for callers holding a plain `f64` in the table unit.
pub fn interpolate_f64(table: &BreakpointTable, concentration: f64, policy: AboveRangePolicy) -> Option<u32> {
    Decimal::from_str(&format!("{concentration:.6}"))
        .ok()
        .map(|c| interpolate(table, c, policy))
}
