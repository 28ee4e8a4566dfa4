pub mod builtin;
pub mod schema;

use crate::error::AqiError;
use rust_decimal::Decimal;
use schema::TableSetDef;
use std::collections::HashSet;
use std::path::Path;

/// Concentrations are fixed to six decimals before truncation, so a table
/// cannot ask for more.
pub const MAX_PRECISION: u32 = 6;

/// Load a table set from a JSON file.
pub fn load_tables(path: &Path) -> Result<TableSetDef, AqiError> {
    let content = std::fs::read_to_string(path).map_err(|e| AqiError::TableLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_tables(&content, path)
}

/// Parse a table set from a JSON string.
pub fn parse_tables(json: &str, source: &Path) -> Result<TableSetDef, AqiError> {
    let tables: TableSetDef = serde_json::from_str(json).map_err(|e| AqiError::TableLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_tables(&tables)?;
    Ok(tables)
}

/// Parse a table set from a JSON string (no file path context).
pub fn parse_tables_str(json: &str) -> Result<TableSetDef, AqiError> {
    let tables: TableSetDef = serde_json::from_str(json).map_err(AqiError::Json)?;
    validate_tables(&tables)?;
    Ok(tables)
}

/// Validate that a table set is well-formed: one table per pollutant, in the
/// pollutant's EPA unit, with contiguous rows starting at zero.
pub fn validate_tables(set: &TableSetDef) -> Result<(), AqiError> {
    if set.tables.is_empty() {
        return Err(AqiError::TableInvalid("tables must not be empty".into()));
    }

    let mut seen = HashSet::new();
    for table in &set.tables {
        let key = table.pollutant.key();

        if !seen.insert(table.pollutant) {
            return Err(AqiError::TableInvalid(format!(
                "pollutant '{}' has more than one table",
                key
            )));
        }

        if table.unit != table.pollutant.epa_unit() {
            return Err(AqiError::TableInvalid(format!(
                "pollutant '{}' table is in {} (expected {})",
                key,
                table.unit,
                table.pollutant.epa_unit()
            )));
        }

        if table.precision > MAX_PRECISION {
            return Err(AqiError::TableInvalid(format!(
                "pollutant '{}' precision {} exceeds {}",
                key, table.precision, MAX_PRECISION
            )));
        }

        let Some(first) = table.first() else {
            return Err(AqiError::TableInvalid(format!(
                "pollutant '{}' has no breakpoints",
                key
            )));
        };

        if !first.c_low.is_zero() || first.i_low != 0 {
            return Err(AqiError::TableInvalid(format!(
                "pollutant '{}' must start at concentration 0 and index 0",
                key
            )));
        }

        for (i, bp) in table.breakpoints.iter().enumerate() {
            if bp.c_high <= bp.c_low {
                return Err(AqiError::TableInvalid(format!(
                    "pollutant '{}' row {}: c_high {} must exceed c_low {}",
                    key, i, bp.c_high, bp.c_low
                )));
            }
            if bp.i_high < bp.i_low {
                return Err(AqiError::TableInvalid(format!(
                    "pollutant '{}' row {}: i_high {} is below i_low {}",
                    key, i, bp.i_high, bp.i_low
                )));
            }
            if !fits_precision(bp.c_low, table.precision)
                || !fits_precision(bp.c_high, table.precision)
            {
                return Err(AqiError::TableInvalid(format!(
                    "pollutant '{}' row {}: bounds have more than {} decimals",
                    key, i, table.precision
                )));
            }
        }

        let step = table.step();
        for (i, pair) in table.breakpoints.windows(2).enumerate() {
            if pair[0].c_high + step != pair[1].c_low {
                return Err(AqiError::TableInvalid(format!(
                    "pollutant '{}' rows {} and {}: concentration gap between {} and {}",
                    key,
                    i,
                    i + 1,
                    pair[0].c_high,
                    pair[1].c_low
                )));
            }
            if pair[0].i_high + 1 != pair[1].i_low {
                return Err(AqiError::TableInvalid(format!(
                    "pollutant '{}' rows {} and {}: index gap between {} and {}",
                    key,
                    i,
                    i + 1,
                    pair[0].i_high,
                    pair[1].i_low
                )));
            }
        }
    }

    Ok(())
}

fn fits_precision(value: Decimal, precision: u32) -> bool {
    value.round_dp(precision) == value
}
