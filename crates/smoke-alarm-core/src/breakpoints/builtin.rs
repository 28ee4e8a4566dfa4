use crate::breakpoints::parse_tables_str;
use crate::breakpoints::schema::TableSetDef;
use crate::error::AqiError;

const EPA_2024_JSON: &str = include_str!("../../../../tables/epa-2024.json");

/// Available predefined table sets.
pub const PRESETS: &[&str] = &["epa-2024"];

/// Preset used when no tables are given explicitly.
pub const DEFAULT_PRESET: &str = "epa-2024";

/// Load a predefined table set by name.
pub fn load_preset(name: &str) -> Result<TableSetDef, AqiError> {
    match name {
        "epa-2024" | "epa" => parse_tables_str(EPA_2024_JSON),
        _ => Err(AqiError::TableInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The default EPA tables.
pub fn epa_2024() -> Result<TableSetDef, AqiError> {
    load_preset(DEFAULT_PRESET)
}
