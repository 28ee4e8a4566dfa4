use smoke_alarm_core::aqi::AqiCategory;
use smoke_alarm_core::breakpoints::{self, builtin};
use smoke_alarm_core::error::AqiError;
use smoke_alarm_core::model::Pollutant;
use std::path::Path;

pub fn list() -> Result<(), AqiError> {
    println!("Available breakpoint table presets:\n");
    for name in builtin::PRESETS {
        let set = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!("  {:<10} {} (v{}){}", name, set.name, set.version, default_marker);
        if let Some(ref desc) = set.description {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), AqiError> {
    let set = builtin::load_preset(preset)?;

    println!("{} (version {})\n", set.name, set.version);
    if let Some(ref desc) = set.description {
        println!("{}\n", desc);
    }

    println!("Each pollutant concentration is truncated to the table precision,");
    println!("matched to the row containing it, and interpolated linearly within");
    println!("that row. The overall AQI is the highest sub-index.\n");

    for table in &set.tables {
        let averaging = table
            .averaging
            .as_deref()
            .map(|a| format!(", {a}"))
            .unwrap_or_default();
        println!(
            "{} ({}{}, {} decimal(s))",
            table.pollutant.display_name(),
            table.unit,
            averaging,
            table.precision
        );
        println!("  {:<22} {:<10} Category", "Concentration", "AQI");
        println!("  {}", "-".repeat(54));
        for bp in &table.breakpoints {
            println!(
                "  {:<22} {:<10} {}",
                format!("{} - {}", bp.c_low, bp.c_high),
                format!("{}-{}", bp.i_low, bp.i_high),
                AqiCategory::from_aqi(i64::from(bp.i_high))
            );
        }
        println!();
    }

    let missing: Vec<&str> = Pollutant::CANONICAL_ORDER
        .iter()
        .filter(|p| set.table(**p).is_none())
        .map(|p| p.key())
        .collect();
    if !missing.is_empty() {
        println!("No table for: {} (readings are skipped)\n", missing.join(", "));
    }

    Ok(())
}

pub fn schema() -> Result<(), AqiError> {
    print!(
        r#"JSON Breakpoint Table Schema
============================

A table file defines, for each pollutant, the concentration ranges that map
onto AQI ranges. When you run `smoke-alarm compute --table FILE`, each
reading is converted into the table unit, truncated to the table precision
and interpolated within the row that contains it.

Top-level fields:
  name          (string, required)  Human-readable name of the table set
  description   (string, optional)  What these tables are for
  version       (string, required)  Version identifier (e.g., "2024.05")
  tables        (array, required)   One entry per pollutant (see below)

Each entry in the "tables" array:
  pollutant     (string, required)  One of: pm2_5, pm10, no2, so2, co, o3
  unit          (string, required)  "ug/m3" for pm2_5/pm10, "ppb" for
                                    no2/so2/o3, "ppm" for co
  precision     (number, required)  Decimal places concentrations are
                                    truncated to before lookup (0-6)
  averaging     (string, optional)  Averaging period, for display
  breakpoints   (array, required)   Rows from cleanest to most polluted

Each row in "breakpoints":
  c_low, c_high (string, required)  Concentration bounds, inclusive.
                                    Quoted decimals with at most
                                    `precision` decimal places.
  i_low, i_high (number, required)  AQI bounds, inclusive

Rules checked by `smoke-alarm tables validate`:
  - the first row starts at c_low 0 and i_low 0
  - c_high > c_low and i_high >= i_low in every row
  - rows are contiguous: the next c_low is c_high plus one step at the
    table precision, the next i_low is i_high + 1
  - at most one table per pollutant

Example:
{{
  "name": "Site X tables",
  "version": "1.0",
  "tables": [
    {{
      "pollutant": "pm2_5",
      "unit": "ug/m3",
      "precision": 1,
      "averaging": "24-hour",
      "breakpoints": [
        {{ "c_low": "0.0", "c_high": "9.0", "i_low": 0, "i_high": 50 }},
        {{ "c_low": "9.1", "c_high": "35.4", "i_low": 51, "i_high": 100 }}
      ]
    }}
  ]
}}

Note: concentration bounds must be quoted strings, not bare numbers,
to preserve exact decimal precision (e.g., "9.0" not 9.0).

Pollutants without a table are reported as skipped readings; the rest of
the computation continues.
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), AqiError> {
    let set = breakpoints::load_tables(file)?;

    println!("Table set '{}' (v{}) is valid.", set.name, set.version);
    let covered: Vec<&str> = set.tables.iter().map(|t| t.pollutant.key()).collect();
    println!("  Pollutants: {}", covered.join(", "));

    // Warnings only; none of these fail validation.
    let mut warnings = Vec::new();
    for pollutant in Pollutant::CANONICAL_ORDER {
        if set.table(pollutant).is_none() {
            warnings.push(format!("no table for '{}'", pollutant.key()));
        }
    }
    for table in &set.tables {
        if let Some(last) = table.last() {
            if last.i_high < 500 {
                warnings.push(format!(
                    "'{}' tops out at AQI {}; higher concentrations are clamped or extrapolated",
                    table.pollutant.key(),
                    last.i_high
                ));
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
