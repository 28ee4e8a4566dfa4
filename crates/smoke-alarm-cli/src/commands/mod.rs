pub mod compute;
pub mod forecast;
pub mod share;
pub mod tables;

use smoke_alarm_core::aqi::{AboveRangePolicy, EngineOptions};
use smoke_alarm_core::breakpoints::{self, builtin, schema::TableSetDef};
use smoke_alarm_core::error::AqiError;

use crate::TableArgs;

/// Custom table file if given, otherwise the preset.
fn load_tables(args: &TableArgs) -> Result<TableSetDef, AqiError> {
    match &args.table {
        Some(path) => {
            let set = breakpoints::load_tables(path)?;
            tracing::info!(path = %path.display(), name = %set.name, "loaded custom tables");
            Ok(set)
        }
        None => builtin::load_preset(&args.preset),
    }
}

fn engine_options(args: &TableArgs, with_trace: bool) -> EngineOptions {
    EngineOptions {
        above_range: if args.extrapolate {
            AboveRangePolicy::Extrapolate
        } else {
            AboveRangePolicy::Clamp
        },
        with_trace,
    }
}
