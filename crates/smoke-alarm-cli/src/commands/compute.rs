use smoke_alarm_core::error::AqiError;
use smoke_alarm_core::source::fallback::{FallbackConfig, FallbackSource};
use smoke_alarm_core::source::file::JsonDirSource;
use smoke_alarm_core::source::Location;
use std::path::PathBuf;

use crate::output;
use crate::TableArgs;

pub enum Input {
    File(PathBuf),
    City {
        city: String,
        dir: PathBuf,
        default_city: String,
    },
    Missing,
}

pub fn run(
    input: Input,
    table_args: &TableArgs,
    output_format: &str,
    verbose: bool,
    with_trace: bool,
) -> Result<(), AqiError> {
    let tables = super::load_tables(table_args)?;
    let options = super::engine_options(table_args, with_trace);

    let (label, result) = match input {
        Input::File(path) => {
            let json = std::fs::read_to_string(&path)?;
            let (snapshot, result) = smoke_alarm_core::compute_document(&json, &tables, &options)?;
            (snapshot.label, result)
        }
        Input::City {
            city,
            dir,
            default_city,
        } => {
            let source = FallbackSource::new(
                JsonDirSource::new(dir),
                FallbackConfig {
                    default_location: Location::City(default_city),
                },
            );
            let resolved = source.resolve(&Location::City(city))?;
            if resolved.used_fallback {
                eprintln!(
                    "Note: no data for {}, showing {} instead",
                    resolved.requested, resolved.snapshot.label
                );
            }
            let result =
                smoke_alarm_core::compute_aqi(&resolved.snapshot.readings, &tables, &options);
            (resolved.snapshot.label, result)
        }
        Input::Missing => {
            return Err(AqiError::ParseError(
                "give an input file, or --city with --data-dir".into(),
            ))
        }
    };

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print(&label, &result, verbose),
    }

    Ok(())
}
