use smoke_alarm_core::error::AqiError;
use smoke_alarm_core::forecast;
use smoke_alarm_core::source::openweather;
use std::path::PathBuf;

use crate::output;
use crate::TableArgs;

pub fn run(
    input_file: PathBuf,
    table_args: &TableArgs,
    output_format: &str,
    all: bool,
) -> Result<(), AqiError> {
    let tables = super::load_tables(table_args)?;
    let options = super::engine_options(table_args, false);

    let json = std::fs::read_to_string(&input_file)?;
    let response = openweather::parse_response(&json)?;
    let days = forecast::daily_summaries(&response.list, &tables, options.above_range);
    let shown = if all { &days[..] } else { forecast::streak(&days) };

    match output_format {
        "json" => output::json::print_days(shown)?,
        _ => output::table::print_days(shown, forecast::today_utc()),
    }

    Ok(())
}
