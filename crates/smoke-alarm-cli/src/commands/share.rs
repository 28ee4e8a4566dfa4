use chrono::NaiveDate;
use smoke_alarm_core::error::AqiError;
use smoke_alarm_core::{forecast, share};
use std::path::PathBuf;

use crate::TableArgs;

pub fn run(
    input_file: PathBuf,
    city: Option<String>,
    date: Option<NaiveDate>,
    table_args: &TableArgs,
) -> Result<(), AqiError> {
    let tables = super::load_tables(table_args)?;
    let options = super::engine_options(table_args, false);

    let json = std::fs::read_to_string(&input_file)?;
    let (snapshot, result) = smoke_alarm_core::compute_document(&json, &tables, &options)?;

    let city = city.unwrap_or(snapshot.label);
    let date = date
        .or_else(|| snapshot.observed_at.map(forecast::day_of))
        .unwrap_or_else(forecast::today_utc);

    println!("{}", share::share_text(&result, &city, date));
    Ok(())
}
