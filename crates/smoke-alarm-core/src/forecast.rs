//! Daily AQI summaries over a series of timestamped readings.

use crate::aqi::{compute, AboveRangePolicy, AqiCategory, EngineOptions};
use crate::breakpoints::schema::TableSetDef;
use crate::source::openweather::AirPollutionEntry;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How many days a streak shows.
pub const STREAK_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAqi {
    /// UTC calendar day.
    pub day: NaiveDate,
    pub avg: u32,
    pub max: u32,
    pub min: u32,
    pub samples: usize,
    /// Category of the daily average.
    pub category: AqiCategory,
}

/// Group entries by UTC day and summarize the overall AQI of each.
///
/// Days are returned newest first. Entries with an unrepresentable
/// timestamp are dropped.
pub fn daily_summaries(
    entries: &[AirPollutionEntry],
    tables: &TableSetDef,
    above_range: AboveRangePolicy,
) -> Vec<DailyAqi> {
    let options = EngineOptions {
        above_range,
        with_trace: false,
    };
    let mut by_day: BTreeMap<NaiveDate, Vec<u32>> = BTreeMap::new();

    for entry in entries {
        let Some(at) = entry.observed_at() else {
            tracing::warn!(dt = entry.dt, "dropping entry with invalid timestamp");
            continue;
        };
        let result = compute(&entry.readings(), tables, &options);
        by_day
            .entry(at.date_naive())
            .or_default()
            .push(result.overall_aqi);
    }

    by_day
        .into_iter()
        .rev()
        .filter_map(|(day, values)| summarize(day, &values))
        .collect()
}

fn summarize(day: NaiveDate, values: &[u32]) -> Option<DailyAqi> {
    let max = *values.iter().max()?;
    let min = *values.iter().min()?;
    let sum: u64 = values.iter().map(|v| u64::from(*v)).sum();
    let n = values.len() as u64;
    // round half up
    let avg = u32::try_from((2 * sum + n) / (2 * n)).unwrap_or(u32::MAX);
    Some(DailyAqi {
        day,
        avg,
        max,
        min,
        samples: values.len(),
        category: AqiCategory::from_aqi(i64::from(avg)),
    })
}

/// The most recent `STREAK_DAYS` summaries.
pub fn streak(summaries: &[DailyAqi]) -> &[DailyAqi] {
    &summaries[..summaries.len().min(STREAK_DAYS)]
}

/// Short label for a day relative to `today`: "Today", "Yesterday", a
/// weekday within the last week, otherwise "Mon D".
pub fn day_label(day: NaiveDate, today: NaiveDate) -> String {
    match (today - day).num_days() {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => day.format("%a").to_string(),
        _ => day.format("%b %-d").to_string(),
    }
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Convenience for callers holding a timestamp instead of a date.
pub fn day_of(at: DateTime<Utc>) -> NaiveDate {
    at.date_naive()
}
