//! Plain-text summary for sharing a result.

use crate::aqi::AqiResult;
use chrono::NaiveDate;

pub const HASHTAGS: &str = "#AirQuality #ClimateAction";

/// Whole cigarettes to report: rounded up, 0 below one.
pub fn cigarette_count(cigarettes: f64) -> u32 {
    if cigarettes < 1.0 || !cigarettes.is_finite() {
        0
    } else {
        cigarettes.ceil() as u32
    }
}

/// "Healthy" below one cigarette, otherwise one decimal.
pub fn cigarette_display(cigarettes: f64) -> String {
    if cigarettes < 1.0 {
        "Healthy".to_string()
    } else {
        format!("{cigarettes:.1}")
    }
}

/// One-decimal rendering used for concentrations in summaries.
pub fn display_value(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

fn status_line(result: &AqiResult) -> String {
    if result.overall_aqi <= 50 {
        return "✨ Status: Clean Air & Healthy Atmosphere".to_string();
    }
    match result.dominant() {
        Some(sub) => format!(
            "⚠️ Highest Pollutant: {} ({} {})",
            sub.pollutant.display_name(),
            display_value(sub.concentration),
            sub.unit
        ),
        None => "⚠️ Highest Pollutant: N/A".to_string(),
    }
}

/// Multi-line summary of `result` for `city` on `date`.
pub fn share_text(result: &AqiResult, city: &str, date: NaiveDate) -> String {
    let cigs = cigarette_count(result.cigarette_equivalent);
    let cig_line = if cigs >= 1 {
        format!("🚬 Cigarette Equivalent: {cigs} cigs/day")
    } else {
        "🫁 Breathing: Healthy".to_string()
    };

    format!(
        "Today's Air Quality in {city}\n\n🌍 AQI: {aqi} ({category})\n{cig_line}\n{status}\n📅 {date}\n\n{HASHTAGS}",
        aqi = result.overall_aqi,
        category = result.category,
        status = status_line(result),
        date = date.format("%A, %B %-d, %Y"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aqi::{compute, EngineOptions};
    use crate::breakpoints::builtin::epa_2024;
    use crate::model::Reading;

    fn result_for(readings: &[Reading]) -> AqiResult {
        compute(readings, &epa_2024().unwrap(), &EngineOptions::default())
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_cigarette_count() {
        assert_eq!(cigarette_count(0.0), 0);
        assert_eq!(cigarette_count(0.99), 0);
        assert_eq!(cigarette_count(1.0), 1);
        assert_eq!(cigarette_count(1.2), 2);
        assert_eq!(cigarette_count(f64::NAN), 0);
    }

    #[test]
    fn test_cigarette_display() {
        assert_eq!(cigarette_display(0.4), "Healthy");
        assert_eq!(cigarette_display(2.345), "2.3");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(12.0), "12");
        assert_eq!(display_value(12.04), "12");
        assert_eq!(display_value(12.06), "12.1");
    }

    #[test]
    fn test_clean_air_text() {
        let text = share_text(&result_for(&[Reading::ugm3("pm2_5", 5.0)]), "Oslo", day());
        assert!(text.starts_with("Today's Air Quality in Oslo\n"));
        assert!(text.contains("Breathing: Healthy"));
        assert!(text.contains("Clean Air"));
        assert!(text.contains("Friday, March 1, 2024"));
        assert!(text.ends_with(HASHTAGS));
    }

    #[test]
    fn test_polluted_text() {
        let result = result_for(&[Reading::ugm3("pm2_5", 45.0), Reading::ugm3("pm10", 20.0)]);
        let text = share_text(&result, "Delhi", day());
        assert!(text.contains("AQI: 124"));
        // 45 / 22 = 2.05 -> 3
        assert!(text.contains("Cigarette Equivalent: 3 cigs/day"));
        assert!(text.contains("Highest Pollutant: Particulate Matter (PM2.5) (45 µg/m³)"));
    }
}
