use chrono::NaiveDate;
use smoke_alarm_core::aqi::{AqiResult, CigaretteBasis};
use smoke_alarm_core::forecast::{self, DailyAqi};
use smoke_alarm_core::share;

pub fn print(label: &str, result: &AqiResult, verbose: bool) {
    println!("=== {} ===\n", label);

    println!(
        "  AQI: {} {} ({})",
        result.overall_aqi,
        result.category,
        result.category.color()
    );
    println!("  {}\n", result.overall_reason);

    let basis = match result.cigarette_basis {
        CigaretteBasis::MeasuredPm25 => "from measured PM2.5",
        CigaretteBasis::DerivedFromAqi => "estimated from the AQI",
        CigaretteBasis::Unavailable => "no PM2.5 table",
    };
    println!(
        "  Cigarettes/day: {} ({})\n",
        share::cigarette_display(result.cigarette_equivalent),
        basis
    );

    if !result.sub_aqis.is_empty() {
        let max_name = result
            .sub_aqis
            .values()
            .map(|s| s.pollutant.display_name().chars().count())
            .max()
            .unwrap_or(10);

        for sub in result.sub_aqis.values() {
            let marker = if Some(sub.pollutant) == result.dominant_pollutant {
                " *"
            } else {
                ""
            };
            let name = sub.pollutant.display_name();
            let pad = max_name.saturating_sub(name.chars().count());
            println!(
                "  {}{}  {:>8} {:<6} -> {:>3} {}{}",
                name,
                " ".repeat(pad),
                share::display_value(sub.concentration),
                sub.unit.to_string(),
                sub.aqi,
                sub.severity,
                marker
            );
            if verbose {
                println!("    {}", sub.reason);
            }
        }
        println!();
    }

    if !result.weather.is_empty() {
        let parts: Vec<String> = result
            .weather
            .iter()
            .map(|(field, value)| format!("{} {}{}", field, value, field.unit()))
            .collect();
        println!("  Weather: {}\n", parts.join(", "));
    }

    if !result.skipped.is_empty() {
        println!("  Skipped readings:");
        for s in &result.skipped {
            println!("    {}", s.error);
        }
        println!();
    }

    if verbose && !result.ignored_keys.is_empty() {
        println!("  Ignored keys: {}\n", result.ignored_keys.join(", "));
    }
}

pub fn print_days(days: &[DailyAqi], today: NaiveDate) {
    if days.is_empty() {
        println!("No days to show.");
        return;
    }

    println!("  {:<10} {:>5} {:>9}  Category", "Day", "Avg", "Range");
    println!("  {}", "-".repeat(50));
    for day in days {
        println!(
            "  {:<10} {:>5} {:>9}  {}",
            forecast::day_label(day.day, today),
            day.avg,
            format!("{}-{}", day.min, day.max),
            day.category
        );
    }
}
