use smoke_alarm_core::aqi::AqiResult;
use smoke_alarm_core::error::AqiError;
use smoke_alarm_core::forecast::DailyAqi;

pub fn print(result: &AqiResult) -> Result<(), AqiError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

pub fn print_days(days: &[DailyAqi]) -> Result<(), AqiError> {
    let json = serde_json::to_string_pretty(days)?;
    println!("{json}");
    Ok(())
}
