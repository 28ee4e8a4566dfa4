//! Integration tests for the compute pipeline end to end.
//!
//! Uses a MockSource that returns canned snapshots, so nothing here touches
//! the network or the filesystem.

use smoke_alarm_core::aqi::{AboveRangePolicy, AqiCategory, CigaretteBasis, EngineOptions};
use smoke_alarm_core::breakpoints::builtin::load_preset;
use smoke_alarm_core::error::{AqiError, InvalidReason, ReadingError};
use smoke_alarm_core::model::{ConcentrationUnit, Pollutant, Reading, WeatherField};
use smoke_alarm_core::source::fallback::{FallbackConfig, FallbackSource};
use smoke_alarm_core::source::{Location, PollutionSnapshot, PollutionSource};
use smoke_alarm_core::{compute_aqi, compute_document, compute_with_preset};
use std::collections::HashMap;

struct MockSource {
    snapshots: HashMap<String, Vec<Reading>>,
}

impl MockSource {
    fn with(city: &str, readings: Vec<Reading>) -> Self {
        MockSource {
            snapshots: HashMap::from([(city.to_string(), readings)]),
        }
    }
}

impl PollutionSource for MockSource {
    fn fetch(&self, location: &Location) -> Result<PollutionSnapshot, AqiError> {
        let name = location.to_string();
        match self.snapshots.get(&name) {
            Some(readings) => Ok(PollutionSnapshot {
                label: name,
                observed_at: None,
                readings: readings.clone(),
            }),
            None => Err(AqiError::Source {
                source_name: "mock".into(),
                location: name,
                reason: "no data".into(),
            }),
        }
    }

    fn source_name(&self) -> &str {
        "mock"
    }
}

fn defaults() -> EngineOptions {
    EngineOptions::default()
}

// ---------------------------------------------------------------------------
// Test 1: PM2.5 at the top of the Good band decides the overall index
// ---------------------------------------------------------------------------
#[test]
fn pm25_upper_good_boundary() {
    let tables = load_preset("epa-2024").unwrap();
    let readings = vec![Reading::ugm3("pm2_5", 9.0), Reading::ugm3("pm10", 0.0)];

    let result = compute_aqi(&readings, &tables, &defaults());

    assert_eq!(result.overall_aqi, 50);
    assert_eq!(result.category, AqiCategory::Good);
    assert_eq!(result.dominant_pollutant, Some(Pollutant::Pm25));
    assert!(result.overall_reason.contains("pm2_5"));
    assert!(!result.is_above_safe_limit());
}

// ---------------------------------------------------------------------------
// Test 2: No readings at all
// ---------------------------------------------------------------------------
#[test]
fn empty_input_is_zero_and_good() {
    let result = compute_with_preset(&[], "epa-2024", &defaults()).unwrap();

    assert_eq!(result.overall_aqi, 0);
    assert_eq!(result.category, AqiCategory::Good);
    assert_eq!(result.dominant_pollutant, None);
    assert!(result.sub_aqis.is_empty());
    assert_eq!(result.cigarette_equivalent, 0.0);
}

// ---------------------------------------------------------------------------
// Test 3: 22 µg/m³ of PM2.5 is one cigarette
// ---------------------------------------------------------------------------
#[test]
fn one_cigarette_at_22_ugm3() {
    let result = compute_with_preset(&[Reading::ugm3("pm2_5", 22.0)], "epa", &defaults()).unwrap();

    approx::assert_relative_eq!(result.cigarette_equivalent, 1.0);
    assert_eq!(result.cigarette_basis, CigaretteBasis::MeasuredPm25);
}

// ---------------------------------------------------------------------------
// Test 4: A bad reading is skipped without affecting the others
// ---------------------------------------------------------------------------
#[test]
fn nan_reading_is_skipped_not_fatal() {
    let tables = load_preset("epa-2024").unwrap();
    let readings = vec![Reading::ugm3("pm2_5", f64::NAN), Reading::ugm3("pm10", 100.0)];

    let result = compute_aqi(&readings, &tables, &defaults());

    assert_eq!(
        result.skipped_error("pm2_5"),
        Some(&ReadingError::InvalidMeasurement {
            key: "pm2_5".into(),
            reason: InvalidReason::NotANumber,
        })
    );
    // pm10 100 -> row 55-154 (51-100) -> 73
    assert_eq!(result.overall_aqi, 73);
    assert_eq!(result.dominant_pollutant, Some(Pollutant::Pm10));
    // no measured PM2.5, so cigarettes come from the overall index
    assert_eq!(result.cigarette_basis, CigaretteBasis::DerivedFromAqi);
    assert!(result.cigarette_equivalent > 0.0);
}

// ---------------------------------------------------------------------------
// Test 5: Gases reported in µg/m³ are converted to the table unit
// ---------------------------------------------------------------------------
#[test]
fn gases_are_converted_before_lookup() {
    let tables = load_preset("epa-2024").unwrap();
    let readings = vec![
        Reading::ugm3("co", 1000.0),
        Reading::new("o3", 70.0, ConcentrationUnit::Ppb),
    ];

    let result = compute_aqi(&readings, &tables, &defaults());

    let co = result.sub_aqi(Pollutant::Co).unwrap();
    assert_eq!(co.unit, ConcentrationUnit::Ppm);
    // 0.8729 ppm truncated to 0.8 -> 50 * 0.8 / 4.4 = 9.09
    assert_eq!(co.aqi, 9);

    let o3 = result.sub_aqi(Pollutant::O3).unwrap();
    assert_eq!(o3.aqi, 100);
    assert_eq!(result.overall_aqi, 100);
    assert_eq!(result.category, AqiCategory::Moderate);
}

// ---------------------------------------------------------------------------
// Test 6: Particulates only accept µg/m³
// ---------------------------------------------------------------------------
#[test]
fn particulate_in_ppm_is_rejected() {
    let tables = load_preset("epa-2024").unwrap();
    let readings = vec![Reading::new("pm10", 30.0, ConcentrationUnit::Ppm)];

    let result = compute_aqi(&readings, &tables, &defaults());

    assert!(matches!(
        result.skipped_error("pm10"),
        Some(ReadingError::UnsupportedUnit { .. })
    ));
    assert_eq!(result.overall_aqi, 0);
}

// ---------------------------------------------------------------------------
// Test 7: Above the top breakpoint
// ---------------------------------------------------------------------------
#[test]
fn above_range_clamp_and_extrapolate() {
    let tables = load_preset("epa-2024").unwrap();
    let readings = vec![Reading::ugm3("pm2_5", 600.0)];

    let clamped = compute_aqi(&readings, &tables, &defaults());
    assert_eq!(clamped.overall_aqi, 500);
    assert_eq!(clamped.category, AqiCategory::Hazardous);

    let options = EngineOptions {
        above_range: AboveRangePolicy::Extrapolate,
        ..Default::default()
    };
    let extrapolated = compute_aqi(&readings, &tables, &options);
    assert!(extrapolated.overall_aqi > 500);
}

// ---------------------------------------------------------------------------
// Test 8: OpenWeatherMap document end to end
// ---------------------------------------------------------------------------
#[test]
fn openweather_document_end_to_end() {
    let tables = load_preset("epa-2024").unwrap();
    let json = r#"{
        "coord": { "lon": 77.2167, "lat": 28.6667 },
        "list": [
            { "main": { "aqi": 5 },
              "components": { "co": 1201.63, "no": 0.0, "no2": 55.52, "o3": 30.4,
                              "so2": 25.75, "pm2_5": 148.2, "pm10": 203.12, "nh3": 14.82 },
              "dt": 1700000000 }
        ]
    }"#;

    let (snapshot, result) = compute_document(json, &tables, &defaults()).unwrap();

    assert!(snapshot.observed_at.is_some());
    // pm2_5 148.2 -> row 125.5-225.4 (201-300) -> 223
    assert_eq!(result.overall_aqi, 223);
    assert_eq!(result.category, AqiCategory::VeryUnhealthy);
    assert_eq!(result.dominant_pollutant, Some(Pollutant::Pm25));
    assert_eq!(result.sub_aqis.len(), 6);
    assert_eq!(result.ignored_keys.len(), 2);
    approx::assert_relative_eq!(result.cigarette_equivalent, 148.2 / 22.0, epsilon = 1e-9);
}

// ---------------------------------------------------------------------------
// Test 9: Weather fields ride along untouched
// ---------------------------------------------------------------------------
#[test]
fn weather_fields_pass_through() {
    let tables = load_preset("epa-2024").unwrap();
    let readings = vec![
        Reading::ugm3("pm2_5", 12.0),
        Reading::weather("t", 21.5),
        Reading::weather("h", 40.0),
    ];

    let result = compute_aqi(&readings, &tables, &defaults());

    assert_eq!(result.weather.get(&WeatherField::Temperature), Some(&21.5));
    assert_eq!(result.weather.get(&WeatherField::Humidity), Some(&40.0));
    assert_eq!(result.sub_aqis.len(), 1);
}

// ---------------------------------------------------------------------------
// Test 10: Unknown city falls back to the default location
// ---------------------------------------------------------------------------
#[test]
fn unknown_city_falls_back_to_default() {
    let tables = load_preset("epa-2024").unwrap();
    let mock = MockSource::with("Delhi", vec![Reading::ugm3("pm2_5", 180.0)]);
    let source = FallbackSource::new(mock, FallbackConfig::default());

    let resolved = source.resolve(&Location::City("Atlantis".into())).unwrap();
    assert!(resolved.used_fallback);
    assert_eq!(resolved.snapshot.label, "Delhi");

    let result = compute_aqi(&resolved.snapshot.readings, &tables, &defaults());
    assert!(result.is_above_safe_limit());
    assert_eq!(result.category, AqiCategory::VeryUnhealthy);
}

// ---------------------------------------------------------------------------
// Test 11: Results serialize with stable keys
// ---------------------------------------------------------------------------
#[test]
fn result_serializes_with_pollutant_keys() {
    let tables = load_preset("epa-2024").unwrap();
    let readings = vec![Reading::ugm3("pm2_5", 35.5), Reading::ugm3("bogus", 1.0)];

    let result = compute_aqi(&readings, &tables, &defaults());
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["overall_aqi"], 101);
    assert_eq!(json["dominant_pollutant"], "pm2_5");
    assert!(json["sub_aqis"]["pm2_5"].is_object());
    assert_eq!(json["ignored_keys"][0], "bogus");
}

// ---------------------------------------------------------------------------
// Test 12: Pollutants without a unit are rejected, not assumed
// ---------------------------------------------------------------------------
#[test]
fn unitless_pollutant_is_skipped() {
    let tables = load_preset("epa-2024").unwrap();
    let json = r#"[{ "key": "o3", "value": 70 }, { "key": "pm2_5", "value": 9.0, "unit": "ug/m3" }]"#;

    let (_, result) = compute_document(json, &tables, &defaults()).unwrap();

    assert_eq!(
        result.skipped_error("o3"),
        Some(&ReadingError::MissingUnit { key: "o3".into() })
    );
    assert!(result.sub_aqi(Pollutant::O3).is_none());
    assert_eq!(result.overall_aqi, 50);
    assert_eq!(result.dominant_pollutant, Some(Pollutant::Pm25));
}

// ---------------------------------------------------------------------------
// Test 13: Absurdly large values still clamp to the top of the scale
// ---------------------------------------------------------------------------
#[test]
fn huge_value_clamps_to_hazardous() {
    let tables = load_preset("epa-2024").unwrap();
    let readings = vec![Reading::ugm3("pm10", 1e30)];

    let result = compute_aqi(&readings, &tables, &defaults());

    assert!(result.skipped.is_empty());
    assert_eq!(result.overall_aqi, 500);
    assert_eq!(result.category, AqiCategory::Hazardous);
    assert_eq!(result.dominant_pollutant, Some(Pollutant::Pm10));
}
