use serde::{Deserialize, Serialize};
use std::fmt;

/// The pollutant species that contribute to the AQI.
///
/// Declaration order is the canonical key order, which is also the tie-break
/// order when two pollutants share the maximum sub-index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    #[serde(rename = "pm2_5", alias = "pm25", alias = "pm2.5")]
    Pm25,
    #[serde(rename = "pm10")]
    Pm10,
    #[serde(rename = "no2")]
    No2,
    #[serde(rename = "so2")]
    So2,
    #[serde(rename = "co")]
    Co,
    #[serde(rename = "o3")]
    O3,
}

impl Pollutant {
    pub const CANONICAL_ORDER: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm2_5",
            Pollutant::Pm10 => "pm10",
            Pollutant::No2 => "no2",
            Pollutant::So2 => "so2",
            Pollutant::Co => "co",
            Pollutant::O3 => "o3",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "Particulate Matter (PM2.5)",
            Pollutant::Pm10 => "Particulate Matter (PM10)",
            Pollutant::No2 => "Nitrogen Dioxide (NO₂)",
            Pollutant::So2 => "Sulfur Dioxide (SO₂)",
            Pollutant::Co => "Carbon Monoxide (CO)",
            Pollutant::O3 => "Ozone (O₃)",
        }
    }

    /// Molecular weight in g/mol. `None` for particulates.
    pub fn molecular_weight(&self) -> Option<f64> {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => None,
            Pollutant::No2 => Some(46.01),
            Pollutant::So2 => Some(64.07),
            Pollutant::Co => Some(28.01),
            Pollutant::O3 => Some(48.00),
        }
    }

    /// Unit the EPA breakpoints for this pollutant are expressed in.
    pub fn epa_unit(&self) -> ConcentrationUnit {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => ConcentrationUnit::MicrogramsPerCubicMeter,
            Pollutant::Co => ConcentrationUnit::Ppm,
            Pollutant::No2 | Pollutant::So2 | Pollutant::O3 => ConcentrationUnit::Ppb,
        }
    }

    /// Case-insensitive key lookup, accepting the common PM2.5 spellings.
    pub fn from_key(s: &str) -> Option<Pollutant> {
        match s.trim().to_lowercase().as_str() {
            "pm2_5" | "pm25" | "pm2.5" => Some(Pollutant::Pm25),
            "pm10" => Some(Pollutant::Pm10),
            "no2" => Some(Pollutant::No2),
            "so2" => Some(Pollutant::So2),
            "co" => Some(Pollutant::Co),
            "o3" => Some(Pollutant::O3),
            _ => None,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Weather fields that some providers report next to pollutants. They are
/// passed through untouched and never contribute to the AQI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeatherField {
    #[serde(rename = "t")]
    Temperature,
    #[serde(rename = "h")]
    Humidity,
    #[serde(rename = "p")]
    Pressure,
    #[serde(rename = "w")]
    Wind,
    #[serde(rename = "wg")]
    WindGust,
}

impl WeatherField {
    pub fn from_key(s: &str) -> Option<WeatherField> {
        match s.trim().to_lowercase().as_str() {
            "t" => Some(WeatherField::Temperature),
            "h" => Some(WeatherField::Humidity),
            "p" => Some(WeatherField::Pressure),
            "w" => Some(WeatherField::Wind),
            "wg" => Some(WeatherField::WindGust),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            WeatherField::Temperature => "t",
            WeatherField::Humidity => "h",
            WeatherField::Pressure => "p",
            WeatherField::Wind => "w",
            WeatherField::WindGust => "wg",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            WeatherField::Temperature => "°C",
            WeatherField::Humidity => "%",
            WeatherField::Pressure => "hPa",
            WeatherField::Wind | WeatherField::WindGust => "m/s",
        }
    }
}

impl fmt::Display for WeatherField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherField::Temperature => write!(f, "Temperature"),
            WeatherField::Humidity => write!(f, "Humidity"),
            WeatherField::Pressure => write!(f, "Pressure"),
            WeatherField::Wind => write!(f, "Wind"),
            WeatherField::WindGust => write!(f, "Wind Gust"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcentrationUnit {
    #[serde(rename = "ug/m3", alias = "µg/m³", alias = "µg/m3")]
    MicrogramsPerCubicMeter,
    #[serde(rename = "ppm")]
    Ppm,
    #[serde(rename = "ppb")]
    Ppb,
}

impl fmt::Display for ConcentrationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcentrationUnit::MicrogramsPerCubicMeter => write!(f, "µg/m³"),
            ConcentrationUnit::Ppm => write!(f, "ppm"),
            ConcentrationUnit::Ppb => write!(f, "ppb"),
        }
    }
}

impl ConcentrationUnit {
    pub fn from_str_loose(s: &str) -> Option<ConcentrationUnit> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "ppm" => Some(ConcentrationUnit::Ppm),
            "ppb" => Some(ConcentrationUnit::Ppb),
            _ if lower.contains("g/m") => Some(ConcentrationUnit::MicrogramsPerCubicMeter),
            _ => None,
        }
    }
}

/// One raw value as delivered by a source, tagged with the unit it was
/// reported in.
///
/// Pollutant readings without a unit are rejected by the engine, never
/// guessed. Weather fields carry no concentration unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub key: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<ConcentrationUnit>,
}

impl Reading {
    pub fn new(key: impl Into<String>, value: f64, unit: ConcentrationUnit) -> Self {
        Self {
            key: key.into(),
            value,
            unit: Some(unit),
        }
    }

    /// A weather field (`t`, `h`, `p`, `w`, `wg`), which has no unit.
    pub fn weather(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
            unit: None,
        }
    }

    /// Shorthand for a mass concentration reading.
    pub fn ugm3(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, value, ConcentrationUnit::MicrogramsPerCubicMeter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pollutant_key_aliases() {
        assert_eq!(Pollutant::from_key("PM2_5"), Some(Pollutant::Pm25));
        assert_eq!(Pollutant::from_key("pm25"), Some(Pollutant::Pm25));
        assert_eq!(Pollutant::from_key(" pm2.5 "), Some(Pollutant::Pm25));
        assert_eq!(Pollutant::from_key("O3"), Some(Pollutant::O3));
        assert_eq!(Pollutant::from_key("nh3"), None);
    }

    #[test]
    fn test_canonical_order_matches_ord() {
        let mut sorted = Pollutant::CANONICAL_ORDER;
        sorted.sort();
        assert_eq!(sorted, Pollutant::CANONICAL_ORDER);
    }

    #[test]
    fn test_weather_keys_are_not_pollutants() {
        for key in ["t", "h", "p", "w", "wg"] {
            assert_eq!(WeatherField::from_key(key).map(|f| f.key()), Some(key));
            assert!(Pollutant::from_key(key).is_none());
        }
    }

    #[test]
    fn test_unit_from_str_loose() {
        assert_eq!(
            ConcentrationUnit::from_str_loose("µg/m³"),
            Some(ConcentrationUnit::MicrogramsPerCubicMeter)
        );
        assert_eq!(
            ConcentrationUnit::from_str_loose("ug/m3"),
            Some(ConcentrationUnit::MicrogramsPerCubicMeter)
        );
        assert_eq!(ConcentrationUnit::from_str_loose("PPB"), Some(ConcentrationUnit::Ppb));
        assert_eq!(ConcentrationUnit::from_str_loose("AQI"), None);
    }

    #[test]
    fn test_reading_unit_serde() {
        let r: Reading = serde_json::from_str(r#"{"key":"co","value":250.0,"unit":"µg/m³"}"#).unwrap();
        assert_eq!(r.unit, Some(ConcentrationUnit::MicrogramsPerCubicMeter));
        let r: Reading = serde_json::from_str(r#"{"key":"o3","value":40.0,"unit":"ppb"}"#).unwrap();
        assert_eq!(r.unit, Some(ConcentrationUnit::Ppb));
        let json = serde_json::to_string(&Reading::ugm3("pm10", 12.0)).unwrap();
        assert!(json.contains("\"ug/m3\""));
    }

    #[test]
    fn test_reading_without_unit_stays_untagged() {
        let r: Reading = serde_json::from_str(r#"{"key":"o3","value":70}"#).unwrap();
        assert_eq!(r.unit, None);
        let json = serde_json::to_string(&Reading::weather("t", 21.0)).unwrap();
        assert!(!json.contains("unit"));
    }
}
