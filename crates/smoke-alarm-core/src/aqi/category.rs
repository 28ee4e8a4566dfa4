use serde::{Deserialize, Serialize};
use std::fmt;

/// EPA AQI category for an overall index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// Total over all integers. Negative values land in `Good`.
    pub fn from_aqi(aqi: i64) -> AqiCategory {
        match aqi {
            i64::MIN..=50 => AqiCategory::Good,
            51..=100 => AqiCategory::Moderate,
            101..=150 => AqiCategory::UnhealthyForSensitiveGroups,
            151..=200 => AqiCategory::Unhealthy,
            201..=300 => AqiCategory::VeryUnhealthy,
            _ => AqiCategory::Hazardous,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// EPA reporting colour for this category.
    pub fn color(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Green",
            AqiCategory::Moderate => "Yellow",
            AqiCategory::UnhealthyForSensitiveGroups => "Orange",
            AqiCategory::Unhealthy => "Red",
            AqiCategory::VeryUnhealthy => "Purple",
            AqiCategory::Hazardous => "Maroon",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Coarse per-pollutant status used next to each sub-index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Good,
    Moderate,
    Unhealthy,
}

impl Severity {
    pub fn from_aqi(aqi: u32) -> Severity {
        match aqi {
            0..=50 => Severity::Good,
            51..=100 => Severity::Moderate,
            _ => Severity::Unhealthy,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Good => write!(f, "good"),
            Severity::Moderate => write!(f, "moderate"),
            Severity::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries() {
        assert_eq!(AqiCategory::from_aqi(0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(50), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(51), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_aqi(100), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_aqi(101), AqiCategory::UnhealthyForSensitiveGroups);
        assert_eq!(AqiCategory::from_aqi(150), AqiCategory::UnhealthyForSensitiveGroups);
        assert_eq!(AqiCategory::from_aqi(151), AqiCategory::Unhealthy);
        assert_eq!(AqiCategory::from_aqi(200), AqiCategory::Unhealthy);
        assert_eq!(AqiCategory::from_aqi(201), AqiCategory::VeryUnhealthy);
        assert_eq!(AqiCategory::from_aqi(300), AqiCategory::VeryUnhealthy);
        assert_eq!(AqiCategory::from_aqi(301), AqiCategory::Hazardous);
        assert_eq!(AqiCategory::from_aqi(999), AqiCategory::Hazardous);
    }

    #[test]
    fn test_category_clamps_out_of_range() {
        assert_eq!(AqiCategory::from_aqi(-20), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(i64::MIN), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(i64::MAX), AqiCategory::Hazardous);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(AqiCategory::Good.to_string(), "Good");
        assert_eq!(
            AqiCategory::UnhealthyForSensitiveGroups.to_string(),
            "Unhealthy for Sensitive Groups"
        );
        let json = serde_json::to_string(&AqiCategory::VeryUnhealthy).unwrap();
        assert_eq!(json, "\"Very Unhealthy\"");
    }

    #[test]
    fn test_severity() {
        assert_eq!(Severity::from_aqi(50), Severity::Good);
        assert_eq!(Severity::from_aqi(51), Severity::Moderate);
        assert_eq!(Severity::from_aqi(100), Severity::Moderate);
        assert_eq!(Severity::from_aqi(101), Severity::Unhealthy);
    }
}
