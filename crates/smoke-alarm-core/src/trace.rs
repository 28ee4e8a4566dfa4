use crate::aqi::outcome::{AqiResult, CigaretteBasis, RowMatch, SubAqi};
use crate::aqi::Severity;
use crate::breakpoints::schema::TableSetDef;
use crate::model::{ConcentrationUnit, Pollutant};
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSeverity {
    Critical,
    Important,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceVisibility {
    Always,
    Auto,
    OnDemand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    ValidateValue,
    ConvertUnit,
    TruncateConcentration,
    BreakpointLookup,
    Interpolate,
    OverallDecision,
    CigaretteEquivalent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub message: String,
}

/// How one reading became a sub-index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    pub entry_id: String,
    pub pollutant: Pollutant,
    pub raw_value: f64,
    pub raw_unit: ConcentrationUnit,
    pub converted_value: f64,
    pub unit: ConcentrationUnit,
    pub steps: Vec<TraceStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceDecisionTarget {
    Pollutant,
    Overall,
    Cigarettes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceDecision {
    pub decision_id: String,
    pub target: TraceDecisionTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pollutant: Option<Pollutant>,
    pub reason: String,
    pub severity: TraceSeverity,
    pub visibility: TraceVisibility,
    pub steps: Vec<TraceStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceWarning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub message: String,
    pub severity: TraceSeverity,
    pub visibility: TraceVisibility,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceBundle {
    pub trace_schema_version: String,
    pub entries: Vec<TraceEntry>,
    pub decisions: Vec<TraceDecision>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TraceWarning>,
}

impl Default for TraceBundle {
    fn default() -> Self {
        Self {
            trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
            entries: Vec::new(),
            decisions: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Build the full trace for a computed result.
pub fn build_trace(result: &AqiResult, tables: &TableSetDef) -> TraceBundle {
    let mut bundle = TraceBundle::default();

    for (idx, sub) in result.sub_aqis.values().enumerate() {
        bundle.entries.push(build_entry_trace(idx, sub, tables));
    }

    bundle.decisions = build_decisions(result);

    for skipped in &result.skipped {
        bundle.warnings.push(TraceWarning {
            key: Some(skipped.key.clone()),
            message: format!("Skipped reading: {}", skipped.error),
            severity: TraceSeverity::Important,
            visibility: TraceVisibility::Always,
        });
    }
    for key in &result.ignored_keys {
        bundle.warnings.push(TraceWarning {
            key: Some(key.clone()),
            message: format!("Ignored unknown key '{}'", key),
            severity: TraceSeverity::Info,
            visibility: TraceVisibility::OnDemand,
        });
    }

    bundle
}

pub fn build_entry_trace(entry_idx: usize, sub: &SubAqi, tables: &TableSetDef) -> TraceEntry {
    let mut steps = vec![TraceStep {
        step_type: TraceStepType::ValidateValue,
        message: format!("Accepted {} {}", sub.input_value, sub.input_unit),
    }];

    steps.push(TraceStep {
        step_type: TraceStepType::ConvertUnit,
        message: if sub.input_unit == sub.unit {
            format!("Already in {}", sub.unit)
        } else {
            format!(
                "Converted {} {} -> {:.6} {}",
                sub.input_value, sub.input_unit, sub.concentration, sub.unit
            )
        },
    });

    let precision = tables
        .table(sub.pollutant)
        .map(|t| t.precision)
        .unwrap_or_default();
    steps.push(TraceStep {
        step_type: TraceStepType::TruncateConcentration,
        message: format!(
            "Truncated {:.6} to {} ({} decimal(s))",
            sub.concentration, sub.truncated, precision
        ),
    });

    let lookup = match sub.row {
        RowMatch::BelowRange => "Below the first breakpoint".to_string(),
        RowMatch::Row(i) => match tables
            .table(sub.pollutant)
            .and_then(|t| t.breakpoints.get(i))
        {
            Some(bp) => format!(
                "Row {}: [{}, {}] -> [{}, {}]",
                i, bp.c_low, bp.c_high, bp.i_low, bp.i_high
            ),
            None => format!("Row {}", i),
        },
        RowMatch::AboveRange => "Above the last breakpoint".to_string(),
    };
    steps.push(TraceStep {
        step_type: TraceStepType::BreakpointLookup,
        message: lookup,
    });

    steps.push(TraceStep {
        step_type: TraceStepType::Interpolate,
        message: sub.reason.clone(),
    });

    TraceEntry {
        entry_id: format!("ent_{}_{}", entry_idx, sub.pollutant),
        pollutant: sub.pollutant,
        raw_value: sub.input_value,
        raw_unit: sub.input_unit,
        converted_value: sub.concentration,
        unit: sub.unit,
        steps,
    }
}

pub fn build_decisions(result: &AqiResult) -> Vec<TraceDecision> {
    let mut decisions = Vec::new();

    decisions.push(TraceDecision {
        decision_id: "dec_overall".to_string(),
        target: TraceDecisionTarget::Overall,
        pollutant: result.dominant_pollutant,
        reason: result.overall_reason.clone(),
        severity: TraceSeverity::Important,
        visibility: TraceVisibility::Always,
        steps: vec![TraceStep {
            step_type: TraceStepType::OverallDecision,
            message: format!(
                "Overall AQI {} ({}) determined by: {}",
                result.overall_aqi,
                result.category,
                result
                    .dominant_pollutant
                    .map(|p| p.key().to_string())
                    .unwrap_or_else(|| "none".to_string())
            ),
        }],
    });

    for (idx, sub) in result.sub_aqis.values().enumerate() {
        decisions.push(TraceDecision {
            decision_id: format!("dec_sub_{}_{}", idx, sub.pollutant),
            target: TraceDecisionTarget::Pollutant,
            pollutant: Some(sub.pollutant),
            reason: sub.reason.clone(),
            severity: if sub.severity == Severity::Unhealthy {
                TraceSeverity::Important
            } else {
                TraceSeverity::Info
            },
            visibility: TraceVisibility::Auto,
            steps: vec![TraceStep {
                step_type: TraceStepType::Interpolate,
                message: format!("{} -> {} ({})", sub.pollutant, sub.aqi, sub.severity),
            }],
        });
    }

    let basis = match result.cigarette_basis {
        CigaretteBasis::MeasuredPm25 => "measured PM2.5",
        CigaretteBasis::DerivedFromAqi => "PM2.5 derived from the overall AQI",
        CigaretteBasis::Unavailable => "no PM2.5 available",
    };
    decisions.push(TraceDecision {
        decision_id: "dec_cigarettes".to_string(),
        target: TraceDecisionTarget::Cigarettes,
        pollutant: Some(Pollutant::Pm25),
        reason: format!(
            "{:.2} cigarette(s) per day from {}",
            result.cigarette_equivalent, basis
        ),
        severity: TraceSeverity::Info,
        visibility: TraceVisibility::OnDemand,
        steps: vec![TraceStep {
            step_type: TraceStepType::CigaretteEquivalent,
            message: format!("PM2.5 µg/m³ / 22 = {}", result.cigarette_equivalent),
        }],
    });

    decisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aqi::{compute, EngineOptions};
    use crate::breakpoints::builtin::epa_2024;
    use crate::model::Reading;

    fn traced(readings: &[Reading]) -> TraceBundle {
        let options = EngineOptions {
            with_trace: true,
            ..Default::default()
        };
        compute(readings, &epa_2024().unwrap(), &options)
            .trace
            .expect("trace requested")
    }

    #[test]
    fn test_entry_per_sub_index() {
        let bundle = traced(&[Reading::ugm3("pm2_5", 12.0), Reading::ugm3("co", 1000.0)]);
        assert_eq!(bundle.entries.len(), 2);
        let co = bundle
            .entries
            .iter()
            .find(|e| e.pollutant == Pollutant::Co)
            .unwrap();
        assert_eq!(co.unit, ConcentrationUnit::Ppm);
        assert!(co.steps[1].message.contains("Converted"));
        assert!(co.steps[2].message.contains("0.8"));
    }

    #[test]
    fn test_overall_and_cigarette_decisions() {
        let bundle = traced(&[Reading::ugm3("pm2_5", 22.0)]);
        assert_eq!(bundle.decisions[0].target, TraceDecisionTarget::Overall);
        let cig = bundle.decisions.last().unwrap();
        assert_eq!(cig.target, TraceDecisionTarget::Cigarettes);
        assert!(cig.reason.contains("1.00"));
    }

    #[test]
    fn test_skipped_and_ignored_become_warnings() {
        let bundle = traced(&[
            Reading::ugm3("pm2_5", f64::NAN),
            Reading::ugm3("nh3", 3.0),
        ]);
        assert_eq!(bundle.warnings.len(), 2);
        assert!(bundle.warnings[0].message.contains("pm2_5"));
        assert_eq!(bundle.warnings[1].severity, TraceSeverity::Info);
    }

    #[test]
    fn test_trace_not_attached_by_default() {
        let result = compute(
            &[Reading::ugm3("pm2_5", 5.0)],
            &epa_2024().unwrap(),
            &EngineOptions::default(),
        );
        assert!(result.trace.is_none());
    }
}
