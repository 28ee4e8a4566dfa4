use crate::model::{ConcentrationUnit, Pollutant};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named set of breakpoint tables, one per pollutant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSetDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub tables: Vec<BreakpointTable>,
}

impl TableSetDef {
    pub fn table(&self, pollutant: Pollutant) -> Option<&BreakpointTable> {
        self.tables.iter().find(|t| t.pollutant == pollutant)
    }
}

/// Piecewise-linear concentration to index mapping for one pollutant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakpointTable {
    pub pollutant: Pollutant,
    /// Unit of `c_low`/`c_high`. Readings are converted into it first.
    pub unit: ConcentrationUnit,
    /// Decimal places a concentration is truncated to before lookup.
    pub precision: u32,
    /// Averaging period the breakpoints were published for (e.g. "8-hour").
    #[serde(default)]
    pub averaging: Option<String>,
    /// Ordered from cleanest to most polluted.
    pub breakpoints: Vec<Breakpoint>,
}

impl BreakpointTable {
    /// Smallest concentration increment at this table's precision.
    pub fn step(&self) -> Decimal {
        Decimal::new(1, self.precision)
    }

    pub fn first(&self) -> Option<&Breakpoint> {
        self.breakpoints.first()
    }

    pub fn last(&self) -> Option<&Breakpoint> {
        self.breakpoints.last()
    }
}

/// One row of a breakpoint table. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub c_low: Decimal,
    pub c_high: Decimal,
    pub i_low: u32,
    pub i_high: u32,
}

impl Breakpoint {
    pub fn contains(&self, concentration: Decimal) -> bool {
        concentration >= self.c_low && concentration <= self.c_high
    }

    pub fn contains_index(&self, index: Decimal) -> bool {
        index >= Decimal::from(self.i_low) && index <= Decimal::from(self.i_high)
    }
}
