//! Defines the physical variables tracked per station and everything that
//! differs between them: column names, units, labels and the yearly reducer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three physical quantities recorded by a climate station.
///
/// Every stage of the pipeline is written against this enum rather than
/// against hardcoded column names, so adding a column mapping happens here
/// and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variable {
    /// Monthly mean air temperature, reduced to a yearly mean.
    Temperature,
    /// Monthly mean wind speed, reduced to a yearly mean.
    Wind,
    /// Monthly precipitation total, reduced to a yearly sum.
    Precipitation,
}

/// How the twelve monthly values of a complete year collapse into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearlyReducer {
    Mean,
    Sum,
}

impl Variable {
    /// All variables, in the order they appear in tables and reports.
    pub const ALL: [Variable; 3] = [
        Variable::Temperature,
        Variable::Wind,
        Variable::Precipitation,
    ];

    /// Short key used for yearly columns and prediction names (`tavg`, `wspd`, `prcp`).
    pub fn key(&self) -> &'static str {
        match self {
            Variable::Temperature => "tavg",
            Variable::Wind => "wspd",
            Variable::Precipitation => "prcp",
        }
    }

    /// Column name this variable takes in the merged monthly table.
    pub(crate) fn monthly_column(&self) -> &'static str {
        match self {
            Variable::Temperature => "t_avg",
            Variable::Wind => "wspd_avg",
            Variable::Precipitation => "prcp_sum",
        }
    }

    pub fn reducer(&self) -> YearlyReducer {
        match self {
            Variable::Temperature | Variable::Wind => YearlyReducer::Mean,
            Variable::Precipitation => YearlyReducer::Sum,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variable::Temperature => "Average temperature",
            Variable::Wind => "Average wind speed",
            Variable::Precipitation => "Total yearly precipitation",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Variable::Temperature => "°C",
            Variable::Wind => "m/s",
            Variable::Precipitation => "mm",
        }
    }

    /// Metric label shown for a rising (`true`) or falling trend.
    ///
    /// A slope of exactly zero is reported with the falling label.
    pub fn direction_label(&self, rising: bool) -> &'static str {
        match (self, rising) {
            (Variable::Temperature, true) => "Warming",
            (Variable::Temperature, false) => "Cooling",
            (Variable::Wind, true) => "Strengthening",
            (Variable::Wind, false) => "Weakening",
            (Variable::Precipitation, true) => "More precipitation",
            (Variable::Precipitation, false) => "Less precipitation",
        }
    }

    /// Decimal places used for this variable in the PDF report.
    pub fn pdf_decimals(&self) -> usize {
        match self {
            Variable::Temperature => 1,
            Variable::Wind => 2,
            Variable::Precipitation => 0,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variable::Temperature => "temperature",
            Variable::Wind => "wind",
            Variable::Precipitation => "precipitation",
        };
        write!(f, "{}", name)
    }
}

/// One value per variable. Used for yearly observations, fitted trend values
/// and predictions alike.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VariableValues {
    pub tavg: f64,
    pub wspd: f64,
    pub prcp: f64,
}

impl VariableValues {
    pub fn new(tavg: f64, wspd: f64, prcp: f64) -> Self {
        Self { tavg, wspd, prcp }
    }

    /// Builds the triple by evaluating `f` once per variable.
    pub fn from_fn(mut f: impl FnMut(Variable) -> f64) -> Self {
        Self {
            tavg: f(Variable::Temperature),
            wspd: f(Variable::Wind),
            prcp: f(Variable::Precipitation),
        }
    }

    pub fn get(&self, variable: Variable) -> f64 {
        match variable {
            Variable::Temperature => self.tavg,
            Variable::Wind => self.wspd,
            Variable::Precipitation => self.prcp,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.tavg.is_finite() && self.wspd.is_finite() && self.prcp.is_finite()
    }
}
