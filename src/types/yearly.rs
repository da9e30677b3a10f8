use crate::types::variable::{Variable, VariableValues};
use serde::{Deserialize, Serialize};

/// A complete year reduced to one value per variable, before any trend is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyObservation {
    pub year: i32,
    pub observed: VariableValues,
}

/// A row of the final yearly table: observed values plus the in-sample value
/// of each variable's fitted trend line for the same year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyRow {
    pub year: i32,
    pub observed: VariableValues,
    pub trend: VariableValues,
}

impl YearlyRow {
    pub fn observed(&self, variable: Variable) -> f64 {
        self.observed.get(variable)
    }

    pub fn trend(&self, variable: Variable) -> f64 {
        self.trend.get(variable)
    }
}

/// Extrapolated values of every variable for one horizon year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub year: i32,
    pub predicted: VariableValues,
}

impl Prediction {
    pub fn predicted(&self, variable: Variable) -> f64 {
        self.predicted.get(variable)
    }
}
