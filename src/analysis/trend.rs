//! Ordinary least squares fit of each variable against calendar year.

use crate::analysis::error::AnalysisError;
use crate::types::variable::{Variable, VariableValues};
use crate::types::yearly::{YearlyObservation, YearlyRow};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A fitted straight line `value = slope * year + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendModel {
    /// Evaluates the line at `year`. No clamping is applied, however far
    /// `year` lies from the fitted range.
    pub fn predict(&self, year: i32) -> f64 {
        predict(self, year)
    }

    /// Whether the slope counts as a rising trend. Zero counts as falling.
    pub fn is_rising(&self) -> bool {
        self.slope > 0.0
    }
}

pub fn predict(model: &TrendModel, year: i32) -> f64 {
    model.slope * f64::from(year) + model.intercept
}

/// Fits `value` on `year` with the closed-form OLS solution on centred sums.
///
/// Returns `None` when fewer than two distinct years are present, since no
/// line is determined by a single abscissa.
pub fn fit_line(points: &[(i32, f64)]) -> Option<TrendModel> {
    let distinct_years: BTreeSet<i32> = points.iter().map(|(year, _)| *year).collect();
    if distinct_years.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| f64::from(*x)).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| *y).sum::<f64>() / n;

    let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
        let dx = f64::from(*x) - mean_x;
        (sxx + dx * dx, sxy + dx * (y - mean_y))
    });

    let slope = sxy / sxx;
    Some(TrendModel {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// One independently fitted model per variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendModels {
    pub tavg: TrendModel,
    pub wspd: TrendModel,
    pub prcp: TrendModel,
}

impl TrendModels {
    pub fn get(&self, variable: Variable) -> &TrendModel {
        match variable {
            Variable::Temperature => &self.tavg,
            Variable::Wind => &self.wspd,
            Variable::Precipitation => &self.prcp,
        }
    }

    /// Evaluates every model at `year`.
    pub fn predict(&self, year: i32) -> VariableValues {
        VariableValues::from_fn(|variable| self.get(variable).predict(year))
    }
}

/// Fits the three trend models and attaches each year's in-sample trend values.
///
/// # Errors
///
/// Returns [`AnalysisError::InsufficientData`] if fewer than two years are available.
pub fn fit_trends(
    observations: &[YearlyObservation],
) -> Result<(TrendModels, Vec<YearlyRow>), AnalysisError> {
    let fit = |variable: Variable| {
        let points: Vec<(i32, f64)> = observations
            .iter()
            .map(|o| (o.year, o.observed.get(variable)))
            .collect();
        let model = fit_line(&points).ok_or(AnalysisError::InsufficientData {
            variable,
            years: observations.len(),
        })?;
        debug!(
            "Fitted {} trend: slope {:.6}, intercept {:.6}",
            variable, model.slope, model.intercept
        );
        Ok::<_, AnalysisError>(model)
    };

    let models = TrendModels {
        tavg: fit(Variable::Temperature)?,
        wspd: fit(Variable::Wind)?,
        prcp: fit(Variable::Precipitation)?,
    };

    let rows = observations
        .iter()
        .map(|o| YearlyRow {
            year: o.year,
            observed: o.observed,
            trend: models.predict(o.year),
        })
        .collect();

    Ok((models, rows))
}
