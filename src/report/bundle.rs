//! The read-only bundle shared by every consumer of an analysis: the CLI
//! tables, the charts and the PDF all read their numbers from [`ReportData`].

use crate::analysis::projector::PredictionTable;
use crate::analysis::trend::{TrendModel, TrendModels};
use crate::analysis::TrendAnalysis;
use crate::config::StationInfo;
use crate::types::variable::Variable;
use crate::types::yearly::YearlyRow;
use std::sync::Arc;

/// Decimal places of on-screen tables.
pub const DISPLAY_DECIMALS: usize = 2;

/// Decimal places of the slope metrics.
pub const SLOPE_DECIMALS: usize = 4;

pub const EXTRAPOLATION_CAVEAT: &str = "Predictions 100 and 1000 years ahead are purely \
hypothetical linear extrapolation with no real scientific meaning. They only show how fast \
the quantities would change if the current linear trend continued unchanged.";

/// Formats a full-precision value with `decimals` places.
pub fn format_value(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Slope of one variable's trend, as shown in the metrics panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendMetric {
    pub variable: Variable,
    pub model: TrendModel,
}

impl TrendMetric {
    /// e.g. `0.0312 °C/yr`.
    pub fn slope_label(&self) -> String {
        format!(
            "{} {}/yr",
            format_value(self.model.slope, SLOPE_DECIMALS),
            self.variable.unit()
        )
    }

    pub fn direction_label(&self) -> &'static str {
        self.variable.direction_label(self.model.is_rising())
    }
}

/// One prediction row formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionDisplayRow {
    pub year: i32,
    pub values: Vec<String>,
}

/// Yearly table, fitted models and horizon predictions of one analysis.
///
/// Values are kept at full precision; every rounding happens in the
/// formatting helpers, so two views with different precisions never round
/// an already rounded number.
#[derive(Debug, Clone)]
pub struct ReportData {
    station: StationInfo,
    analysis: Arc<TrendAnalysis>,
    predictions: PredictionTable,
    current_year: i32,
}

impl ReportData {
    pub fn new(
        station: StationInfo,
        analysis: Arc<TrendAnalysis>,
        horizon_years: &[i32],
        current_year: i32,
    ) -> Self {
        let predictions = analysis.predict(horizon_years);
        Self {
            station,
            analysis,
            predictions,
            current_year,
        }
    }

    pub fn station(&self) -> &StationInfo {
        &self.station
    }

    pub fn yearly(&self) -> &[YearlyRow] {
        self.analysis.yearly()
    }

    pub fn models(&self) -> &TrendModels {
        self.analysis.models()
    }

    pub fn predictions(&self) -> &PredictionTable {
        &self.predictions
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn first_year(&self) -> i32 {
        self.analysis.first_year()
    }

    pub fn last_year(&self) -> i32 {
        self.analysis.last_year()
    }

    pub fn trend_metrics(&self) -> Vec<TrendMetric> {
        Variable::ALL
            .iter()
            .map(|variable| TrendMetric {
                variable: *variable,
                model: *self.models().get(*variable),
            })
            .collect()
    }

    /// Prediction rows with each variable formatted to `decimals(variable)` places.
    pub fn prediction_rows(&self, decimals: impl Fn(Variable) -> usize) -> Vec<PredictionDisplayRow> {
        self.predictions
            .rows()
            .iter()
            .map(|prediction| PredictionDisplayRow {
                year: prediction.year,
                values: Variable::ALL
                    .iter()
                    .map(|v| format_value(prediction.predicted(*v), decimals(*v)))
                    .collect(),
            })
            .collect()
    }
}
