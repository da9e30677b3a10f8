//! The aggregation and trend pipeline: load, merge, filter complete years,
//! reduce to yearly values, fit and project.

pub mod aggregator;
pub mod cache;
pub mod completeness;
pub mod error;
pub mod merger;
pub mod projector;
pub mod trend;

use crate::analysis::aggregator::aggregate_yearly;
use crate::analysis::cache::AnalysisCache;
use crate::analysis::completeness::filter_complete_years;
use crate::analysis::merger::merge_monthly;
use crate::analysis::projector::{project, PredictionTable};
use crate::analysis::trend::{fit_trends, TrendModels};
use crate::config::ClimateConfig;
use crate::error::ClimateError;
use crate::sources::fingerprint::SourceKey;
use crate::sources::loader::load_monthly;
use crate::types::variable::Variable;
use crate::types::yearly::{YearlyObservation, YearlyRow};
use log::info;
use serde::Serialize;
use std::sync::Arc;

/// The immutable product of one pipeline run: the yearly table with in-sample
/// trend values and the three fitted models.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendAnalysis {
    yearly: Vec<YearlyRow>,
    models: TrendModels,
}

impl TrendAnalysis {
    /// Fits trends to already aggregated yearly observations.
    pub fn fit(observations: &[YearlyObservation]) -> Result<Self, ClimateError> {
        let (models, yearly) = fit_trends(observations)?;
        Ok(Self { yearly, models })
    }

    pub fn yearly(&self) -> &[YearlyRow] {
        &self.yearly
    }

    pub fn models(&self) -> &TrendModels {
        &self.models
    }

    /// First year of the yearly table. The table is never empty.
    pub fn first_year(&self) -> i32 {
        self.yearly.first().map(|row| row.year).unwrap_or_default()
    }

    pub fn last_year(&self) -> i32 {
        self.yearly.last().map(|row| row.year).unwrap_or_default()
    }

    /// Extrapolates the fitted models to `years` without refitting.
    pub fn predict(&self, years: &[i32]) -> PredictionTable {
        project(&self.models, years)
    }
}

/// Runs the whole pipeline on the configured sources.
///
/// Any failure aborts the run; no partial analysis is returned.
pub fn analyze(config: &ClimateConfig) -> Result<TrendAnalysis, ClimateError> {
    let temperature = load_monthly(Variable::Temperature, &config.temperature)?;
    let wind = load_monthly(Variable::Wind, &config.wind)?;
    let precipitation = load_monthly(Variable::Precipitation, &config.precipitation)?;

    let merged = merge_monthly(temperature, wind, precipitation);
    let complete = filter_complete_years(merged)?;
    let observations = aggregate_yearly(complete)?;
    let analysis = TrendAnalysis::fit(&observations)?;

    info!(
        "Analysed {} years ({}-{}) for station {}",
        analysis.yearly.len(),
        analysis.first_year(),
        analysis.last_year(),
        config.station.id
    );
    Ok(analysis)
}

/// Like [`analyze`], but reuses the result cached for unchanged sources.
pub fn analyze_cached(
    config: &ClimateConfig,
    cache: &AnalysisCache<TrendAnalysis>,
) -> Result<Arc<TrendAnalysis>, ClimateError> {
    let key = SourceKey::for_config(config)?;
    cache.get_or_compute(key, || analyze(config))
}
