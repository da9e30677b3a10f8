//! Entry point tying configuration, the cached pipeline and report assembly together.

use crate::analysis::cache::AnalysisCache;
use crate::analysis::{analyze_cached, TrendAnalysis};
use crate::config::ClimateConfig;
use crate::error::ClimateError;
use crate::report::bundle::ReportData;
use crate::report::chart::{enable_chart_text, ChartSeries};
use crate::report::fonts::FontAssets;
use crate::report::pdf::render_pdf;
use crate::types::horizon::HorizonOffsets;
use crate::types::variable::Variable;
use bon::bon;
use chrono::{Datelike, Local};
use std::sync::Arc;

/// Analysis client for one station.
///
/// Holds the station configuration and the cache of pipeline results. The
/// cache can be shared between clients with [`ClimateTrends::with_cache`].
///
/// # Examples
///
/// ```no_run
/// # use climtrend::{ClimateConfig, ClimateError, ClimateTrends, HorizonOffsets};
/// # fn main() -> Result<(), ClimateError> {
/// let client = ClimateTrends::new(ClimateConfig::default());
///
/// let report = client
///     .report()
///     .offsets(HorizonOffsets::new(10, 100, 1000)?)
///     .call()?;
///
/// for metric in report.trend_metrics() {
///     println!("{}: {} ({})", metric.variable, metric.slope_label(), metric.direction_label());
/// }
/// # Ok(())
/// # }
/// ```
pub struct ClimateTrends {
    config: ClimateConfig,
    cache: Arc<AnalysisCache<TrendAnalysis>>,
}

#[bon]
impl ClimateTrends {
    pub fn new(config: ClimateConfig) -> Self {
        Self::with_cache(config, Arc::new(AnalysisCache::new()))
    }

    pub fn with_cache(config: ClimateConfig, cache: Arc<AnalysisCache<TrendAnalysis>>) -> Self {
        Self { config, cache }
    }

    pub fn config(&self) -> &ClimateConfig {
        &self.config
    }

    /// Runs the pipeline, or returns the cached result if the sources are unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`ClimateError`] of kind `SourceUnavailable`, `SourceMalformed`,
    /// `NoCompleteYears` or `InsufficientData`; in each case nothing has been
    /// computed that could be shown.
    pub fn analyze(&self) -> Result<Arc<TrendAnalysis>, ClimateError> {
        analyze_cached(&self.config, &self.cache)
    }

    /// Builds the report bundle for the requested horizons.
    ///
    /// Explicit `years` take precedence over `offsets`; offsets default to
    /// 10, 100 and 1000 years and are added to `current_year`, which
    /// defaults to the current local year.
    #[builder]
    pub fn report(
        &self,
        offsets: Option<HorizonOffsets>,
        years: Option<Vec<i32>>,
        current_year: Option<i32>,
    ) -> Result<ReportData, ClimateError> {
        let current_year = current_year.unwrap_or_else(|| Local::now().year());
        let years =
            years.unwrap_or_else(|| offsets.unwrap_or_default().years(current_year));
        let analysis = self.analyze()?;
        Ok(ReportData::new(
            self.config.station.clone(),
            analysis,
            &years,
            current_year,
        ))
    }

    /// Loads the report fonts. Chart text is switched on as a side effect
    /// when they are found.
    pub fn fonts(&self) -> Result<FontAssets, ClimateError> {
        let fonts = FontAssets::load(&self.config.fonts)?;
        enable_chart_text(&fonts);
        Ok(fonts)
    }

    /// One SVG chart per variable.
    pub fn charts(&self, report: &ReportData) -> Vec<(Variable, Result<String, ClimateError>)> {
        Variable::ALL
            .iter()
            .map(|variable| {
                let svg = ChartSeries::for_variable(report, *variable)
                    .render_svg()
                    .map_err(ClimateError::from);
                (*variable, svg)
            })
            .collect()
    }

    /// Renders the PDF report.
    ///
    /// # Errors
    ///
    /// Fails with kind `ReportAssetMissing` if a font is absent. The report
    /// bundle itself stays valid and can still be displayed.
    pub fn pdf(&self, report: &ReportData) -> Result<Vec<u8>, ClimateError> {
        let fonts = self.fonts()?;
        Ok(render_pdf(report, &fonts)?)
    }

    /// File name under which the PDF is offered, e.g. `climate_report_11723_2026.pdf`.
    pub fn pdf_file_name(&self, report: &ReportData) -> String {
        self.config.report_file_name(report.current_year())
    }
}
