mod analysis;
mod climate;
mod config;
mod error;
mod report;
mod sources;
mod types;

pub use climate::ClimateTrends;
pub use config::*;
pub use error::{ClimateError, ErrorKind};

pub use analysis::cache::AnalysisCache;
pub use analysis::projector::{project, PredictionTable};
pub use analysis::trend::{fit_line, predict, TrendModel, TrendModels};
pub use analysis::{analyze, analyze_cached, TrendAnalysis};

pub use analysis::aggregator::aggregate_yearly;
pub use analysis::completeness::filter_complete_years;
pub use analysis::merger::merge_monthly;
pub use sources::fingerprint::{SourceFingerprint, SourceIdentity, SourceKey};
pub use sources::loader::{load_monthly, MonthlyFrame};

pub use report::bundle::*;
pub use report::chart::{enable_chart_text, ChartSeries};
pub use report::fonts::FontAssets;
pub use report::pdf::render_pdf;

pub use types::horizon::{HorizonError, HorizonOffsets, HorizonSlot};
pub use types::variable::{Variable, VariableValues, YearlyReducer};
pub use types::yearly::{Prediction, YearlyObservation, YearlyRow};

pub use analysis::error::AnalysisError;
pub use report::error::ReportError;
pub use sources::error::SourceError;
