use crate::types::variable::Variable;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No year has all 12 months of temperature, wind and precipitation data ({years_seen} years inspected)")]
    NoCompleteYears { years_seen: usize },

    #[error("Cannot fit a {variable} trend on {years} year(s); at least 2 distinct years are required")]
    InsufficientData { variable: Variable, years: usize },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
