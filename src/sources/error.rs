use crate::types::variable::Variable;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Input file for {variable} is not available at '{path}'")]
    Unavailable {
        variable: Variable,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing required column '{column}' in {variable} input '{path}'")]
    MissingColumn {
        variable: Variable,
        path: PathBuf,
        column: String,
    },

    #[error("Failed to parse {variable} input '{path}' as CSV")]
    CsvRead {
        variable: Variable,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}
