//! Reads one monthly source file and normalises it to `(year, month, value)`.

use crate::config::SourceConfig;
use crate::sources::error::SourceError;
use crate::types::variable::Variable;
use log::{info, warn};
use polars::prelude::*;
use std::fs;

pub(crate) const YEAR: &str = "year";
pub(crate) const MONTH: &str = "month";

/// Monthly records of a single variable, as a lazy `(year, month, <value>)` frame.
///
/// The value column is named after [`Variable::monthly_column`], so three of
/// these frames can be joined without renaming. Year and month are `Int32`, the
/// value is `Float64` with nulls where the source held no parsable number.
#[derive(Clone)]
pub struct MonthlyFrame {
    pub variable: Variable,
    pub frame: LazyFrame,
}

impl MonthlyFrame {
    pub fn new(variable: Variable, frame: LazyFrame) -> Self {
        Self { variable, frame }
    }
}

/// Loads the rows of `source` matching its selector.
///
/// Fields are trimmed before they are compared or parsed. Non-numeric values
/// become nulls instead of failing the load. Rows whose
/// year or month cannot be parsed, or whose month lies outside 1-12, are
/// discarded. Should a selector match several rows for the same month, the
/// first one in file order is kept.
///
/// # Errors
///
/// Returns [`SourceError::Unavailable`] if the file cannot be accessed,
/// [`SourceError::CsvRead`] if it is not readable as CSV, and
/// [`SourceError::MissingColumn`] if one of the configured columns is absent.
pub fn load_monthly(variable: Variable, source: &SourceConfig) -> Result<MonthlyFrame, SourceError> {
    let path = &source.path;
    fs::metadata(path).map_err(|e| SourceError::Unavailable {
        variable,
        path: path.clone(),
        source: e,
    })?;

    // Every column is read as a string; casting happens below so that a stray
    // placeholder in the value column only nulls that one cell.
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.clone()))
        .map_err(|e| SourceError::CsvRead {
            variable,
            path: path.clone(),
            source: e,
        })?
        .finish()
        .map_err(|e| SourceError::CsvRead {
            variable,
            path: path.clone(),
            source: e,
        })?;

    let columns = &source.columns;
    for column in columns.required() {
        if df.get_column_index(column).is_none() {
            warn!(
                "Column '{}' not found in {} input {:?}",
                column, variable, path
            );
            return Err(SourceError::MissingColumn {
                variable,
                path: path.clone(),
                column: column.to_string(),
            });
        }
    }
    info!(
        "Read {} rows of {} data from {:?}",
        df.height(),
        variable,
        path
    );

    let value = variable.monthly_column();
    let selector = &source.selector;
    let frame = df
        .lazy()
        .filter(
            trimmed(&columns.time_function)
                .eq(lit(selector.time_function.clone()))
                .and(
                    trimmed(&columns.aggregation_function)
                        .eq(lit(selector.aggregation_function.clone())),
                ),
        )
        .select([
            trimmed(&columns.year).cast(DataType::Int32).alias(YEAR),
            trimmed(&columns.month).cast(DataType::Int32).alias(MONTH),
            trimmed(&columns.value).cast(DataType::Float64).alias(value),
        ])
        .filter(
            col(YEAR)
                .is_not_null()
                .and(col(MONTH).gt_eq(lit(1)))
                .and(col(MONTH).lt_eq(lit(12))),
        )
        .group_by_stable([col(YEAR), col(MONTH)])
        .agg([col(value).first()]);

    Ok(MonthlyFrame::new(variable, frame))
}

/// A string column with surrounding whitespace removed.
fn trimmed(column: &str) -> Expr {
    col(column).str().strip_chars(lit(NULL))
}
