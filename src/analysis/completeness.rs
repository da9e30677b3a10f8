use crate::analysis::error::AnalysisError;
use crate::sources::loader::{MONTH, YEAR};
use crate::types::variable::Variable;
use log::{info, warn};
use polars::prelude::*;

const COMPLETE_MONTHS: &str = "complete_months";

/// Keeps only the years in which all 12 months carry a value for every variable.
///
/// The result holds the merged monthly rows of the retained years, sorted by
/// year and month. Partial years are dropped whole; nothing is imputed.
///
/// # Errors
///
/// Returns [`AnalysisError::NoCompleteYears`] when no year qualifies, so that
/// callers never aggregate or fit on an empty table.
pub fn filter_complete_years(merged: LazyFrame) -> Result<DataFrame, AnalysisError> {
    let all_present = Variable::ALL
        .iter()
        .map(|variable| col(variable.monthly_column()).is_not_null())
        .reduce(|acc, present| acc.and(present))
        .unwrap_or_else(|| lit(true));

    let complete_years = merged
        .clone()
        .filter(all_present.clone())
        .group_by([col(YEAR)])
        .agg([col(MONTH)
            .n_unique()
            .cast(DataType::UInt32)
            .alias(COMPLETE_MONTHS)])
        .filter(col(COMPLETE_MONTHS).eq(lit(12u32)))
        .select([col(YEAR)]);

    let complete = merged
        .clone()
        .filter(all_present)
        .join(
            complete_years,
            [col(YEAR)],
            [col(YEAR)],
            JoinArgs::new(JoinType::Inner),
        )
        .sort([YEAR, MONTH], SortMultipleOptions::default())
        .collect()?;

    if complete.height() == 0 {
        let years_seen = merged
            .group_by([col(YEAR)])
            .agg([col(MONTH).count()])
            .collect()?
            .height();
        warn!("None of the {} years in the merged table is complete", years_seen);
        return Err(AnalysisError::NoCompleteYears { years_seen });
    }

    info!(
        "Kept {} complete years ({} monthly rows)",
        complete.height() / 12,
        complete.height()
    );
    Ok(complete)
}
