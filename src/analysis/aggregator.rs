use crate::analysis::error::AnalysisError;
use crate::sources::loader::YEAR;
use crate::types::variable::{Variable, VariableValues, YearlyReducer};
use crate::types::yearly::YearlyObservation;
use log::{debug, warn};
use polars::prelude::*;

/// Reduces the monthly rows of each complete year to one observation: mean
/// temperature, mean wind speed and total precipitation.
///
/// `complete` is expected to come from
/// [`filter_complete_years`](crate::analysis::completeness::filter_complete_years),
/// sorted by year and month; that ordering keeps the reduction bit-for-bit
/// reproducible. A year whose reduced value is still missing or not finite is
/// dropped rather than emitted partially.
pub fn aggregate_yearly(complete: DataFrame) -> Result<Vec<YearlyObservation>, AnalysisError> {
    let years_in = complete.height() / 12;
    let reducers: Vec<Expr> = Variable::ALL
        .iter()
        .map(|variable| {
            let monthly = col(variable.monthly_column());
            let reduced = match variable.reducer() {
                YearlyReducer::Mean => monthly.mean(),
                YearlyReducer::Sum => monthly.sum(),
            };
            reduced.alias(variable.key())
        })
        .collect();

    let yearly = complete
        .lazy()
        .group_by_stable([col(YEAR)])
        .agg(reducers)
        .collect()?;

    let years = yearly.column(YEAR)?.i32()?;
    let tavg = yearly.column(Variable::Temperature.key())?.f64()?;
    let wspd = yearly.column(Variable::Wind.key())?.f64()?;
    let prcp = yearly.column(Variable::Precipitation.key())?.f64()?;

    let mut observations = Vec::with_capacity(yearly.height());
    for i in 0..yearly.height() {
        match (years.get(i), tavg.get(i), wspd.get(i), prcp.get(i)) {
            (Some(year), Some(t), Some(w), Some(p)) => {
                let observed = VariableValues::new(t, w, p);
                if observed.is_finite() {
                    observations.push(YearlyObservation { year, observed });
                } else {
                    warn!("Dropping year {}: non-finite yearly value {:?}", year, observed);
                }
            }
            (year, ..) => warn!("Dropping year {:?}: missing value after yearly reduction", year),
        }
    }
    observations.sort_by_key(|o| o.year);
    debug!("Aggregated {} of {} complete years", observations.len(), years_in);

    if observations.is_empty() {
        return Err(AnalysisError::NoCompleteYears {
            years_seen: years_in,
        });
    }
    Ok(observations)
}
