use crate::sources::loader::{MonthlyFrame, MONTH, YEAR};
use polars::prelude::*;

/// Full outer join of the three monthly frames on `(year, month)`.
///
/// A month reported by only some of the sources is kept, with nulls in the
/// columns of the sources that lack it.
pub fn merge_monthly(
    temperature: MonthlyFrame,
    wind: MonthlyFrame,
    precipitation: MonthlyFrame,
) -> LazyFrame {
    let keys = [col(YEAR), col(MONTH)];
    let full = || JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns);

    temperature
        .frame
        .join(wind.frame, keys.clone(), keys.clone(), full())
        .join(precipitation.frame, keys.clone(), keys, full())
}
