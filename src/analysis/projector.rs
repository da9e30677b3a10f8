use crate::analysis::trend::TrendModels;
use crate::types::yearly::Prediction;
use serde::Serialize;

/// Predictions keyed by horizon year, in the order the years were requested.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PredictionTable {
    rows: Vec<Prediction>,
}

impl PredictionTable {
    pub fn rows(&self) -> &[Prediction] {
        &self.rows
    }

    pub fn get(&self, year: i32) -> Option<&Prediction> {
        self.rows.iter().find(|p| p.year == year)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.rows.iter().map(|p| p.year)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Inserts or overwrites the prediction for `prediction.year`. An
    /// overwritten year keeps its original position.
    fn upsert(&mut self, prediction: Prediction) {
        match self.rows.iter_mut().find(|p| p.year == prediction.year) {
            Some(existing) => *existing = prediction,
            None => self.rows.push(prediction),
        }
    }
}

/// Evaluates all fitted models at each target year.
///
/// Years may be historical or arbitrarily far in the future. A year requested
/// more than once yields a single row: it stays where it first appeared and
/// holds the value written last.
pub fn project(models: &TrendModels, years: &[i32]) -> PredictionTable {
    let mut table = PredictionTable::default();
    for &year in years {
        table.upsert(Prediction {
            year,
            predicted: models.predict(year),
        });
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::trend::TrendModel;
    use crate::types::variable::Variable;

    fn models() -> TrendModels {
        TrendModels {
            tavg: TrendModel { slope: 0.035, intercept: -61.2 },
            wspd: TrendModel { slope: -0.012, intercept: 27.4 },
            prcp: TrendModel { slope: 1.7, intercept: -2850.0 },
        }
    }

    #[test]
    fn test_far_horizon_is_plain_linear_evaluation() {
        let models = models();
        let year = 2026 + 1000;

        let table = project(&models, &[year]);

        let prediction = table.get(year).unwrap();
        for variable in Variable::ALL {
            let model = models.get(variable);
            assert_eq!(prediction.predicted(variable), model.slope * year as f64 + model.intercept);
        }
    }

    #[test]
    fn test_output_keeps_caller_order() {
        let table = project(&models(), &[2126, 2036, 3026]);
        assert_eq!(table.years().collect::<Vec<_>>(), vec![2126, 2036, 3026]);
    }

    #[test]
    fn test_duplicate_years_collapse_to_one_row() {
        let table = project(&models(), &[2036, 2126, 2036]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.years().collect::<Vec<_>>(), vec![2036, 2126]);
        assert_eq!(table.get(2036).unwrap().predicted, models().predict(2036));
    }

    #[test]
    fn test_empty_request_gives_empty_table() {
        assert!(project(&models(), &[]).is_empty());
    }
}
