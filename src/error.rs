use crate::analysis::error::AnalysisError;
use crate::report::error::ReportError;
use crate::sources::error::SourceError;
use crate::types::horizon::HorizonError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Horizon(#[from] HorizonError),

    #[error("Failed to read configuration file '{0}'")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse configuration file '{0}'")]
    ConfigParse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to write output file '{0}'")]
    OutputWrite(PathBuf, #[source] std::io::Error),
}

/// Coarse classification of a [`ClimateError`], for callers that render each
/// kind of failure differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SourceUnavailable,
    SourceMalformed,
    NoCompleteYears,
    InsufficientData,
    ReportAssetMissing,
    InvalidConfig,
    Processing,
}

impl ClimateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClimateError::Source(SourceError::Unavailable { .. }) => ErrorKind::SourceUnavailable,
            ClimateError::Source(_) => ErrorKind::SourceMalformed,
            ClimateError::Analysis(AnalysisError::NoCompleteYears { .. }) => {
                ErrorKind::NoCompleteYears
            }
            ClimateError::Analysis(AnalysisError::InsufficientData { .. }) => {
                ErrorKind::InsufficientData
            }
            ClimateError::Analysis(AnalysisError::DataFrameProcessing(_)) => ErrorKind::Processing,
            ClimateError::Report(ReportError::AssetMissing { .. }) => ErrorKind::ReportAssetMissing,
            ClimateError::Report(_) | ClimateError::OutputWrite(..) => ErrorKind::Processing,
            ClimateError::Horizon(_) | ClimateError::ConfigRead(..) | ClimateError::ConfigParse(..) => {
                ErrorKind::InvalidConfig
            }
        }
    }

    /// Whether the failure leaves no dataset to show. Only report asset and
    /// rendering problems keep the yearly table and charts usable.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ClimateError::Report(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::variable::Variable;

    #[test]
    fn test_kinds_follow_taxonomy() {
        let unavailable: ClimateError = SourceError::Unavailable {
            variable: Variable::Wind,
            path: PathBuf::from("wind.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();
        let malformed: ClimateError = SourceError::MissingColumn {
            variable: Variable::Wind,
            path: PathBuf::from("wind.csv"),
            column: "VALUE".to_string(),
        }
        .into();
        let empty: ClimateError = AnalysisError::NoCompleteYears { years_seen: 3 }.into();
        let short: ClimateError = AnalysisError::InsufficientData {
            variable: Variable::Temperature,
            years: 1,
        }
        .into();
        let fonts: ClimateError = ReportError::AssetMissing {
            path: PathBuf::from("fonts/DejaVuSans.ttf"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();

        assert_eq!(unavailable.kind(), ErrorKind::SourceUnavailable);
        assert_eq!(malformed.kind(), ErrorKind::SourceMalformed);
        assert_eq!(empty.kind(), ErrorKind::NoCompleteYears);
        assert_eq!(short.kind(), ErrorKind::InsufficientData);
        assert_eq!(fonts.kind(), ErrorKind::ReportAssetMissing);

        assert!(unavailable.is_terminal());
        assert!(short.is_terminal());
        assert!(!fonts.is_terminal());
    }

    #[test]
    fn test_messages_are_human_readable() {
        let fonts: ClimateError = ReportError::AssetMissing {
            path: PathBuf::from("fonts/DejaVuSans-Bold.ttf"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();
        assert!(fonts.to_string().contains("fonts/DejaVuSans-Bold.ttf"));
    }
}
