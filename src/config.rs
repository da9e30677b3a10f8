//! Station configuration: where the three monthly sources live, which rows of
//! each source are the canonical aggregation, and where the report fonts are.

use crate::error::ClimateError;
use crate::types::variable::Variable;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The `(time function, aggregation function)` pair identifying the rows of a
/// source that hold the wanted monthly value.
///
/// A single source file usually carries several aggregations of the same
/// quantity (e.g. monthly average of daily averages next to monthly maximum).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selector {
    pub time_function: String,
    pub aggregation_function: String,
}

impl Selector {
    pub fn new(time_function: impl Into<String>, aggregation_function: impl Into<String>) -> Self {
        Self {
            time_function: time_function.into(),
            aggregation_function: aggregation_function.into(),
        }
    }
}

/// Names of the columns a source file must contain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceColumns {
    pub year: String,
    pub month: String,
    pub time_function: String,
    pub aggregation_function: String,
    pub value: String,
}

impl SourceColumns {
    pub(crate) fn required(&self) -> [&str; 5] {
        [
            &self.year,
            &self.month,
            &self.time_function,
            &self.aggregation_function,
            &self.value,
        ]
    }
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            year: "YEAR".to_string(),
            month: "MONTH".to_string(),
            time_function: "TIMEFUNCTION".to_string(),
            aggregation_function: "MDFUNCTION".to_string(),
            value: "VALUE".to_string(),
        }
    }
}

/// One monthly input file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Builder)]
pub struct SourceConfig {
    #[builder(into)]
    pub path: PathBuf,
    pub selector: Selector,
    #[serde(default)]
    #[builder(default)]
    pub columns: SourceColumns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct StationInfo {
    #[builder(into)]
    pub id: String,
    #[builder(into)]
    pub name: String,
}

/// Font files the PDF report is typeset with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub directory: PathBuf,
    pub regular: String,
    pub bold: String,
}

impl FontConfig {
    pub fn regular_path(&self) -> PathBuf {
        self.directory.join(&self.regular)
    }

    pub fn bold_path(&self) -> PathBuf {
        self.directory.join(&self.bold)
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("fonts"),
            regular: "DejaVuSans.ttf".to_string(),
            bold: "DejaVuSans-Bold.ttf".to_string(),
        }
    }
}

/// Full configuration of one station deployment.
///
/// Every field falls back to its default when absent from the JSON file, so a
/// deployment only has to override what differs (typically the source paths).
///
/// # Examples
///
/// ```
/// use climtrend::{ClimateConfig, Selector, SourceConfig, StationInfo};
///
/// let config = ClimateConfig::builder()
///     .station(StationInfo::builder().id("11723").name("Brno").build())
///     .temperature(
///         SourceConfig::builder()
///             .path("data/temperature.csv")
///             .selector(Selector::new("AVG", "AVG"))
///             .build(),
///     )
///     .build();
/// assert_eq!(config.temperature.columns.value, "VALUE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct ClimateConfig {
    #[builder(default = ClimateConfig::default().station)]
    pub station: StationInfo,
    #[builder(default = ClimateConfig::default_source(Variable::Temperature))]
    pub temperature: SourceConfig,
    #[builder(default = ClimateConfig::default_source(Variable::Wind))]
    pub wind: SourceConfig,
    #[builder(default = ClimateConfig::default_source(Variable::Precipitation))]
    pub precipitation: SourceConfig,
    #[builder(default)]
    pub fonts: FontConfig,
    #[builder(into, default = "climate_report".to_string())]
    pub report_file_prefix: String,
}

impl ClimateConfig {
    /// Reads a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ClimateError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ClimateError::ConfigRead(path.to_path_buf(), e))?;
        serde_json::from_str(&raw).map_err(|e| ClimateError::ConfigParse(path.to_path_buf(), e))
    }

    pub fn source(&self, variable: Variable) -> &SourceConfig {
        match variable {
            Variable::Temperature => &self.temperature,
            Variable::Wind => &self.wind,
            Variable::Precipitation => &self.precipitation,
        }
    }

    /// File name of the PDF report generated in `year`.
    pub fn report_file_name(&self, year: i32) -> String {
        format!("{}_{}_{}.pdf", self.report_file_prefix, self.station.id, year)
    }

    fn default_source(variable: Variable) -> SourceConfig {
        let selector = match variable {
            Variable::Temperature | Variable::Wind => Selector::new("AVG", "AVG"),
            Variable::Precipitation => Selector::new("07:00", "SUM"),
        };
        SourceConfig {
            path: PathBuf::from(format!("data/{}.csv", variable)),
            selector,
            columns: SourceColumns::default(),
        }
    }
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            station: StationInfo {
                id: "11723".to_string(),
                name: "Brno".to_string(),
            },
            temperature: Self::default_source(Variable::Temperature),
            wind: Self::default_source(Variable::Wind),
            precipitation: Self::default_source(Variable::Precipitation),
            fonts: FontConfig::default(),
            report_file_prefix: "climate_report".to_string(),
        }
    }
}
