use crate::types::variable::Variable;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report font '{path}' is missing; PDF export is unavailable")]
    AssetMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load font '{path}' into the PDF")]
    FontEmbed {
        path: PathBuf,
        #[source]
        source: printpdf::Error,
    },

    #[error("Failed to assemble the PDF document")]
    PdfRender(#[source] printpdf::Error),

    #[error("Failed to draw the {variable} chart: {message}")]
    Chart { variable: Variable, message: String },
}
