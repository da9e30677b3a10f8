use crate::config::FontConfig;
use crate::report::error::ReportError;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// The regular and bold font files, read into memory.
#[derive(Clone)]
pub struct FontAssets {
    regular_path: PathBuf,
    regular: Vec<u8>,
    bold_path: PathBuf,
    bold: Vec<u8>,
}

impl FontAssets {
    /// Reads both fonts named by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::AssetMissing`] naming the first font that cannot be read.
    pub fn load(config: &FontConfig) -> Result<Self, ReportError> {
        let regular_path = config.regular_path();
        let bold_path = config.bold_path();
        let assets = Self {
            regular: read_font(&regular_path)?,
            bold: read_font(&bold_path)?,
            regular_path,
            bold_path,
        };
        info!(
            "Loaded report fonts {:?} and {:?}",
            assets.regular_path, assets.bold_path
        );
        Ok(assets)
    }

    pub fn regular(&self) -> (&Path, &[u8]) {
        (&self.regular_path, &self.regular)
    }

    pub fn bold(&self) -> (&Path, &[u8]) {
        (&self.bold_path, &self.bold)
    }
}

fn read_font(path: &Path) -> Result<Vec<u8>, ReportError> {
    fs::read(path).map_err(|e| {
        warn!("Report font {:?} could not be read: {}", path, e);
        ReportError::AssetMissing {
            path: path.to_path_buf(),
            source: e,
        }
    })
}
