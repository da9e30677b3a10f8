use crate::config::{ClimateConfig, Selector, SourceColumns, SourceConfig};
use crate::sources::error::SourceError;
use crate::types::variable::Variable;
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// Which file a source reads and how its rows are selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceIdentity {
    path: PathBuf,
    selector: Selector,
    columns: SourceColumns,
}

/// A source's identity together with a digest of the file contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFingerprint {
    identity: SourceIdentity,
    len: u64,
    digest: u64,
}

impl SourceFingerprint {
    pub fn of(variable: Variable, source: &SourceConfig) -> Result<Self, SourceError> {
        let unavailable = |e| SourceError::Unavailable {
            variable,
            path: source.path.clone(),
            source: e,
        };
        let contents = fs::read(&source.path).map_err(unavailable)?;
        let path = fs::canonicalize(&source.path).map_err(unavailable)?;

        let mut hasher = DefaultHasher::new();
        contents.hash(&mut hasher);
        Ok(Self {
            identity: SourceIdentity {
                path,
                selector: source.selector.clone(),
                columns: source.columns.clone(),
            },
            len: contents.len() as u64,
            digest: hasher.finish(),
        })
    }
}

/// Cache key covering all three sources of a configuration. Any change to a
/// file's contents, or to how it is selected, yields a different key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey([SourceFingerprint; 3]);

impl SourceKey {
    pub fn for_config(config: &ClimateConfig) -> Result<Self, SourceError> {
        Ok(Self([
            SourceFingerprint::of(Variable::Temperature, &config.temperature)?,
            SourceFingerprint::of(Variable::Wind, &config.wind)?,
            SourceFingerprint::of(Variable::Precipitation, &config.precipitation)?,
        ]))
    }

    /// The configured sources without their contents. Keys of the same
    /// configuration before and after a file edit share one identity.
    pub fn identity(&self) -> [SourceIdentity; 3] {
        self.0.clone().map(|fingerprint| fingerprint.identity)
    }
}
