use std::io;
use std::path::Path;

use serde::Deserialize;

#[derive(thiserror::Error, Debug)]
pub enum MetaError {
    #[error("Failed to read meta file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse meta file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Per-file load options, read from a toml file next to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ObjMeta {
    /// Center the model at the origin and scale its longest axis to 1.0
    pub normalize: bool,
}

impl Default for ObjMeta {
    fn default() -> Self {
        ObjMeta { normalize: true }
    }
}

impl ObjMeta {
    pub fn parse(path: &Path) -> Result<Self, MetaError> {
        let data = std::fs::read(path)?;
        let meta: Self = toml::from_slice(&data)?;
        Ok(meta)
    }
}
