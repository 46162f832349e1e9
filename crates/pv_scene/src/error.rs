use std::io;
use std::path::PathBuf;

use pv_asset::{MetaError, ObjError};
use pv_format::FormatError;

#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("Failed to load the panorama `{path}`: {source}")]
    Panorama {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
    #[error("Failed to load the model: {0}")]
    Mesh(#[from] ObjError),
    #[error("Invalid model options: {0}")]
    Meta(#[from] MetaError),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read the viewer config: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse the viewer config: {0}")]
    Toml(#[from] toml::de::Error),
}
