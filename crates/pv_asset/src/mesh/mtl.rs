use std::collections::HashMap;
use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, error, info, warn};
use pv_format::material::{MapKind, MaterialMap, PhongMaterial};

use super::tokens::{first_token, parse_numbers, split_directive, NumberError};
use crate::texture::TextureLoader;

#[derive(thiserror::Error, Debug)]
pub enum MtlError {
    #[error("Material file `{0}` does not have the `.mtl` extension")]
    WrongExtension(PathBuf),
    #[error("Couldn't find or open the material file `{path}`: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read material file: {0}")]
    Io(#[from] io::Error),
    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: NumberError,
    },
}

impl MtlError {
    /// Recoverable errors leave the mesh without materials; all others abort the load.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MtlError::WrongExtension(_) | MtlError::NotFound { .. })
    }
}

/// Materials of one `.mtl` file, keyed by name.
#[derive(Debug, Default)]
pub struct MaterialLibrary {
    materials: HashMap<String, PhongMaterial>,
}

impl MaterialLibrary {
    /// Loads `file_name` relative to `directory`. Texture maps are resolved
    /// relative to the same directory.
    pub fn load(
        directory: &Path,
        file_name: &str,
        loader: &dyn TextureLoader,
    ) -> Result<Self, MtlError> {
        let path = directory.join(file_name);
        if !file_name.ends_with(".mtl") {
            return Err(MtlError::WrongExtension(path));
        }

        let file = fs::File::open(&path).map_err(|source| MtlError::NotFound {
            path: path.clone(),
            source,
        })?;
        info!("Loading material library: {}", path.display());

        Self::parse(io::BufReader::new(file), directory, loader)
    }

    pub fn parse<R: BufRead>(
        reader: R,
        directory: &Path,
        loader: &dyn TextureLoader,
    ) -> Result<Self, MtlError> {
        let mut library = MaterialLibrary::default();
        let mut current = String::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let (token, value) = match split_directive(&line) {
                Some(directive) => directive,
                None => continue,
            };

            library
                .parse_token(token, value, &mut current, directory, loader)
                .map_err(|source| MtlError::Line { line: i + 1, source })?;
        }

        Ok(library)
    }

    fn parse_token(
        &mut self,
        token: &str,
        value: &str,
        current: &mut String,
        directory: &Path,
        loader: &dyn TextureLoader,
    ) -> Result<(), NumberError> {
        match token {
            "newmtl" => {
                *current = first_token(value).to_owned();
                // redefinitions silently replace the previous record
                self.insert(PhongMaterial::new(current));
            }
            "Ka" => self.current(current).ka = parse_numbers::<3>(value)?.into(),
            "Kd" => self.current(current).kd = parse_numbers::<3>(value)?.into(),
            "Ks" => self.current(current).ks = parse_numbers::<3>(value)?.into(),
            "Ns" => self.current(current).ns = parse_numbers::<1>(value)?[0],
            _ => match MapKind::from_directive(token) {
                Some(kind) => {
                    if let Some(map) = load_map(token, first_token(value), directory, loader) {
                        self.current(current).set_map(kind, map);
                    }
                }
                None => debug!("Ignoring material directive: \"{}\"", token),
            },
        }

        Ok(())
    }

    fn current(&mut self, name: &str) -> &mut PhongMaterial {
        self.materials
            .entry(name.to_owned())
            .or_insert_with(|| PhongMaterial::new(name))
    }

    /// Adds `material` under its name, replacing any previous record.
    pub fn insert(&mut self, material: PhongMaterial) {
        self.materials.insert(material.name.clone(), material);
    }

    /// Moves all materials of `other` into this library. Names defined in
    /// both end up with the record from `other`.
    pub fn merge(&mut self, other: MaterialLibrary) {
        self.materials.extend(other.materials);
    }

    pub fn get(&self, name: &str) -> Option<&PhongMaterial> {
        self.materials.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

fn load_map(
    directive: &str,
    relative_path: &str,
    directory: &Path,
    loader: &dyn TextureLoader,
) -> Option<MaterialMap> {
    if relative_path.is_empty() {
        error!("Couldn't find the {} file path", directive);
        return None;
    }

    let texture = match loader.load(&directory.join(relative_path)) {
        Ok(texture) => Some(Arc::new(texture)),
        Err(err) => {
            warn!("Failed to load image texture for {}: {}", directive, err);
            None
        }
    };

    Some(MaterialMap {
        path: relative_path.to_owned(),
        texture,
    })
}
