use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use log::{debug, info, trace, warn};

use super::builder::ObjMeshBuilder;
use super::face::FaceError;
use super::meta::ObjMeta;
use super::welder::WeldError;
use crate::mesh::mtl::{MaterialLibrary, MtlError};
use crate::mesh::tokens::{first_token, parse_numbers, split_directive, NumberError};
use crate::texture::TextureLoader;

#[derive(thiserror::Error, Debug)]
pub enum ObjError {
    #[error("Couldn't open the model `{path}`: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read model: {0}")]
    Io(#[from] io::Error),
    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: LineError,
    },
    #[error("Failed to weld vertices: {0}")]
    Weld(#[from] WeldError),
    #[error("The model does not contain any faces")]
    EmptyMesh,
}

/// Errors tied to a single line of an obj file.
#[derive(thiserror::Error, Debug)]
pub enum LineError {
    #[error(transparent)]
    Number(#[from] NumberError),
    #[error(transparent)]
    Face(#[from] FaceError),
    #[error(transparent)]
    Material(MtlError),
}

// parses wavefront obj (https://en.wikipedia.org/wiki/Wavefront_.obj_file)
pub(crate) fn parse(
    path: &Path,
    meta: ObjMeta,
    loader: &dyn TextureLoader,
) -> Result<ObjMeshBuilder, ObjError> {
    let file = fs::File::open(path).map_err(|source| ObjError::Open {
        path: path.to_owned(),
        source,
    })?;
    info!("Loading mesh: {}", path.display());

    parse_reader(
        io::BufReader::new(file),
        crate::utils::parent_dir(path),
        meta,
        loader,
    )
}

/// Runs the line scan over `reader`; material libraries resolve against `directory`.
pub(crate) fn parse_reader<R: BufRead>(
    reader: R,
    directory: &Path,
    meta: ObjMeta,
    loader: &dyn TextureLoader,
) -> Result<ObjMeshBuilder, ObjError> {
    let mut builder = ObjMeshBuilder::new(meta);

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let (token, value) = match split_directive(&line) {
            Some(directive) => directive,
            None => continue,
        };

        trace!("Parsing: \"{}\"", line);
        parse_token(token, value, directory, loader, &mut builder)
            .map_err(|source| ObjError::Line { line: i + 1, source })?;
    }

    Ok(builder)
}

fn parse_token(
    token: &str,
    value: &str,
    directory: &Path,
    loader: &dyn TextureLoader,
    builder: &mut ObjMeshBuilder,
) -> Result<(), LineError> {
    match token {
        // one or more library files
        "mtllib" => {
            for file_name in value.split_whitespace() {
                match MaterialLibrary::load(directory, file_name, loader) {
                    Ok(library) => {
                        debug!("Loaded {} materials from {}", library.len(), file_name);
                        builder.add_materials(library);
                    }
                    Err(err) if err.is_recoverable() => {
                        warn!("{}. Continuing without these materials", err)
                    }
                    Err(err) => return Err(LineError::Material(err)),
                }
            }
        }
        "usemtl" => builder.use_material(first_token(value)),
        // group (submesh)
        "g" => builder.set_group(value),
        // vertex, extra components like colors are ignored
        "v" => builder.push_position(parse_numbers::<3>(value)?),
        // texture coordinates
        "vt" => builder.push_uv(parse_numbers::<2>(value)?),
        // vertex normals
        "vn" => builder.push_normal(parse_numbers::<3>(value)?),
        "f" => {
            let tokens: Vec<&str> = value.split_whitespace().collect();
            builder.push_face(&tokens)?;
        }
        "o" => debug!("Object: \"{}\"", value),
        "s" => debug!("Smoothing groups not supported. Ignoring."),
        "vp" => debug!("Parameter space vertices not supported. Ignoring."),
        _ if token.starts_with('#') => trace!("Comment: {:?}", value),
        _ => debug!("Ignoring unknown token: \"{}\"", token),
    };

    Ok(())
}
