mod builder;
pub mod face;
mod meta;
mod parser;
pub mod welder;

use std::io::BufRead;
use std::path::Path;

use log::{debug, info};
use pv_format::mesh::MeshData;

use crate::texture::{ImageLoader, TextureLoader};
use crate::utils;

pub use self::meta::{MetaError, ObjMeta};
pub use self::parser::{LineError, ObjError};

/// Loads a Wavefront `.obj` file, decoding material textures from disk.
pub fn load(path: &Path, meta: &ObjMeta) -> Result<MeshData, ObjError> {
    load_with(path, meta, &ImageLoader)
}

pub fn load_with(
    path: &Path,
    meta: &ObjMeta,
    loader: &dyn TextureLoader,
) -> Result<MeshData, ObjError> {
    let mesh = parser::parse(path, *meta, loader)?.build_mesh()?;
    info!(
        "Loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.num_vertices(),
        mesh.num_triangles()
    );
    Ok(mesh)
}

/// Loads a model from memory. `directory` is where `mtllib` files are looked up.
pub fn load_from_reader<R: BufRead>(
    reader: R,
    directory: &Path,
    meta: &ObjMeta,
    loader: &dyn TextureLoader,
) -> Result<MeshData, ObjError> {
    parser::parse_reader(reader, directory, *meta, loader)?.build_mesh()
}

/// Reads the options from `<model>.toml`, else from the folder scoped `obj.toml`,
/// else uses the defaults.
pub fn parse_meta(path: &Path) -> Result<ObjMeta, MetaError> {
    let dir = utils::parent_dir(path);
    let candidates = utils::file_stem(path)
        .map(|stem| utils::combine_path(dir, stem, "toml"))
        .into_iter()
        .chain(std::iter::once(utils::combine_path(dir, "obj", "toml")));

    for candidate in candidates {
        if candidate.is_file() {
            debug!("Using meta file: {}", candidate.display());
            return ObjMeta::parse(&candidate);
        }
    }

    Ok(ObjMeta::default())
}
