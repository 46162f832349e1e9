pub mod mesh;
pub mod texture;
pub(crate) mod utils;

pub use mesh::mtl::{MaterialLibrary, MtlError};
pub use mesh::obj::{
    load, load_from_reader, load_with, parse_meta, LineError, MetaError, ObjError, ObjMeta,
};
pub use texture::{ImageLoader, TextureLoader};
