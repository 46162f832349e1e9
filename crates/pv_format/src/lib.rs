pub mod error;
pub mod material;
pub mod mesh;
pub mod texture;

pub use error::{FormatError, Result};
