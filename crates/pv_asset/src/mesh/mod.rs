pub mod mtl;
pub mod obj;
pub(crate) mod tokens;

pub use tokens::NumberError;
