use std::path::Path;

use pv_format::texture::Texture;

/// Decodes the image files referenced by material libraries.
pub trait TextureLoader {
    fn load(&self, path: &Path) -> pv_format::Result<Texture>;
}

/// Decodes textures from disk with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageLoader;

impl TextureLoader for ImageLoader {
    fn load(&self, path: &Path) -> pv_format::Result<Texture> {
        Texture::from_file(path)
    }
}

/// Hands out 1x1 textures without touching the disk. Paths containing
/// `missing` fail to load.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct StubLoader {
    pub(crate) requested: std::cell::RefCell<Vec<std::path::PathBuf>>,
}

#[cfg(test)]
impl TextureLoader for StubLoader {
    fn load(&self, path: &Path) -> pv_format::Result<Texture> {
        self.requested.borrow_mut().push(path.to_owned());
        if path.to_string_lossy().contains("missing") {
            let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing texture");
            return Err(pv_format::FormatError::Image {
                path: path.to_owned(),
                source: image::ImageError::IoError(source),
            });
        }
        Ok(Texture {
            path: path.to_owned(),
            width: 1,
            height: 1,
            format: pv_format::texture::PixelFormat::Rgba8,
            pixels: vec![255; 4],
        })
    }
}
