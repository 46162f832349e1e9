use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::{FormatError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    R8,
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::R8 => 1,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Decoded texture data, rows stored bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub pixels: Vec<u8>,
}

impl Texture {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| FormatError::Image {
            path: path.to_owned(),
            source,
        })?;
        Ok(Texture::from_image(path, image))
    }

    /// Flips the image vertically so the first row is the bottom one, which is
    /// what texture uploads expect.
    pub fn from_image(path: &Path, image: DynamicImage) -> Self {
        let image = image.flipv();
        let (format, width, height, pixels) = match image.color().channel_count() {
            1 => {
                let buffer = image.to_luma8();
                let (w, h) = buffer.dimensions();
                (PixelFormat::R8, w, h, buffer.into_raw())
            }
            3 => {
                let buffer = image.to_rgb8();
                let (w, h) = buffer.dimensions();
                (PixelFormat::Rgb8, w, h, buffer.into_raw())
            }
            _ => {
                let buffer = image.to_rgba8();
                let (w, h) = buffer.dimensions();
                (PixelFormat::Rgba8, w, h, buffer.into_raw())
            }
        };

        let texture = Texture {
            path: path.to_owned(),
            width,
            height,
            format,
            pixels,
        };
        debug_assert_eq!(texture.pixels.len(), texture.row_size() * height as usize);
        texture
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes per row of pixels
    pub fn row_size(&self) -> usize {
        self.width as usize * self.format.channels()
    }

    /// Pixel row `y`, counted from the bottom. Returns `None` if `y` is out of range.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let size = self.row_size();
        let start = y as usize * size;
        self.pixels.get(start..start + size)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use image::{ImageBuffer, Rgb};

    #[test]
    fn test_rows_are_flipped() {
        // top row red, bottom row blue
        let buffer = ImageBuffer::from_fn(1, 2, |_, y| {
            if y == 0 {
                Rgb([255u8, 0, 0])
            } else {
                Rgb([0u8, 0, 255])
            }
        });
        let texture = Texture::from_image(Path::new("t.png"), DynamicImage::ImageRgb8(buffer));

        assert_eq!(texture.format, PixelFormat::Rgb8);
        assert_eq!(texture.dimensions(), (1, 2));
        assert_eq!(texture.pixels, vec![0, 0, 255, 255, 0, 0]);
        assert_eq!(texture.row_size(), 3);
        assert_eq!(texture.row(0), Some(&[0, 0, 255][..]));
        assert_eq!(texture.row(1), Some(&[255, 0, 0][..]));
        assert_eq!(texture.row(2), None);
    }

    #[test]
    fn test_luma_alpha_becomes_rgba() {
        let buffer = ImageBuffer::from_pixel(2, 1, image::LumaA([10u8, 20]));
        let texture = Texture::from_image(Path::new("t.png"), DynamicImage::ImageLumaA8(buffer));

        assert_eq!(texture.format, PixelFormat::Rgba8);
        assert_eq!(texture.row_size(), 2 * 4);
        assert_eq!(texture.pixels.len(), texture.row_size());
        assert_eq!(&texture.pixels[..4], &[10, 10, 10, 20]);
    }

    #[test]
    fn test_grayscale_rows() {
        let buffer = ImageBuffer::from_fn(3, 2, |x, y| image::Luma([(x + 3 * y) as u8]));
        let texture = Texture::from_image(Path::new("t.png"), DynamicImage::ImageLuma8(buffer));

        assert_eq!(texture.format, PixelFormat::R8);
        assert_eq!(texture.format.channels(), 1);
        assert_eq!(texture.row(0), Some(&[3, 4, 5][..]));
        assert_eq!(texture.row(1), Some(&[0, 1, 2][..]));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Texture::from_file("does/not/exist.png"),
            Err(FormatError::Image { .. })
        ));
    }
}
