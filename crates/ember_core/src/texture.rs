//! Texture pixel loading for materials.
//!
//! Decodes image files into raw 8-bit RGB rows for nearest-pixel sampling.
//! Lookup failures never abort a render: a failed load yields an `Image`
//! whose every pixel reads as magenta.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while decoding a texture file.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Decode(#[from] image::ImageError),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Sentinel color returned for pixels of an image that failed to load.
const MAGENTA: [u8; 3] = [255, 0, 255];

/// Raw RGB pixel data for a texture.
///
/// Pixels are stored row-major, top row first, three bytes per pixel.
/// An `Image` with no data (failed load) reports zero dimensions and
/// answers every pixel query with magenta.
#[derive(Clone, Debug, Default)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Load an image, searching a set of likely locations for the file.
    ///
    /// The search order is: the directory named by the `EMBER_IMAGES`
    /// environment variable, then the filename as given, then `images/`
    /// under the current directory and up to six parent directories.
    /// If every candidate fails the error is logged and the returned image
    /// is in the magenta-fallback state.
    pub fn load(filename: &str) -> Self {
        for candidate in Self::candidates(filename) {
            match Self::open(&candidate) {
                Ok(img) => {
                    log::debug!(
                        "Loaded texture {} ({}x{})",
                        candidate.display(),
                        img.width,
                        img.height
                    );
                    return img;
                }
                Err(err) => {
                    log::trace!("Texture candidate {} rejected: {err}", candidate.display());
                }
            }
        }

        log::error!("Could not load texture file '{filename}', using magenta fallback");
        Self::default()
    }

    /// Decode a single image file into raw RGB bytes.
    pub fn open(path: &Path) -> TextureResult<Self> {
        let img = image::open(path)?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();

        Ok(Self {
            width,
            height,
            data: rgb.into_raw(),
        })
    }

    /// Build an image from raw RGB bytes (three bytes per pixel, row-major).
    ///
    /// Panics if the buffer length does not match the dimensions.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), (width * height * 3) as usize);
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels, 0 when no data is loaded.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels, 0 when no data is loaded.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB bytes of the pixel at (x, y).
    ///
    /// Coordinates outside the image are clamped into range. When no data
    /// is loaded, returns the magenta sentinel.
    pub fn pixel(&self, x: i64, y: i64) -> [u8; 3] {
        if self.data.is_empty() {
            return MAGENTA;
        }

        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;

        let idx = (y * self.width as usize + x) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    fn candidates(filename: &str) -> Vec<PathBuf> {
        let mut out = Vec::new();

        if let Ok(dir) = std::env::var("EMBER_IMAGES") {
            out.push(Path::new(&dir).join(filename));
        }

        out.push(PathBuf::from(filename));

        let mut prefix = PathBuf::new();
        for _ in 0..7 {
            out.push(prefix.join("images").join(filename));
            prefix.push("..");
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_magenta() {
        let img = Image::load("this-file-does-not-exist.png");

        assert_eq!(img.width(), 0);
        assert_eq!(img.height(), 0);
        assert_eq!(img.pixel(0, 0), [255, 0, 255]);
        assert_eq!(img.pixel(100, -3), [255, 0, 255]);
    }

    #[test]
    fn test_pixel_access_and_clamping() {
        // 2x2 image: red, green / blue, white
        let data = vec![
            255, 0, 0, 0, 255, 0, //
            0, 0, 255, 255, 255, 255,
        ];
        let img = Image::from_rgb8(2, 2, data);

        assert_eq!(img.pixel(0, 0), [255, 0, 0]);
        assert_eq!(img.pixel(1, 0), [0, 255, 0]);
        assert_eq!(img.pixel(0, 1), [0, 0, 255]);
        assert_eq!(img.pixel(1, 1), [255, 255, 255]);

        // Out-of-range coordinates clamp to the nearest edge pixel
        assert_eq!(img.pixel(-5, 0), [255, 0, 0]);
        assert_eq!(img.pixel(7, 9), [255, 255, 255]);
    }

    #[test]
    fn test_candidate_order_prefers_plain_filename() {
        let candidates = Image::candidates("earth.jpg");
        assert!(candidates.contains(&PathBuf::from("earth.jpg")));
        assert!(candidates.contains(&PathBuf::from("images/earth.jpg")));
        assert!(candidates
            .iter()
            .any(|p| p.starts_with("..") && p.ends_with("images/earth.jpg")));
    }
}
