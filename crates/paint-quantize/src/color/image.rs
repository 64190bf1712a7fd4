//! Decoded pixel buffer handed over by the image-decoding collaborator.

use std::fmt;

use super::rgb::Rgb;

/// Error type for pixel buffer validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    /// Width or height is zero
    ZeroDimension,
    /// Pixel count does not match `width * height`
    DimensionMismatch {
        /// Number of pixels (or bytes / 3) supplied
        len: usize,
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
    },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::ZeroDimension => write!(f, "image dimensions cannot be zero"),
            ImageError::DimensionMismatch { len, width, height } => write!(
                f,
                "pixel buffer length {} does not match dimensions {}x{}",
                len, width, height
            ),
        }
    }
}

impl std::error::Error for ImageError {}

/// An 8-bit RGB image stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl RgbImage {
    /// Wrap a row-major pixel vector.
    ///
    /// # Errors
    ///
    /// - [`ImageError::ZeroDimension`] if either dimension is zero
    /// - [`ImageError::DimensionMismatch`] if `pixels.len() != width * height`
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::ZeroDimension);
        }
        if pixels.len() != width * height {
            return Err(ImageError::DimensionMismatch {
                len: pixels.len(),
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image from packed `[R, G, B, R, G, B, ...]` bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use paint_quantize::{Rgb, RgbImage};
    ///
    /// let image = RgbImage::from_raw_rgb(2, 1, &[255, 0, 0, 0, 0, 255]).unwrap();
    /// assert_eq!(image.pixel(1, 0), Rgb::new(0, 0, 255));
    /// ```
    pub fn from_raw_rgb(width: usize, height: usize, bytes: &[u8]) -> Result<Self, ImageError> {
        if bytes.len() % 3 != 0 {
            return Err(ImageError::DimensionMismatch {
                len: bytes.len() / 3,
                width,
                height,
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// A `width` x `height` image filled with one color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, ImageError> {
        Self::new(width, height, vec![color; width * height])
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x]
    }

    /// Pixels of row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &[Rgb] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_dimensions() {
        assert_eq!(
            RgbImage::new(0, 4, Vec::new()),
            Err(ImageError::ZeroDimension)
        );
        assert_eq!(
            RgbImage::new(2, 2, vec![Rgb::default(); 3]),
            Err(ImageError::DimensionMismatch {
                len: 3,
                width: 2,
                height: 2
            })
        );
        assert!(RgbImage::new(2, 2, vec![Rgb::default(); 4]).is_ok());
    }

    #[test]
    fn test_from_raw_rgb_rejects_partial_pixel() {
        let result = RgbImage::from_raw_rgb(1, 1, &[1, 2]);
        assert!(matches!(result, Err(ImageError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_row_access() {
        let pixels = (0..6).map(|i| Rgb::new(i, 0, 0)).collect();
        let image = RgbImage::new(3, 2, pixels).unwrap();
        assert_eq!(image.row(1)[0], Rgb::new(3, 0, 0));
        assert_eq!(image.pixel(2, 1), Rgb::new(5, 0, 0));
    }

    #[test]
    fn test_error_display() {
        let err = ImageError::DimensionMismatch {
            len: 5,
            width: 2,
            height: 3,
        };
        assert_eq!(
            err.to_string(),
            "pixel buffer length 5 does not match dimensions 2x3"
        );
    }
}
