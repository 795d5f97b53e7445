//! Owned RGBA pixel buffers.

use image::{imageops, Rgba, RgbaImage};
use panoshot_common::error::{ShotError, ShotResult};

/// Opaque black, used as the compositing background.
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A captured image with 8 bits per channel RGBA pixels.
///
/// A buffer is never empty: construction rejects zero-area images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    pub fn new(image: RgbaImage) -> ShotResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ShotError::invalid_image(format!(
                "zero-area image {}x{}",
                image.width(),
                image.height()
            )));
        }
        Ok(Self { image })
    }

    /// A buffer of the given size with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> ShotResult<Self> {
        Self::new(RgbaImage::from_pixel(width, height, color))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Pixel at `(x, y)`; panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Copy out the `width` x `height` region whose top-left corner is `(x, y)`.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> ShotResult<Self> {
        let fits = x.checked_add(width).is_some_and(|right| right <= self.width())
            && y.checked_add(height).is_some_and(|bottom| bottom <= self.height());
        if !fits {
            return Err(ShotError::invalid_image(format!(
                "crop {width}x{height}@{x},{y} outside {}x{} image",
                self.width(),
                self.height()
            )));
        }
        Self::new(imageops::crop_imm(&self.image, x, y, width, height).to_image())
    }
}
