//! Horizontal compositing of per-monitor captures.
//!
//! Buffers are placed left to right in the order given, top-aligned, on an
//! opaque black canvas as wide as all inputs together and as tall as the
//! tallest one.

use image::{imageops, RgbaImage};
use panoshot_common::error::{ShotError, ShotResult};

use crate::buffer::{PixelBuffer, BLACK};

/// Placement of each input on the composite canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    /// x offset of each input, in input order.
    pub offsets: Vec<u32>,
}

/// Compute the canvas size and per-input x offsets.
pub fn layout(sizes: &[(u32, u32)]) -> ShotResult<Layout> {
    if sizes.is_empty() {
        return Err(ShotError::composition("no images to composite"));
    }

    let mut offsets = Vec::with_capacity(sizes.len());
    let mut width: u32 = 0;
    let mut height: u32 = 0;
    for &(w, h) in sizes {
        offsets.push(width);
        width = width
            .checked_add(w)
            .ok_or_else(|| ShotError::composition("composite width overflows u32"))?;
        height = height.max(h);
    }

    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(|| {
            ShotError::composition(format!("{width}x{height} canvas does not fit in memory"))
        })?;

    Ok(Layout {
        width,
        height,
        offsets,
    })
}

/// Composite owned buffers; a single buffer is returned as-is.
///
/// Inputs are dropped once drawn.
pub fn composite(mut images: Vec<PixelBuffer>) -> ShotResult<PixelBuffer> {
    if images.len() == 1 {
        return images
            .pop()
            .ok_or_else(|| ShotError::composition("no images to composite"));
    }
    composite_borrowed(&images)
}

/// Composite without taking ownership of the inputs. Always allocates.
pub fn composite_borrowed(images: &[PixelBuffer]) -> ShotResult<PixelBuffer> {
    let sizes: Vec<_> = images.iter().map(PixelBuffer::dimensions).collect();
    let layout = layout(&sizes)?;

    let mut canvas = RgbaImage::from_pixel(layout.width, layout.height, BLACK);
    for (image, &x) in images.iter().zip(&layout.offsets) {
        imageops::replace(&mut canvas, image.as_image(), i64::from(x), 0);
    }

    tracing::debug!(
        inputs = images.len(),
        width = layout.width,
        height = layout.height,
        "Composited captures"
    );
    PixelBuffer::new(canvas)
}
