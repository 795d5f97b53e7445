//! Encoding captures to JPEG or PNG bytes.

use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use panoshot_common::config::OutputFormat;
use panoshot_common::error::{ShotError, ShotResult};

use crate::buffer::PixelBuffer;

/// Captures at least this tall are treated as high-DPI and compressed hard.
pub const HIGH_DPI_MIN_HEIGHT: u32 = 1600;
/// JPEG quality for captures shorter than [`HIGH_DPI_MIN_HEIGHT`].
pub const STANDARD_JPEG_QUALITY: u8 = 40;
/// JPEG quality for high-DPI captures.
pub const HIGH_DPI_JPEG_QUALITY: u8 = 4;

/// JPEG quality for an image of the given height.
pub fn jpeg_quality_for_height(height: u32) -> u8 {
    if height < HIGH_DPI_MIN_HEIGHT {
        STANDARD_JPEG_QUALITY
    } else {
        HIGH_DPI_JPEG_QUALITY
    }
}

/// The encoding applied to a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    pub format: OutputFormat,
    /// JPEG quality; `None` for lossless formats.
    pub quality: Option<u8>,
}

/// Encode a buffer. JPEG drops the alpha channel.
pub fn encode(buffer: &PixelBuffer, format: OutputFormat) -> ShotResult<(Vec<u8>, Encoding)> {
    let mut bytes = Vec::new();
    let encoding = match format {
        OutputFormat::Jpeg => {
            let quality = jpeg_quality_for_height(buffer.height());
            let rgb: RgbImage = buffer.as_image().convert();
            JpegEncoder::new_with_quality(&mut bytes, quality)
                .encode_image(&rgb)
                .map_err(ShotError::Encode)?;
            Encoding {
                format,
                quality: Some(quality),
            }
        }
        OutputFormat::Png => {
            let (width, height) = buffer.dimensions();
            PngEncoder::new(&mut bytes)
                .write_image(buffer.as_image().as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(ShotError::Encode)?;
            Encoding {
                format,
                quality: None,
            }
        }
    };

    tracing::debug!(
        ?encoding,
        width = buffer.width(),
        height = buffer.height(),
        bytes = bytes.len(),
        "Encoded capture"
    );
    Ok((bytes, encoding))
}
