//! Encoding buffers back to standard image formats.
//!
//! This module delegates to the `image` crate's PNG and JPEG encoders; no
//! format of its own is defined.
//!
//! # Examples
//!
//! ```ignore
//! use snapedit_core::encode::{encode_jpeg, save_to_file};
//!
//! let jpeg_bytes = encode_jpeg(&image, 90)?;
//! save_to_file(&image, "edited.png")?;
//! ```

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::debug;

use crate::buffer::PixelBuffer;
use crate::error::EditError;

/// Encode as PNG (lossless).
pub fn encode_png(image: &PixelBuffer) -> Result<Vec<u8>, EditError> {
    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EditError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Encode as JPEG. `quality` is clamped to 1-100.
pub fn encode_jpeg(image: &PixelBuffer, quality: u8) -> Result<Vec<u8>, EditError> {
    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EditError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// JPEG quality used by [`save_to_file`].
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Write `image` to `path`, choosing PNG or JPEG from the extension.
///
/// # Errors
///
/// Returns [`EditError::Encode`] for unknown extensions, encoder failures
/// and write failures.
pub fn save_to_file(image: &PixelBuffer, path: impl AsRef<Path>) -> Result<(), EditError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let bytes = match extension.as_deref() {
        Some("png") => encode_png(image)?,
        Some("jpg" | "jpeg") => encode_jpeg(image, DEFAULT_JPEG_QUALITY)?,
        _ => {
            return Err(EditError::Encode(format!(
                "unsupported output format for {}",
                path.display()
            )))
        }
    };

    std::fs::write(path, &bytes)
        .map_err(|e| EditError::Encode(format!("{}: {e}", path.display())))?;
    debug!("saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
