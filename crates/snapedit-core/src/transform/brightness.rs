//! Uniform brightness adjustment.
//!
//! Adds a signed offset to every channel of every pixel with saturating
//! 8-bit arithmetic: values clamp at 255 and 0 instead of wrapping.

use crate::buffer::PixelBuffer;

/// Largest offset that can still change a pixel.
const MAX_DELTA: i16 = 255;

/// Add `delta` to every channel, saturating to `[0, 255]`.
///
/// Offsets beyond `[-255, 255]` are clamped to that range, which yields the
/// same result. A zero offset returns an identical copy.
///
/// # Example
///
/// ```ignore
/// let brighter = adjust_brightness(&image, 50);
/// let darker = adjust_brightness(&image, -30);
/// ```
pub fn adjust_brightness(image: &PixelBuffer, delta: i16) -> PixelBuffer {
    if delta == 0 {
        return image.clone();
    }

    let delta = delta.clamp(-MAX_DELTA, MAX_DELTA);
    let magnitude = delta.unsigned_abs() as u8;

    let output = if delta > 0 {
        image
            .as_raw()
            .iter()
            .map(|&v| v.saturating_add(magnitude))
            .collect()
    } else {
        image
            .as_raw()
            .iter()
            .map(|&v| v.saturating_sub(magnitude))
            .collect()
    };

    PixelBuffer::from_parts(image.width(), image.height(), output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
