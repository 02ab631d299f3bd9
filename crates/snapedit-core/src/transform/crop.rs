//! Rectangle cropping in pixel coordinates.
//!
//! # Coordinate System
//!
//! - `(x1, y1)` is the inclusive top-left corner
//! - `(x2, y2)` is the exclusive bottom-right corner
//! - Output dimensions are `(x2 - x1) x (y2 - y1)`
//!
//! # Example
//!
//! ```ignore
//! // Crop the 50x50 region starting at (25, 25)
//! let cropped = crop(&image, Rectangle::new(25, 25, 75, 75))?;
//! ```

use crate::buffer::{PixelBuffer, Rectangle, CHANNELS};
use crate::error::EditError;

/// Copy the pixels inside `rect` into a new buffer.
///
/// # Errors
///
/// Returns [`EditError::InvalidRegion`] if `rect` is empty or reaches past
/// the image (`x2 > width` or `y2 > height`). Regions are never clamped.
pub fn crop(image: &PixelBuffer, rect: Rectangle) -> Result<PixelBuffer, EditError> {
    let (width, height) = image.dimensions();
    if !rect.fits_within(width, height) {
        return Err(EditError::InvalidRegion {
            rect,
            width,
            height,
        });
    }

    // Fast path: full crop returns a clone
    if rect == Rectangle::full(width, height) {
        return Ok(image.clone());
    }

    let out_width = rect.width();
    let out_height = rect.height();
    let row_bytes = out_width as usize * CHANNELS;
    let src = image.as_raw();
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Rows are contiguous in both buffers, so copy a row slice at a time
    for y in rect.y1..rect.y2 {
        let start = image.index(rect.x1, y);
        output.extend_from_slice(&src[start..start + row_bytes]);
    }

    Ok(PixelBuffer::from_parts(out_width, out_height, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for an image size plus an in-bounds, non-empty rectangle.
    fn image_and_rect_strategy() -> impl Strategy<Value = (u32, u32, Rectangle)> {
        (1u32..=40, 1u32..=40).prop_flat_map(|(w, h)| {
            (0..w, 0..h).prop_flat_map(move |(x1, y1)| {
                (x1 + 1..=w, y1 + 1..=h)
                    .prop_map(move |(x2, y2)| (w, h, Rectangle::new(x1, y1, x2, y2)))
            })
        })
    }

    fn create_test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, (x ^ y) as u8]);
            }
        }
        PixelBuffer::new(width, height, pixels).unwrap()
    }

    proptest! {
        /// Property: output dimensions equal the rectangle extent.
        #[test]
        fn prop_dimensions_match_rect((w, h, rect) in image_and_rect_strategy()) {
            let img = create_test_image(w, h);
            let result = crop(&img, rect).unwrap();

            prop_assert_eq!(result.dimensions(), (rect.x2 - rect.x1, rect.y2 - rect.y1));
            prop_assert_eq!(result.as_raw().len(), result.pixel_count() * 3);
        }

        /// Property: a full-extent crop of a crop is the crop itself.
        #[test]
        fn prop_full_crop_of_crop_is_identity((w, h, rect) in image_and_rect_strategy()) {
            let img = create_test_image(w, h);
            let once = crop(&img, rect).unwrap();
            let (cw, ch) = once.dimensions();
            let twice = crop(&once, Rectangle::full(cw, ch)).unwrap();

            prop_assert_eq!(twice, once);
        }

        /// Property: every output pixel is the source pixel at the offset position.
        #[test]
        fn prop_pixels_come_from_offset((w, h, rect) in image_and_rect_strategy()) {
            let img = create_test_image(w, h);
            let result = crop(&img, rect).unwrap();

            for y in 0..result.height() {
                for x in 0..result.width() {
                    prop_assert_eq!(result.pixel(x, y), img.pixel(rect.x1 + x, rect.y1 + y));
                }
            }
        }

        /// Property: rectangles reaching past the image are rejected.
        #[test]
        fn prop_oversized_rejected(
            (w, h) in (1u32..=40, 1u32..=40),
            extra in 1u32..=10,
        ) {
            let img = create_test_image(w, h);
            prop_assert!(crop(&img, Rectangle::new(0, 0, w + extra, h)).is_err());
            prop_assert!(crop(&img, Rectangle::new(0, 0, w, h + extra)).is_err());
        }
    }
}
