//! Single-channel isolation.
//!
//! The result keeps all three planes: the selected one is copied, the other
//! two are zeroed, so a red isolation displays as a red-tinted image rather
//! than a grayscale one.

use crate::buffer::{Channel, PixelBuffer, CHANNELS};
use crate::error::EditError;

/// Keep only `channel`, zeroing the other two planes.
pub fn isolate_channel(image: &PixelBuffer, channel: Channel) -> PixelBuffer {
    let keep = channel.offset();
    let mut output = vec![0u8; image.as_raw().len()];

    for (dst, src) in output
        .chunks_exact_mut(CHANNELS)
        .zip(image.as_raw().chunks_exact(CHANNELS))
    {
        dst[keep] = src[keep];
    }

    PixelBuffer::from_parts(image.width(), image.height(), output)
}

/// Parse `selector` (`R`, `G`, `B` or a full channel name) and isolate it.
///
/// # Errors
///
/// Returns [`EditError::InvalidChannel`] for any other selector.
pub fn isolate_channel_by_name(
    image: &PixelBuffer,
    selector: &str,
) -> Result<PixelBuffer, EditError> {
    let channel = selector.parse::<Channel>()?;
    Ok(isolate_channel(image, channel))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PixelBuffer {
        PixelBuffer::new(2, 1, vec![10, 20, 30, 200, 150, 100]).unwrap()
    }

    #[test]
    fn test_isolate_red() {
        let result = isolate_channel(&sample(), Channel::Red);
        assert_eq!(result.as_raw(), &[10, 0, 0, 200, 0, 0]);
    }

    #[test]
    fn test_isolate_green() {
        let result = isolate_channel(&sample(), Channel::Green);
        assert_eq!(result.as_raw(), &[0, 20, 0, 0, 150, 0]);
    }

    #[test]
    fn test_isolate_blue() {
        let result = isolate_channel(&sample(), Channel::Blue);
        assert_eq!(result.as_raw(), &[0, 0, 30, 0, 0, 100]);
    }

    #[test]
    fn test_isolate_keeps_dimensions_and_source() {
        let src = sample();
        let result = isolate_channel(&src, Channel::Green);
        assert_eq!(result.dimensions(), src.dimensions());
        assert_eq!(src.as_raw(), &[10, 20, 30, 200, 150, 100]);
    }

    #[test]
    fn test_isolate_by_name() {
        let result = isolate_channel_by_name(&sample(), "R").unwrap();
        assert_eq!(result, isolate_channel(&sample(), Channel::Red));
    }

    #[test]
    fn test_isolate_by_invalid_name() {
        match isolate_channel_by_name(&sample(), "X") {
            Err(EditError::InvalidChannel(s)) => assert_eq!(s, "X"),
            other => panic!("Expected InvalidChannel error, got: {:?}", other),
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
