//! Value types shared by every operation: the pixel buffer, crop rectangles
//! and channel selectors.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - x increases to the right, y increases downward
//! - Callers that measure rows from the bottom edge convert with [`flip_y`]
//!   or [`Rectangle::from_bottom_origin`] before calling into the transforms

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 3;

/// An 8-bit RGB raster.
///
/// Pixels are stored interleaved in row-major order (`R, G, B, R, G, B, ...`).
/// A buffer always has non-zero dimensions and exactly
/// `width * height * 3` bytes. It is immutable once built: transformations
/// produce new buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from interleaved RGB data.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidDimensions`] if either dimension is zero or
    /// the data length is not `width * height * 3`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EditError> {
        if width == 0 || height == 0 || byte_len(width, height) != Some(pixels.len()) {
            return Err(EditError::InvalidDimensions {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer with every pixel set to `rgb`.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, EditError> {
        let len = byte_len(width, height).ok_or(EditError::InvalidDimensions {
            width,
            height,
            len: 0,
        })?;
        let pixels = rgb.iter().copied().cycle().take(len).collect();
        Self::new(width, height, pixels)
    }

    /// Build from pixel data whose length was produced by a transform over
    /// a valid buffer. Callers uphold the size invariant.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer from an `image::RgbImage`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidDimensions`] for a zero-sized image.
    pub fn from_rgb_image(img: image::RgbImage) -> Result<Self, EditError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Copy into an `image::RgbImage`.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        self.clone().into_rgb_image()
    }

    /// Convert into an `image::RgbImage` without copying.
    pub fn into_rgb_image(self) -> image::RgbImage {
        // Length is guaranteed by construction, so from_raw cannot fail here.
        image::RgbImage::from_raw(self.width, self.height, self.pixels)
            .unwrap_or_else(|| image::RgbImage::new(0, 0))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Interleaved RGB bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return its interleaved RGB bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// RGB value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }

    /// Extract one plane as a contiguous `width * height` vector.
    pub fn channel_plane(&self, channel: Channel) -> Vec<u8> {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(|px| px[channel.offset()])
            .collect()
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * CHANNELS
    }
}

/// Byte length of a `width x height` RGB raster, or `None` if it does not
/// fit in `usize`.
pub(crate) fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}

/// One of the three color planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Byte offset of this channel within an interleaved RGB pixel.
    #[inline]
    pub fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl TryFrom<char> for Channel {
    type Error = EditError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'R' => Ok(Channel::Red),
            'G' => Ok(Channel::Green),
            'B' => Ok(Channel::Blue),
            _ => Err(EditError::InvalidChannel(value.to_string())),
        }
    }
}

impl FromStr for Channel {
    type Err = EditError;

    /// Accepts `R`/`G`/`B` or the full channel name, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Channel::Red),
            "g" | "green" => Ok(Channel::Green),
            "b" | "blue" => Ok(Channel::Blue),
            _ => Err(EditError::InvalidChannel(s.to_string())),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
        };
        f.write_str(s)
    }
}

/// Half-open pixel region `[x1, x2) x [y1, y2)` in top-left-origin coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl Rectangle {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The rectangle covering a whole `width x height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Build a top-left-origin rectangle from rows measured upward from the
    /// bottom edge of an image `height` rows tall.
    ///
    /// Each row is converted with [`flip_y`] on its own and the pair is
    /// reordered, so the result spans `[min, max)` of the flipped rows.
    /// Rows at or beyond `height` map to 0.
    pub fn from_bottom_origin(x1: u32, y1: u32, x2: u32, y2: u32, height: u32) -> Self {
        let top_a = flip_y(y1, height);
        let top_b = flip_y(y2, height);
        Self::new(x1, top_a.min(top_b), x2, top_a.max(top_b))
    }

    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    pub fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// True when the rectangle is non-empty and lies inside a
    /// `width x height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        !self.is_empty() && self.x2 <= width && self.y2 <= height
    }
}

/// Convert a row index measured from the bottom edge into a top-left-origin
/// row: `height - y - 1`, saturating at 0.
#[inline]
pub fn flip_y(y: u32, height: u32) -> u32 {
    height.saturating_sub(y).saturating_sub(1)
}
