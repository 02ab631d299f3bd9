//! Error taxonomy shared by acquisition and transformation operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::buffer::Rectangle;

/// Errors returned by snapedit operations.
///
/// Every failure is scoped to the call that produced it; buffers passed in
/// are never modified.
#[derive(Debug, Error)]
pub enum EditError {
    /// The file is missing, unreadable, or not a decodable raster image.
    #[error("Failed to decode image {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    /// The camera device could not be opened.
    #[error("Camera {index} is unavailable: {reason}")]
    DeviceUnavailable { index: usize, reason: String },

    /// The camera opened but did not deliver a usable frame.
    #[error("Failed to capture frame: {0}")]
    Capture(String),

    /// Channel selector outside R, G, B.
    #[error("Invalid channel {0:?}: expected one of R, G, B")]
    InvalidChannel(String),

    /// Crop rectangle is empty or extends outside the image.
    #[error(
        "Invalid region ({}, {})-({}, {}) for {width}x{height} image",
        .rect.x1, .rect.y1, .rect.x2, .rect.y2
    )]
    InvalidRegion {
        rect: Rectangle,
        width: u32,
        height: u32,
    },

    /// Pixel data length does not match the requested dimensions.
    #[error("Invalid dimensions {width}x{height} for {len} bytes of RGB data")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    /// Encoding or writing the image failed.
    #[error("Failed to encode image: {0}")]
    Encode(String),
}
