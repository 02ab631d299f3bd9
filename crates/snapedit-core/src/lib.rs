//! Snapedit Core - pixel-buffer transformations for a photo editor
//!
//! This crate provides the image layer behind the snapedit editing surface:
//! acquiring an image from a file or a camera, and a handful of pure
//! transformations over the resulting RGB buffer.
//!
//! - [`decode::load_from_file`] and [`camera::capture_from_device`] produce
//!   a [`PixelBuffer`]
//! - [`transform`] isolates channels, crops, adjusts brightness and draws
//!   line overlays, each returning a new buffer
//! - [`encode`] writes buffers back out through the standard codecs
//!
//! Buffers are plain owned values. Nothing in this crate keeps state between
//! calls, so callers thread buffers from one operation to the next.

pub mod buffer;
pub mod camera;
pub mod decode;
pub mod encode;
pub mod error;
pub mod transform;

pub use buffer::{flip_y, Channel, PixelBuffer, Rectangle};
pub use camera::{capture_from_device, CaptureConfig};
pub use decode::load_from_file;
pub use error::EditError;
pub use transform::{adjust_brightness, crop, draw_line, isolate_channel};
