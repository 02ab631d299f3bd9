//! Pixel transformations over [`PixelBuffer`](crate::PixelBuffer).
//!
//! Every function here takes the source buffer by reference and returns a
//! new buffer; inputs are never modified, and a failing call leaves nothing
//! behind.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - Rows increase downward
//! - Callers working from the bottom edge convert first, see
//!   [`flip_y`](crate::buffer::flip_y)

mod brightness;
mod channel;
mod crop;
mod line;

pub use brightness::adjust_brightness;
pub use channel::{isolate_channel, isolate_channel_by_name};
pub use crop::crop;
pub use line::{draw_line, draw_line_with_color, HIGHLIGHT};
