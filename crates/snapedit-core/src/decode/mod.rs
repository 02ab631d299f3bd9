//! File acquisition: decoding raster images into [`PixelBuffer`]s.
//!
//! This module provides functionality for:
//! - Loading PNG and JPEG files (and anything else the enabled `image`
//!   codecs understand) from disk or from memory
//! - Applying EXIF orientation so the buffer is upright
//!
//! All inputs are converted to 8-bit RGB on the way in. Missing files,
//! unreadable files and undecodable content all surface as
//! [`EditError::Decode`](crate::EditError::Decode).
//!
//! # Examples
//!
//! ```ignore
//! use snapedit_core::decode::load_from_file;
//!
//! let image = load_from_file("photo.jpg")?;
//! println!("Loaded {}x{} image", image.width(), image.height());
//! ```
//!
//! [`PixelBuffer`]: crate::PixelBuffer

mod file;
mod orientation;

pub use file::{load_from_file, load_from_file_no_orientation, load_from_memory};
pub use orientation::{get_orientation, Orientation};
