//! Raw camera frames and their conversion to RGB.

use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::EditError;

/// Pixel layouts a camera may deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrameFormat {
    /// Motion JPEG: every frame is a complete JPEG image.
    #[default]
    Mjpeg,
    /// Packed YUV 4:2:2, `Y0 U Y1 V` per pixel pair.
    Yuyv,
}

impl FrameFormat {
    /// The V4L2 FourCC code for this format.
    pub fn fourcc(self) -> [u8; 4] {
        match self {
            FrameFormat::Mjpeg => *b"MJPG",
            FrameFormat::Yuyv => *b"YUYV",
        }
    }

    pub fn from_fourcc(code: [u8; 4]) -> Option<Self> {
        match &code {
            b"MJPG" => Some(FrameFormat::Mjpeg),
            b"YUYV" => Some(FrameFormat::Yuyv),
            _ => None,
        }
    }
}

/// One frame exactly as the device produced it.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub format: FrameFormat,
    pub data: Vec<u8>,
}

impl RawFrame {
    /// Decode or convert the frame into an RGB buffer.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Capture`] if the frame data is truncated or the
    /// JPEG payload cannot be decoded.
    pub fn to_pixel_buffer(&self) -> Result<PixelBuffer, EditError> {
        match self.format {
            FrameFormat::Mjpeg => {
                let img = image::load_from_memory_with_format(&self.data, image::ImageFormat::Jpeg)
                    .map_err(|e| EditError::Capture(format!("invalid MJPEG frame: {e}")))?;
                PixelBuffer::from_rgb_image(img.into_rgb8())
                    .map_err(|e| EditError::Capture(e.to_string()))
            }
            FrameFormat::Yuyv => {
                let rgb = yuyv_to_rgb(&self.data, self.width, self.height)?;
                PixelBuffer::new(self.width, self.height, rgb)
                    .map_err(|e| EditError::Capture(e.to_string()))
            }
        }
    }
}

/// Convert packed YUYV 4:2:2 to interleaved RGB using BT.601 full-range
/// coefficients in fixed point (scaled by 32).
pub fn yuyv_to_rgb(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EditError> {
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .filter(|&n| width % 2 == 0 && n <= data.len() / 2);
    let Some(pixel_count) = pixel_count else {
        return Err(EditError::Capture(format!(
            "YUYV frame of {} bytes does not cover {width}x{height}",
            data.len()
        )));
    };

    let mut rgb = vec![0u8; pixel_count * CHANNELS];

    data.chunks_exact(4)
        .zip(rgb.chunks_exact_mut(2 * CHANNELS))
        .for_each(|(yuyv, out)| {
            let u = yuyv[1] as i32 - 128;
            let v = yuyv[3] as i32 - 128;

            // Chroma is shared by the pixel pair
            let r_off = 45 * v; // 1.402 * 32
            let g_off = -11 * u - 23 * v; // -0.344 * 32, -0.714 * 32
            let b_off = 57 * u; // 1.772 * 32

            for (i, y) in [yuyv[0], yuyv[2]].into_iter().enumerate() {
                let y = (y as i32) << 5;
                let px = &mut out[i * CHANNELS..(i + 1) * CHANNELS];
                px[0] = ((y + r_off) >> 5).clamp(0, 255) as u8;
                px[1] = ((y + g_off) >> 5).clamp(0, 255) as u8;
                px[2] = ((y + b_off) >> 5).clamp(0, 255) as u8;
            }
        });

    Ok(rgb)
}
