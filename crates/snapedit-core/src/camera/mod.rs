//! Camera acquisition: grab a single still frame from a capture device.
//!
//! A capture is one synchronous open/read/release sequence. The opened
//! device is an owned value that closes itself on drop and never leaves
//! [`capture_with`], so it is released on the success path and on every
//! error path alike. No handle is kept between calls.
//!
//! # Backends
//!
//! - [`V4lBackend`] (Linux, `camera` feature): Video4Linux2 via the `v4l` crate
//! - Anything implementing [`CameraBackend`], e.g. a fake in tests
//!
//! Without a compiled-in backend, [`capture_from_device`] reports
//! [`EditError::DeviceUnavailable`].
//!
//! # Threading
//!
//! Capturing blocks the calling thread and has no timeout. Callers must not
//! open the same device from two threads at once.

mod frame;
#[cfg(all(feature = "camera", target_os = "linux"))]
mod v4l;

pub use frame::{yuyv_to_rgb, FrameFormat, RawFrame};
#[cfg(all(feature = "camera", target_os = "linux"))]
pub use self::v4l::{V4lBackend, V4lDevice};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::EditError;

/// Settings for a single capture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Zero-based device index; 0 is the default camera.
    pub device_index: usize,
    /// Requested `(width, height)`; `None` keeps the device's current mode.
    pub resolution: Option<(u32, u32)>,
    /// Preferred frame format. The device may negotiate another one.
    pub format: FrameFormat,
    /// Frames read and discarded before the kept one, giving auto-exposure
    /// time to settle.
    pub warmup_frames: u32,
}

impl CaptureConfig {
    pub fn new(device_index: usize) -> Self {
        Self {
            device_index,
            ..Self::default()
        }
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution = Some((width, height));
        self
    }

    pub fn with_format(mut self, format: FrameFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_warmup_frames(mut self, frames: u32) -> Self {
        self.warmup_frames = frames;
        self
    }
}

/// Opens capture devices.
pub trait CameraBackend {
    type Device: CameraDevice;

    /// Open and configure the device named by `config`.
    ///
    /// Implementations return [`EditError::DeviceUnavailable`] when the
    /// device cannot be opened.
    fn open(&self, config: &CaptureConfig) -> Result<Self::Device, EditError>;
}

/// An open capture device. Dropping it releases the device.
pub trait CameraDevice {
    /// Block until the next frame arrives. `Ok(None)` means the device
    /// delivered an empty buffer.
    fn read_frame(&mut self) -> Result<Option<RawFrame>, EditError>;
}

/// Capture one frame from camera `device_index` with default settings.
///
/// # Errors
///
/// - [`EditError::DeviceUnavailable`] if the device cannot be opened, or no
///   camera backend is compiled in
/// - [`EditError::Capture`] if the device opens but yields no usable frame
pub fn capture_from_device(device_index: usize) -> Result<PixelBuffer, EditError> {
    capture_with_config(&CaptureConfig::new(device_index))
}

/// Capture one frame using the platform backend.
#[cfg(all(feature = "camera", target_os = "linux"))]
pub fn capture_with_config(config: &CaptureConfig) -> Result<PixelBuffer, EditError> {
    capture_with(&V4lBackend, config)
}

/// Capture one frame using the platform backend.
#[cfg(not(all(feature = "camera", target_os = "linux")))]
pub fn capture_with_config(config: &CaptureConfig) -> Result<PixelBuffer, EditError> {
    Err(EditError::DeviceUnavailable {
        index: config.device_index,
        reason: "no camera backend compiled in (enable the `camera` feature on Linux)"
            .to_string(),
    })
}

/// Run the open/read/release sequence against `backend`.
pub fn capture_with<B: CameraBackend>(
    backend: &B,
    config: &CaptureConfig,
) -> Result<PixelBuffer, EditError> {
    let frame = {
        let mut device = backend.open(config)?;

        for _ in 0..config.warmup_frames {
            device.read_frame()?;
        }

        device.read_frame()?.ok_or_else(|| {
            EditError::Capture(format!(
                "camera {} delivered an empty frame",
                config.device_index
            ))
        })?
    };
    trace!("released camera {}", config.device_index);

    let image = frame.to_pixel_buffer()?;
    debug!(
        "captured {}x{} {:?} frame from camera {}",
        image.width(),
        image.height(),
        frame.format,
        config.device_index
    );
    Ok(image)
}
