//! Video4Linux2 capture backend.

use ::v4l::buffer::Type;
use ::v4l::io::mmap::Stream as MmapStream;
use ::v4l::io::traits::CaptureStream;
use ::v4l::video::Capture;
use ::v4l::{Device, FourCC};
use log::{debug, warn};

use super::{CameraBackend, CameraDevice, CaptureConfig, FrameFormat, RawFrame};
use crate::error::EditError;

/// Number of memory-mapped buffers requested from the driver.
const BUFFER_COUNT: u32 = 4;

/// Opens `/dev/video{index}` through V4L2.
#[derive(Debug, Clone, Copy, Default)]
pub struct V4lBackend;

/// An open V4L2 device with a running memory-mapped stream.
///
/// Dropping it stops the stream, unmaps the buffers and closes the device.
pub struct V4lDevice {
    // Declared before `device` so the stream is torn down first
    stream: MmapStream<'static>,
    device: Device,
    index: usize,
    width: u32,
    height: u32,
    format: FrameFormat,
}

impl CameraBackend for V4lBackend {
    type Device = V4lDevice;

    fn open(&self, config: &CaptureConfig) -> Result<V4lDevice, EditError> {
        let index = config.device_index;
        let unavailable = |e: std::io::Error| EditError::DeviceUnavailable {
            index,
            reason: e.to_string(),
        };

        let device = Device::new(index).map_err(unavailable)?;

        let mut format = device.format().map_err(unavailable)?;
        if let Some((width, height)) = config.resolution {
            format.width = width;
            format.height = height;
        }
        format.fourcc = FourCC::new(&config.format.fourcc());
        device.set_format(&format).map_err(unavailable)?;

        // The driver may silently pick a different mode
        let actual = device.format().map_err(unavailable)?;
        let negotiated = FrameFormat::from_fourcc(actual.fourcc.repr).ok_or_else(|| {
            EditError::DeviceUnavailable {
                index,
                reason: format!("unsupported pixel format {}", actual.fourcc),
            }
        })?;
        if negotiated != config.format {
            warn!(
                "camera {index}: requested {:?}, device delivers {:?}",
                config.format, negotiated
            );
        }

        let stream = MmapStream::with_buffers(&device, Type::VideoCapture, BUFFER_COUNT)
            .map_err(|e| EditError::Capture(format!("failed to start stream: {e}")))?;

        debug!(
            "opened camera {index} at {}x{} ({:?})",
            actual.width, actual.height, negotiated
        );

        Ok(V4lDevice {
            stream,
            device,
            index,
            width: actual.width,
            height: actual.height,
            format: negotiated,
        })
    }
}

impl V4lDevice {
    /// The underlying V4L2 device handle.
    pub fn device(&self) -> &Device {
        &self.device
    }
}

impl CameraDevice for V4lDevice {
    fn read_frame(&mut self) -> Result<Option<RawFrame>, EditError> {
        let (buffer, meta) = self.stream.next().map_err(|e| {
            EditError::Capture(format!("camera {}: {e}", self.index))
        })?;

        let used = (meta.bytesused as usize).min(buffer.len());
        if used == 0 {
            return Ok(None);
        }

        Ok(Some(RawFrame {
            width: self.width,
            height: self.height,
            format: self.format,
            data: buffer[..used].to_vec(),
        }))
    }
}
