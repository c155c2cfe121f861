use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

use crate::capture::domain::frame_source::{CaptureError, FrameSource};
use crate::shared::frame::Frame;

/// Frame source backed by a local camera device.
///
/// The device is opened once in [`WebcamSource::open`]; its stream is
/// stopped on [`FrameSource::release`] or on drop, whichever comes first.
pub struct WebcamSource {
    camera: Camera,
    device_index: u32,
    frames_captured: usize,
    streaming: bool,
}

impl WebcamSource {
    pub fn open(device_index: u32) -> Result<Self, CaptureError> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);

        let mut camera = Camera::new(CameraIndex::Index(device_index), requested).map_err(|e| {
            CaptureError::Device(format!("failed to open camera {device_index}: {e}"))
        })?;
        camera
            .open_stream()
            .map_err(|e| CaptureError::Device(format!("failed to start stream: {e}")))?;

        let resolution = camera.resolution();
        log::info!(
            "Camera {} opened: {}x{} @ {} fps",
            device_index,
            resolution.width(),
            resolution.height(),
            camera.frame_rate()
        );

        Ok(Self {
            camera,
            device_index,
            frames_captured: 0,
            streaming: true,
        })
    }
}

impl FrameSource for WebcamSource {
    fn next_frame(&mut self) -> Result<Frame, CaptureError> {
        if !self.streaming {
            return Err(CaptureError::Device("camera already released".into()));
        }
        let buffer = self
            .camera
            .frame()
            .map_err(|e| CaptureError::Device(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::Decode(e.to_string()))?;

        let (width, height) = (decoded.width(), decoded.height());
        let frame = Frame::new(decoded.into_raw(), width, height, 3, self.frames_captured);
        self.frames_captured += 1;
        Ok(frame)
    }

    fn release(&mut self) {
        if !self.streaming {
            return;
        }
        self.streaming = false;
        match self.camera.stop_stream() {
            Ok(()) => log::info!(
                "Camera {} released after {} frames",
                self.device_index,
                self.frames_captured
            ),
            Err(e) => log::warn!("Failed to stop camera {}: {e}", self.device_index),
        }
    }
}

impl Drop for WebcamSource {
    fn drop(&mut self) {
        self.release();
    }
}
