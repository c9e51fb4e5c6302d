// capture/webcam.rs — Real camera capture through nokhwa.
//
// The platform backend (V4L2, AVFoundation, Media Foundation) is picked
// by nokhwa's `input-native` feature. Frames are decoded to RGB24 and
// copied into an Image<Rgb>.

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use tracing::{debug, warn};

use crate::convert::frame_from_rgb24;
use crate::error::CaptureError;
use crate::image::{Image, Rgb};

use super::{CameraBackend, FrameSource};

/// Opens system cameras by index.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebcamBackend;

/// An open, streaming system camera. Dropping it stops the stream and
/// releases the device.
pub struct Webcam {
    camera: Camera,
    index: u32,
}

impl CameraBackend for WebcamBackend {
    type Device = Webcam;

    fn open(&mut self, index: u32) -> Result<Webcam, CaptureError> {
        let open_err = |e: nokhwa::NokhwaError| CaptureError::Open {
            index,
            reason: e.to_string(),
        };
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(index), requested).map_err(open_err)?;
        camera.open_stream().map_err(open_err)?;
        debug!(index, format = ?camera.camera_format(), "camera stream open");
        Ok(Webcam { camera, index })
    }
}

impl FrameSource for Webcam {
    fn read(&mut self) -> Result<Image<Rgb>, CaptureError> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| CaptureError::Read(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::Read(e.to_string()))?;
        let (w, h) = (decoded.width() as usize, decoded.height() as usize);
        frame_from_rgb24(w, h, decoded.as_raw())
            .ok_or_else(|| CaptureError::Read(format!("camera {} returned a short {w}×{h} buffer", self.index)))
    }
}

impl Drop for Webcam {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            warn!(index = self.index, error = %e, "failed to stop camera stream");
        }
    }
}
