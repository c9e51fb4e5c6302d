// capture/mod.rs — Camera backends, open devices, and device acquisition.
//
// A `CameraBackend` opens devices by index; an open device is a
// `FrameSource`. Devices release their OS handle when dropped, so the
// handle is freed on every exit path out of the loop, including errors
// and unwinding.
//
// Backends:
//   synthetic — moving test pattern, always available
//   webcam    — nokhwa, behind the `webcam` cargo feature

mod synthetic;
#[cfg(feature = "webcam")]
mod webcam;

pub use synthetic::{SyntheticBackend, SyntheticCamera};
#[cfg(feature = "webcam")]
pub use webcam::{Webcam, WebcamBackend};

use tracing::{info, warn};

use crate::error::{AppError, CaptureError};
use crate::image::{Image, Rgb};

/// Default order in which camera indices are tried.
pub const DEFAULT_CANDIDATES: [u32; 3] = [0, 1, 2];

/// Something that yields frames on demand.
pub trait FrameSource {
    /// Block until the next frame is available. An error ends the session;
    /// there is no reconnect.
    fn read(&mut self) -> Result<Image<Rgb>, CaptureError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn read(&mut self) -> Result<Image<Rgb>, CaptureError> {
        (**self).read()
    }
}

/// Opens capture devices by index.
pub trait CameraBackend {
    type Device: FrameSource;

    /// Open device `index`. Success means the handle is open, not that it
    /// produces frames.
    fn open(&mut self, index: u32) -> Result<Self::Device, CaptureError>;
}

/// A device that opened and produced a first frame.
pub struct Acquired<D> {
    pub index: u32,
    pub device: D,
    /// The first frame read during acquisition. Kept only for its dimensions.
    pub first_frame: Image<Rgb>,
}

/// Try `candidates` in order and keep the first device that opens and
/// yields a frame.
///
/// Devices that open but fail the first read are dropped (released)
/// before the next candidate is tried. One linear pass, no retries.
pub fn acquire<B: CameraBackend>(
    backend: &mut B,
    candidates: &[u32],
) -> Result<Acquired<B::Device>, AppError> {
    for &index in candidates {
        info!("Trying camera {index}...");
        let mut device = match backend.open(index) {
            Ok(d) => d,
            Err(e) => {
                warn!(index, error = %e, "camera did not open");
                continue;
            }
        };
        match device.read() {
            Ok(first_frame) => {
                info!(
                    index,
                    width = first_frame.width(),
                    height = first_frame.height(),
                    "Opened camera {index}"
                );
                return Ok(Acquired { index, device, first_frame });
            }
            Err(e) => {
                warn!(index, error = %e, "camera opened but produced no frame, releasing");
                drop(device);
            }
        }
    }
    Err(AppError::DeviceUnavailable { tried: candidates.to_vec() })
}

/// Backend used when the crate is built without a real camera backend.
/// Every open fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCameraBackend;

/// Never constructed; exists to satisfy `CameraBackend::Device`.
pub enum NoDevice {}

impl FrameSource for NoDevice {
    fn read(&mut self) -> Result<Image<Rgb>, CaptureError> {
        match *self {}
    }
}

impl CameraBackend for NoCameraBackend {
    type Device = NoDevice;

    fn open(&mut self, _index: u32) -> Result<NoDevice, CaptureError> {
        Err(CaptureError::BackendUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_camera_backend_is_unavailable() {
        let err = acquire(&mut NoCameraBackend, &DEFAULT_CANDIDATES).err();
        match err {
            Some(AppError::DeviceUnavailable { tried }) => assert_eq!(tried, vec![0, 1, 2]),
            other => panic!("expected DeviceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_acquires_first_available_synthetic_index() {
        let mut backend = SyntheticBackend::new(32, 24).with_available(vec![2]);
        let acquired = acquire(&mut backend, &DEFAULT_CANDIDATES).unwrap();
        assert_eq!(acquired.index, 2);
        assert_eq!(acquired.first_frame.width(), 32);
    }
}
