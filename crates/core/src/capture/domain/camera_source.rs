use thiserror::Error;

use crate::shared::frame::Frame;

/// Acquisition failures are stream-level: the pipeline stops and surfaces
/// them to whoever started it. A frame simply running out is not an error;
/// the frame iterator ends instead.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("camera device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("frame read failed: {0}")]
    ReadFailed(String),
}

/// Capture parameters reported when a source is opened.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureFormat {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

/// Produces the live frame sequence the pipeline consumes.
///
/// `frames()` yields frames in acquisition order until the stream ends
/// (iterator exhaustion, a normal termination) or acquisition fails (an
/// `Err` item). `close()` must release the device and is called on every
/// pipeline exit path, so implementations must tolerate repeated calls.
pub trait CameraSource: Send {
    fn open(&mut self) -> Result<CaptureFormat, CaptureError>;

    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, CaptureError>> + '_>;

    fn close(&mut self);
}
