use std::time::Duration;

use crate::capture::domain::camera_source::{CameraSource, CaptureError, CaptureFormat};
use crate::shared::frame::Frame;

const BACKGROUND: [u8; 3] = [200, 200, 200];
const SUBJECT: [u8; 3] = [30, 30, 30];

/// Camera stand-in that renders a dark subject disc orbiting the frame
/// center on a light background.
///
/// The disc passes in and out of the default focus band as it orbits, so a
/// full pipeline wired to this source exercises every classification state
/// without hardware. With `frame_limit = 0` the stream is unbounded; with
/// `fps > 0` frame production is paced to roughly real time.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    fps: f64,
    frame_limit: usize,
    opened: bool,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32, fps: f64, frame_limit: usize) -> Self {
        Self {
            width,
            height,
            fps,
            frame_limit,
            opened: false,
        }
    }

    fn render(&self, index: usize) -> Frame {
        let mut frame = Frame::filled(self.width, self.height, index, BACKGROUND);

        // One full orbit every 120 frames, radius 30% of the frame.
        let angle = index as f64 / 120.0 * std::f64::consts::TAU;
        let cx = 0.5 + 0.3 * angle.cos();
        let cy = 0.5 + 0.3 * angle.sin();
        let px = cx * self.width as f64;
        let py = cy * self.height as f64;
        let radius = self.width.min(self.height) as f64 * 0.06;

        let r = radius.ceil() as i64;
        for dy in -r..=r {
            for dx in -r..=r {
                if ((dx * dx + dy * dy) as f64) <= radius * radius {
                    frame.set_pixel(px as i64 + dx, py as i64 + dy, SUBJECT);
                }
            }
        }
        frame
    }
}

impl CameraSource for SyntheticCamera {
    fn open(&mut self) -> Result<CaptureFormat, CaptureError> {
        self.opened = true;
        Ok(CaptureFormat {
            width: self.width,
            height: self.height,
            fps: self.fps,
        })
    }

    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, CaptureError>> + '_> {
        if !self.opened {
            return Box::new(std::iter::once(Err(CaptureError::DeviceUnavailable(
                "synthetic camera not opened".into(),
            ))));
        }

        let limit = self.frame_limit;
        let pacing = if self.fps > 0.0 {
            Some(Duration::from_secs_f64(1.0 / self.fps))
        } else {
            None
        };

        let camera: &SyntheticCamera = self;
        Box::new(
            (0..)
                .take_while(move |i| limit == 0 || *i < limit)
                .map(move |i| {
                    if let Some(delay) = pacing {
                        std::thread::sleep(delay);
                    }
                    Ok(camera.render(i))
                }),
        )
    }

    fn close(&mut self) {
        self.opened = false;
    }
}
