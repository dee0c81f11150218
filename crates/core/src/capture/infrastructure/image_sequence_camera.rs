use std::path::{Path, PathBuf};

use crate::capture::domain::camera_source::{CameraSource, CaptureError, CaptureFormat};
use crate::shared::frame::Frame;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

/// Plays a directory of image files as a frame stream, in lexicographic
/// filename order.
///
/// Useful for replaying a recorded session through the pipeline. Every
/// image is resized-checked against the first one: frames in a stream must
/// share one resolution, so a mismatched file is an acquisition failure.
pub struct ImageSequenceCamera {
    dir: PathBuf,
    fps: f64,
    paths: Vec<PathBuf>,
    format: Option<CaptureFormat>,
}

impl ImageSequenceCamera {
    pub fn new(dir: &Path, fps: f64) -> Self {
        Self {
            dir: dir.to_path_buf(),
            fps,
            paths: Vec::new(),
            format: None,
        }
    }

    fn load(path: &Path, expected: &CaptureFormat, index: usize) -> Result<Frame, CaptureError> {
        let img = image::open(path)
            .map_err(|e| CaptureError::ReadFailed(format!("{}: {e}", path.display())))?
            .into_rgb8();
        if img.width() != expected.width || img.height() != expected.height {
            return Err(CaptureError::ReadFailed(format!(
                "{}: resolution {}x{} does not match stream {}x{}",
                path.display(),
                img.width(),
                img.height(),
                expected.width,
                expected.height
            )));
        }
        Ok(Frame::new(
            img.into_raw(),
            expected.width,
            expected.height,
            index,
        ))
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

impl CameraSource for ImageSequenceCamera {
    fn open(&mut self) -> Result<CaptureFormat, CaptureError> {
        let entries = std::fs::read_dir(&self.dir)
            .map_err(|e| CaptureError::DeviceUnavailable(format!("{}: {e}", self.dir.display())))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_image(p))
            .collect();
        paths.sort();

        let first = paths.first().ok_or_else(|| {
            CaptureError::DeviceUnavailable(format!("no image files in {}", self.dir.display()))
        })?;
        let probe = image::open(first)
            .map_err(|e| CaptureError::DeviceUnavailable(format!("{}: {e}", first.display())))?;

        let format = CaptureFormat {
            width: probe.width(),
            height: probe.height(),
            fps: self.fps,
        };
        self.paths = paths;
        self.format = Some(format.clone());
        Ok(format)
    }

    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, CaptureError>> + '_> {
        let Some(format) = self.format.clone() else {
            return Box::new(std::iter::once(Err(CaptureError::DeviceUnavailable(
                "image sequence not opened".into(),
            ))));
        };
        let paths = std::mem::take(&mut self.paths);
        Box::new(
            paths
                .into_iter()
                .enumerate()
                .map(move |(i, path)| Self::load(&path, &format, i)),
        )
    }

    fn close(&mut self) {
        self.paths.clear();
        self.format = None;
    }
}
