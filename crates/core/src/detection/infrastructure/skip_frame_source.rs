use crate::detection::domain::landmark_set::LandmarkSet;
use crate::detection::domain::landmark_source::LandmarkSource;
use crate::shared::frame::Frame;

/// Decorator that runs the inner landmark source every N frames, reusing
/// the previous result in between.
///
/// Landmark inference is the expensive stage of the pipeline; with a single
/// slowly-moving subject, reusing a detection for a frame or two costs
/// little accuracy. Absence (`None`) is reused the same way as presence.
pub struct SkipFrameSource {
    inner: Box<dyn LandmarkSource>,
    skip_interval: usize,
    frame_count: usize,
    last: Option<LandmarkSet>,
}

impl SkipFrameSource {
    pub fn new(inner: Box<dyn LandmarkSource>, skip_interval: usize) -> Result<Self, &'static str> {
        if skip_interval < 1 {
            return Err("skip_interval must be >= 1");
        }
        Ok(Self {
            inner,
            skip_interval,
            frame_count: 0,
            last: None,
        })
    }
}

impl LandmarkSource for SkipFrameSource {
    fn detect(
        &mut self,
        frame: &Frame,
    ) -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>> {
        if self.frame_count % self.skip_interval == 0 {
            self.last = self.inner.detect(frame)?;
        }
        self.frame_count += 1;
        Ok(self.last.clone())
    }
}
