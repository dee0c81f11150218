use crate::detection::domain::landmark_set::LandmarkSet;
use crate::detection::domain::landmark_source::LandmarkSource;
use crate::shared::constants::NOSE_TIP_INDEX;
use crate::shared::frame::Frame;
use crate::shared::point::Point;

const DEFAULT_LUMA_THRESHOLD: u8 = 96;

/// Minimum share of frame pixels that must be below the threshold before a
/// subject is reported; filters out sensor noise on an empty scene.
const MIN_SUBJECT_FRACTION: f64 = 0.001;

/// Toy landmark source that reports the centroid of the darkest blob in the
/// frame as the nose tip.
///
/// This is a stand-in for a real face-mesh model: it lets the full pipeline
/// run end to end against the synthetic camera (whose subject is a dark
/// disc) and in tests, without shipping a neural detector. The emitted set
/// carries just enough points to populate the reference index.
pub struct CentroidLandmarkSource {
    luma_threshold: u8,
}

impl CentroidLandmarkSource {
    pub fn new(luma_threshold: u8) -> Self {
        Self { luma_threshold }
    }
}

impl Default for CentroidLandmarkSource {
    fn default() -> Self {
        Self::new(DEFAULT_LUMA_THRESHOLD)
    }
}

impl LandmarkSource for CentroidLandmarkSource {
    fn detect(
        &mut self,
        frame: &Frame,
    ) -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>> {
        let pixels = frame.as_ndarray();
        let (height, width, _) = pixels.dim();

        let mut x_sum = 0.0;
        let mut y_sum = 0.0;
        let mut count: usize = 0;

        for y in 0..height {
            for x in 0..width {
                // Integer BT.601 luma approximation.
                let luma = (pixels[[y, x, 0]] as u32 * 299
                    + pixels[[y, x, 1]] as u32 * 587
                    + pixels[[y, x, 2]] as u32 * 114)
                    / 1000;
                if luma < self.luma_threshold as u32 {
                    x_sum += x as f64;
                    y_sum += y as f64;
                    count += 1;
                }
            }
        }

        let min_count = ((width * height) as f64 * MIN_SUBJECT_FRACTION).ceil() as usize;
        if count < min_count {
            return Ok(None);
        }

        let centroid = Point::new(
            x_sum / count as f64 / width as f64,
            y_sum / count as f64 / height as f64,
        );
        let mut points = vec![centroid; NOSE_TIP_INDEX + 1];
        points[NOSE_TIP_INDEX] = centroid;
        Ok(Some(LandmarkSet::new(points)))
    }
}
