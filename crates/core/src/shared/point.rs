/// A 2D point in normalized frame coordinates, [0,1] on both axes.
///
/// Landmark detectors emit normalized coordinates so the classification
/// logic is independent of capture resolution; scaling back to pixels
/// happens only when drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are finite and inside the unit square.
    pub fn is_normalized(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && (0.0..=1.0).contains(&self.x)
            && (0.0..=1.0).contains(&self.y)
    }

    /// Scales to pixel coordinates for a frame of the given size.
    pub fn to_pixel(&self, width: u32, height: u32) -> (i64, i64) {
        (
            (self.x * width as f64) as i64,
            (self.y * height as f64) as i64,
        )
    }
}
