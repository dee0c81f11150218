//! Normalized facial landmarks for one detected face.
//!
//! The set is frame-scoped and immutable: produced by a landmark source,
//! consumed by the classifier, then dropped. Classification only needs the
//! nose-tip reference point; the rest of the layout is carried opaquely.

use crate::shared::constants::NOSE_TIP_INDEX;
use crate::shared::point::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// The nose-tip landmark used as the attention proxy.
    ///
    /// Returns `None` when the set is too short to contain the reference
    /// index or the stored point is not a finite normalized coordinate.
    /// A malfunctioning upstream model therefore degrades to "no subject"
    /// instead of faulting the pipeline.
    pub fn reference_point(&self) -> Option<Point> {
        self.point(NOSE_TIP_INDEX).filter(Point::is_normalized)
    }
}
