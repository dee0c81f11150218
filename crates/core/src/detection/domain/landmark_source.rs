use crate::detection::domain::landmark_set::LandmarkSet;
use crate::shared::frame::Frame;

/// Domain interface for facial-landmark detection.
///
/// Given a frame, returns at most one landmark set, or `None` when no face
/// is found (a valid outcome, not an error). Calls are synchronous and
/// complete within the pipeline iteration that issued them.
/// Implementations may be stateful (e.g. frame skipping), hence `&mut self`.
pub trait LandmarkSource: Send {
    fn detect(&mut self, frame: &Frame)
        -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>>;
}
