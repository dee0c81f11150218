use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use thiserror::Error;

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::capture::domain::camera_source::{CameraSource, CaptureError};
use crate::classification::domain::attention_classifier::AttentionClassifier;
use crate::classification::domain::attention_state::AttentionSnapshot;
use crate::delivery::domain::frame_sink::FrameSink;
use crate::detection::domain::landmark_source::LandmarkSource;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::snapshot_cell::SnapshotCell;

/// Stream-level pipeline failures. Frame-local problems (a detector
/// hiccup, a malformed landmark set) never surface here; they degrade the
/// classification instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("frame acquisition failed: {0}")]
    Acquisition(#[from] CaptureError),

    #[error("frame delivery failed: {0}")]
    Delivery(String),

    #[error("frame annotation failed: {0}")]
    Annotation(String),

    #[error("{0} thread panicked")]
    ThreadPanicked(&'static str),

    #[error("pipeline already executed")]
    AlreadyExecuted,
}

/// Per-frame observer. Returning `false` requests a clean stop, same as
/// raising the cancellation flag.
pub type FrameCallback = Box<dyn Fn(usize, &AttentionSnapshot) -> bool + Send>;

/// Configuration for one pipeline run.
pub struct PipelineConfig {
    pub cancelled: Arc<AtomicBool>,
    pub on_frame: Option<FrameCallback>,
    pub logger: Box<dyn PipelineLogger>,
}

/// Abstracts how the acquire → detect → classify → annotate → deliver loop
/// is executed.
///
/// This is a port (application-layer interface); infrastructure provides
/// the concrete execution strategy. Implementations must guarantee the
/// camera is released on every exit path and the snapshot cell holds the
/// verdict of the last completed iteration when `execute` returns.
///
/// Returns the number of frames delivered to the sink. End of stream and
/// cancellation are normal terminations (`Ok`); acquisition and delivery
/// failures are surfaced to the caller.
pub trait PipelineExecutor: Send {
    fn execute(
        &self,
        camera: Box<dyn CameraSource>,
        landmarks: Box<dyn LandmarkSource>,
        classifier: AttentionClassifier,
        annotator: Box<dyn FrameAnnotator>,
        sink: Box<dyn FrameSink>,
        snapshots: SnapshotCell,
        config: PipelineConfig,
    ) -> Result<usize, PipelineError>;
}
