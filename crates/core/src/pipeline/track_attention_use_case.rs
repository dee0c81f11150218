use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::capture::domain::camera_source::CameraSource;
use crate::classification::domain::attention_classifier::AttentionClassifier;
use crate::delivery::domain::frame_sink::FrameSink;
use crate::detection::domain::landmark_source::LandmarkSource;
use crate::pipeline::pipeline_executor::{
    FrameCallback, PipelineConfig, PipelineError, PipelineExecutor,
};
use crate::pipeline::pipeline_logger::{NullPipelineLogger, PipelineLogger};
use crate::pipeline::snapshot_cell::SnapshotCell;

/// Orchestrates live attention tracking.
///
/// Wires the camera, landmark source, classifier, annotator, and sink
/// together and delegates execution to a `PipelineExecutor`. Single-use:
/// `execute` consumes the owned components, so a second call fails.
pub struct TrackAttentionUseCase {
    camera: Option<Box<dyn CameraSource>>,
    landmarks: Option<Box<dyn LandmarkSource>>,
    classifier: Option<AttentionClassifier>,
    annotator: Option<Box<dyn FrameAnnotator>>,
    sink: Option<Box<dyn FrameSink>>,
    executor: Box<dyn PipelineExecutor>,
    logger: Option<Box<dyn PipelineLogger>>,
    on_frame: Option<FrameCallback>,
    cancelled: Arc<AtomicBool>,
}

impl TrackAttentionUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        camera: Box<dyn CameraSource>,
        landmarks: Box<dyn LandmarkSource>,
        classifier: AttentionClassifier,
        annotator: Box<dyn FrameAnnotator>,
        sink: Box<dyn FrameSink>,
        executor: Box<dyn PipelineExecutor>,
        logger: Option<Box<dyn PipelineLogger>>,
        on_frame: Option<FrameCallback>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            camera: Some(camera),
            landmarks: Some(landmarks),
            classifier: Some(classifier),
            annotator: Some(annotator),
            sink: Some(sink),
            executor,
            logger,
            on_frame,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    /// Runs the pipeline until the stream ends, a stream-level failure
    /// occurs, or cancellation is requested. Returns the number of frames
    /// delivered. The snapshot cell keeps serving readers throughout.
    pub fn execute(&mut self, snapshots: &SnapshotCell) -> Result<usize, PipelineError> {
        let config = PipelineConfig {
            cancelled: self.cancelled.clone(),
            on_frame: self.on_frame.take(),
            logger: self
                .logger
                .take()
                .unwrap_or_else(|| Box::new(NullPipelineLogger)),
        };

        self.executor.execute(
            self.camera.take().ok_or(PipelineError::AlreadyExecuted)?,
            self.landmarks.take().ok_or(PipelineError::AlreadyExecuted)?,
            self.classifier.take().ok_or(PipelineError::AlreadyExecuted)?,
            self.annotator.take().ok_or(PipelineError::AlreadyExecuted)?,
            self.sink.take().ok_or(PipelineError::AlreadyExecuted)?,
            snapshots.clone(),
            config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::infrastructure::overlay_annotator::OverlayAnnotator;
    use crate::capture::domain::camera_source::{CaptureError, CaptureFormat};
    use crate::classification::domain::attention_state::{AttentionSnapshot, AttentionState};
    use crate::classification::domain::focus_band::FocusBand;
    use crate::detection::domain::landmark_set::LandmarkSet;
    use crate::pipeline::infrastructure::threaded_pipeline_executor::ThreadedPipelineExecutor;
    use crate::shared::constants::NOSE_TIP_INDEX;
    use crate::shared::frame::Frame;
    use crate::shared::point::Point;
    use std::collections::HashMap;
    use std::sync::atomic::Ordering;
    use std::sync::Mutex;

    // --- Stubs ---

    struct StubCamera {
        frames: Vec<Result<Frame, CaptureError>>,
        closed: Arc<Mutex<bool>>,
    }

    impl StubCamera {
        fn with_frames(count: usize) -> Self {
            Self {
                frames: (0..count).map(|i| Ok(make_frame(i))).collect(),
                closed: Arc::new(Mutex::new(false)),
            }
        }

        /// `count` good frames followed by one acquisition failure.
        fn failing_after(count: usize) -> Self {
            let mut frames: Vec<Result<Frame, CaptureError>> =
                (0..count).map(|i| Ok(make_frame(i))).collect();
            frames.push(Err(CaptureError::ReadFailed("device lost".into())));
            Self {
                frames,
                closed: Arc::new(Mutex::new(false)),
            }
        }
    }

    impl CameraSource for StubCamera {
        fn open(&mut self) -> Result<CaptureFormat, CaptureError> {
            Ok(CaptureFormat {
                width: 64,
                height: 64,
                fps: 30.0,
            })
        }

        fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, CaptureError>> + '_> {
            Box::new(self.frames.drain(..))
        }

        fn close(&mut self) {
            *self.closed.lock().unwrap() = true;
        }
    }

    struct UnopenableCamera;

    impl CameraSource for UnopenableCamera {
        fn open(&mut self) -> Result<CaptureFormat, CaptureError> {
            Err(CaptureError::DeviceUnavailable("no device".into()))
        }

        fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, CaptureError>> + '_> {
            Box::new(std::iter::empty())
        }

        fn close(&mut self) {}
    }

    /// Landmark results per frame index; unlisted frames report no face.
    struct StubSource {
        results: HashMap<usize, LandmarkSet>,
    }

    impl StubSource {
        fn empty() -> Self {
            Self {
                results: HashMap::new(),
            }
        }

        fn with(results: HashMap<usize, LandmarkSet>) -> Self {
            Self { results }
        }
    }

    impl LandmarkSource for StubSource {
        fn detect(
            &mut self,
            frame: &Frame,
        ) -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>> {
            Ok(self.results.get(&frame.index()).cloned())
        }
    }

    struct FailingSource;

    impl LandmarkSource for FailingSource {
        fn detect(
            &mut self,
            _frame: &Frame,
        ) -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>> {
            Err("model crashed".into())
        }
    }

    #[allow(clippy::type_complexity)]
    struct CollectingSink {
        written: Arc<Mutex<Vec<(usize, AttentionSnapshot)>>>,
        closed: Arc<Mutex<bool>>,
    }

    impl CollectingSink {
        fn new() -> Self {
            Self {
                written: Arc::new(Mutex::new(Vec::new())),
                closed: Arc::new(Mutex::new(false)),
            }
        }
    }

    impl FrameSink for CollectingSink {
        fn write(
            &mut self,
            frame: &Frame,
            snapshot: &AttentionSnapshot,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.written.lock().unwrap().push((frame.index(), *snapshot));
            Ok(())
        }

        fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            *self.closed.lock().unwrap() = true;
            Ok(())
        }
    }

    struct FailingSink;

    impl FrameSink for FailingSink {
        fn write(
            &mut self,
            _frame: &Frame,
            _snapshot: &AttentionSnapshot,
        ) -> Result<(), Box<dyn std::error::Error>> {
            Err("consumer gone".into())
        }

        fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }
    }

    // --- Helpers ---

    fn make_frame(index: usize) -> Frame {
        Frame::filled(64, 64, index, [128, 128, 128])
    }

    fn landmarks_at(x: f64, y: f64) -> LandmarkSet {
        let mut points = vec![Point::new(0.0, 0.0); NOSE_TIP_INDEX + 1];
        points[NOSE_TIP_INDEX] = Point::new(x, y);
        LandmarkSet::new(points)
    }

    fn use_case(
        camera: Box<dyn CameraSource>,
        landmarks: Box<dyn LandmarkSource>,
        sink: Box<dyn FrameSink>,
    ) -> TrackAttentionUseCase {
        TrackAttentionUseCase::new(
            camera,
            landmarks,
            AttentionClassifier::default(),
            Box::new(OverlayAnnotator::new()),
            sink,
            Box::new(ThreadedPipelineExecutor::new()),
            None,
            None,
            None,
        )
    }

    // --- Tests ---

    #[test]
    fn test_delivers_all_frames_in_order() {
        let sink = CollectingSink::new();
        let written = sink.written.clone();

        let mut uc = use_case(
            Box::new(StubCamera::with_frames(8)),
            Box::new(StubSource::empty()),
            Box::new(sink),
        );
        let delivered = uc.execute(&SnapshotCell::new()).unwrap();

        assert_eq!(delivered, 8);
        let written = written.lock().unwrap();
        for (i, (index, _)) in written.iter().enumerate() {
            assert_eq!(*index, i);
        }
    }

    #[test]
    fn test_empty_stream_stops_cleanly() {
        let sink = CollectingSink::new();
        let written = sink.written.clone();

        let mut uc = use_case(
            Box::new(StubCamera::with_frames(0)),
            Box::new(StubSource::empty()),
            Box::new(sink),
        );
        assert_eq!(uc.execute(&SnapshotCell::new()).unwrap(), 0);
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_snapshots_follow_landmark_evidence() {
        let mut results = HashMap::new();
        results.insert(0, landmarks_at(0.5, 0.5)); // focused
        results.insert(1, landmarks_at(0.1, 0.5)); // distracted
                                                   // frame 2: no face

        let sink = CollectingSink::new();
        let written = sink.written.clone();

        let mut uc = use_case(
            Box::new(StubCamera::with_frames(3)),
            Box::new(StubSource::with(results)),
            Box::new(sink),
        );
        uc.execute(&SnapshotCell::new()).unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written[0].1.state, AttentionState::Focused);
        assert!(written[0].1.is_focused);
        assert_eq!(written[1].1.state, AttentionState::Distracted);
        assert_eq!(written[2].1.state, AttentionState::NoSubject);
        assert!(written[2].1.reference_point.is_none());
    }

    #[test]
    fn test_acquisition_failure_at_iteration_5() {
        // 4 good frames, failure on the 5th acquisition: exactly 4 pairs
        // delivered, camera released, failure surfaced.
        let camera = StubCamera::failing_after(4);
        let closed = camera.closed.clone();
        let sink = CollectingSink::new();
        let written = sink.written.clone();
        let sink_closed = sink.closed.clone();

        let mut uc = use_case(
            Box::new(camera),
            Box::new(StubSource::empty()),
            Box::new(sink),
        );
        let result = uc.execute(&SnapshotCell::new());

        assert!(matches!(result, Err(PipelineError::Acquisition(_))));
        assert_eq!(written.lock().unwrap().len(), 4);
        assert!(*closed.lock().unwrap());
        assert!(*sink_closed.lock().unwrap());
    }

    #[test]
    fn test_camera_released_after_clean_run() {
        let camera = StubCamera::with_frames(3);
        let closed = camera.closed.clone();

        let mut uc = use_case(
            Box::new(camera),
            Box::new(StubSource::empty()),
            Box::new(CollectingSink::new()),
        );
        uc.execute(&SnapshotCell::new()).unwrap();
        assert!(*closed.lock().unwrap());
    }

    #[test]
    fn test_open_failure_surfaces_without_frames() {
        let mut uc = use_case(
            Box::new(UnopenableCamera),
            Box::new(StubSource::empty()),
            Box::new(CollectingSink::new()),
        );
        let result = uc.execute(&SnapshotCell::new());
        assert!(matches!(result, Err(PipelineError::Acquisition(_))));
    }

    #[test]
    fn test_detector_failure_degrades_to_no_subject() {
        let sink = CollectingSink::new();
        let written = sink.written.clone();

        let mut uc = use_case(
            Box::new(StubCamera::with_frames(3)),
            Box::new(FailingSource),
            Box::new(sink),
        );
        // Frame-local detector failures must not kill the stream.
        assert_eq!(uc.execute(&SnapshotCell::new()).unwrap(), 3);

        let written = written.lock().unwrap();
        assert!(written
            .iter()
            .all(|(_, s)| s.state == AttentionState::NoSubject));
    }

    #[test]
    fn test_sink_failure_stops_pipeline() {
        let mut uc = use_case(
            Box::new(StubCamera::with_frames(100)),
            Box::new(StubSource::empty()),
            Box::new(FailingSink),
        );
        let result = uc.execute(&SnapshotCell::new());
        assert!(matches!(result, Err(PipelineError::Delivery(_))));
    }

    #[test]
    fn test_cancellation_via_flag() {
        let cancelled = Arc::new(AtomicBool::new(false));
        let cancelled_clone = cancelled.clone();
        let sink = CollectingSink::new();
        let written = sink.written.clone();

        let mut uc = TrackAttentionUseCase::new(
            Box::new(StubCamera::with_frames(1000)),
            Box::new(StubSource::empty()),
            AttentionClassifier::default(),
            Box::new(OverlayAnnotator::new()),
            Box::new(sink),
            Box::new(ThreadedPipelineExecutor::new()),
            None,
            Some(Box::new(move |processed, _| {
                if processed >= 5 {
                    cancelled_clone.store(true, Ordering::Relaxed);
                }
                true
            })),
            Some(cancelled),
        );

        // Cancellation is a normal stop, not an error.
        uc.execute(&SnapshotCell::new()).unwrap();
        assert!(written.lock().unwrap().len() < 1000);
    }

    #[test]
    fn test_on_frame_false_stops_cleanly() {
        let camera = StubCamera::with_frames(50);
        let closed = camera.closed.clone();

        let mut uc = TrackAttentionUseCase::new(
            Box::new(camera),
            Box::new(StubSource::empty()),
            AttentionClassifier::default(),
            Box::new(OverlayAnnotator::new()),
            Box::new(CollectingSink::new()),
            Box::new(ThreadedPipelineExecutor::new()),
            None,
            Some(Box::new(|processed, _| processed < 3)),
            None,
        );

        uc.execute(&SnapshotCell::new()).unwrap();
        assert!(*closed.lock().unwrap());
    }

    #[test]
    fn test_snapshot_cell_reflects_last_iteration() {
        let mut results = HashMap::new();
        results.insert(4, landmarks_at(0.5, 0.5));

        let snapshots = SnapshotCell::new();
        let mut uc = use_case(
            Box::new(StubCamera::with_frames(5)),
            Box::new(StubSource::with(results)),
            Box::new(CollectingSink::new()),
        );
        uc.execute(&snapshots).unwrap();

        // Last frame (index 4) was focused.
        let latest = snapshots.latest();
        assert_eq!(latest.state, AttentionState::Focused);
        assert!(latest.is_focused);
    }

    #[test]
    fn test_concurrent_status_reads_during_run() {
        let snapshots = SnapshotCell::new();
        let reader = snapshots.clone();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_reader = stop.clone();

        let reader_handle = std::thread::spawn(move || {
            while !stop_reader.load(Ordering::Relaxed) {
                let seen = reader.latest();
                assert_eq!(seen.is_focused, seen.state == AttentionState::Focused);
            }
        });

        let mut results = HashMap::new();
        for i in 0..200 {
            // Alternate focused / distracted every frame.
            let x = if i % 2 == 0 { 0.5 } else { 0.1 };
            results.insert(i, landmarks_at(x, 0.5));
        }
        let mut uc = use_case(
            Box::new(StubCamera::with_frames(200)),
            Box::new(StubSource::with(results)),
            Box::new(CollectingSink::new()),
        );
        uc.execute(&snapshots).unwrap();

        stop.store(true, Ordering::Relaxed);
        reader_handle.join().unwrap();
    }

    #[test]
    fn test_second_execute_fails() {
        let mut uc = use_case(
            Box::new(StubCamera::with_frames(1)),
            Box::new(StubSource::empty()),
            Box::new(CollectingSink::new()),
        );
        let snapshots = SnapshotCell::new();
        uc.execute(&snapshots).unwrap();
        assert!(matches!(
            uc.execute(&snapshots),
            Err(PipelineError::AlreadyExecuted)
        ));
    }
}
